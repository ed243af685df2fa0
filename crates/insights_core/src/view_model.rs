use crate::{Insight, MAX_IMPACT_SCORE};

/// Frames of the busy indicator shown while a request is in flight.
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub input_hint: Option<&'static str>,
    pub loading: bool,
    pub phase: RequestPhase,
    pub spinner: Option<&'static str>,
    /// `None` until the first job finishes.
    pub cards: Option<Vec<InsightCardView>>,
    pub selected: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Submitting {
        url: String,
    },
    Polling {
        url: String,
        attempts: u32,
        status: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightCardView {
    pub key: u32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Impact score scaled to 0..=100 for a progress gauge.
    pub impact_percent: u16,
    pub impact_label: String,
    pub grid_label: String,
}

impl InsightCardView {
    pub fn from_insight(insight: &Insight) -> Self {
        let score = insight.impact_score.min(MAX_IMPACT_SCORE);
        Self {
            key: insight.sequence_number,
            title: insight.title.clone(),
            description: insight.description.clone(),
            tags: insight.tags.clone(),
            impact_percent: u16::from(score) * 10,
            impact_label: format!("{score}/{MAX_IMPACT_SCORE}"),
            grid_label: format!("Grid: {}", insight.grid),
        }
    }
}

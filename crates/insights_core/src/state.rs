use std::time::Duration;

use url::Url;

use crate::view_model::{AppViewModel, InsightCardView, RequestPhase, SPINNER_FRAMES};
use crate::Insight;

pub type RequestId = u64;

/// How often a pending job is polled and when to stop asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// `None` polls until the job finishes or a request fails.
    pub max_polls: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_polls: None,
        }
    }
}

/// Why a URL was not submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRejection {
    Empty,
    NotHttp,
}

impl UrlRejection {
    pub fn hint(self) -> &'static str {
        match self {
            UrlRejection::Empty => "Enter a pricing page URL",
            UrlRejection::NotHttp => "URL must start with http:// or https://",
        }
    }
}

/// Trim the raw input and make sure it is an absolute http(s) URL.
///
/// The trimmed text is returned unchanged so the service sees exactly what
/// the user typed.
pub fn validate_pricing_url(raw: &str) -> Result<String, UrlRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlRejection::Empty);
    }
    match Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Ok(trimmed.to_string())
        }
        _ => Err(UrlRejection::NotHttp),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActiveRequest {
    pub(crate) request_id: RequestId,
    pub(crate) url: String,
    pub(crate) job: Option<String>,
    pub(crate) polls: u32,
    pub(crate) last_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: PollSettings,
    input: String,
    input_hint: Option<UrlRejection>,
    active: Option<ActiveRequest>,
    last_request_id: RequestId,
    insights: Option<Vec<Insight>>,
    selected: usize,
    spinner_frame: usize,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PollSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.active.is_some()
    }

    pub fn insights(&self) -> Option<&[Insight]> {
        self.insights.as_deref()
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let phase = match &self.active {
            None => RequestPhase::Idle,
            Some(active) if active.job.is_none() => RequestPhase::Submitting {
                url: active.url.clone(),
            },
            Some(active) => RequestPhase::Polling {
                url: active.url.clone(),
                attempts: active.polls,
                status: active.last_status.clone(),
            },
        };

        AppViewModel {
            input: self.input.clone(),
            input_hint: self.input_hint.map(UrlRejection::hint),
            loading: self.is_loading(),
            phase,
            spinner: self
                .is_loading()
                .then(|| SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]),
            cards: self
                .insights
                .as_ref()
                .map(|insights| insights.iter().map(InsightCardView::from_insight).collect()),
            selected: self.selected,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) -> bool {
        if self.input == text && self.input_hint.is_none() {
            return false;
        }
        self.input = text;
        self.input_hint = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn reject_input(&mut self, rejection: UrlRejection) {
        self.input_hint = Some(rejection);
        self.mark_dirty();
    }

    /// Open a new request for `url` and return its id.
    pub(crate) fn begin_request(&mut self, url: String) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.active = Some(ActiveRequest {
            request_id,
            url,
            job: None,
            polls: 0,
            last_status: None,
        });
        self.spinner_frame = 0;
        self.mark_dirty();
        request_id
    }

    /// The in-flight request, if `request_id` still refers to it.
    pub(crate) fn active_mut(&mut self, request_id: RequestId) -> Option<&mut ActiveRequest> {
        self.active
            .as_mut()
            .filter(|active| active.request_id == request_id)
    }

    pub(crate) fn end_request(&mut self) -> Option<ActiveRequest> {
        let ended = self.active.take();
        if ended.is_some() {
            self.mark_dirty();
        }
        ended
    }

    pub(crate) fn set_insights(&mut self, insights: Vec<Insight>) {
        self.insights = Some(insights);
        self.selected = 0;
        self.mark_dirty();
    }

    pub(crate) fn move_selection(&mut self, forward: bool) {
        let count = self.insights.as_ref().map_or(0, Vec::len);
        if count == 0 {
            return;
        }
        let next = if forward {
            (self.selected + 1).min(count - 1)
        } else {
            self.selected.saturating_sub(1)
        };
        if next != self.selected {
            self.selected = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn advance_spinner(&mut self) {
        if self.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            self.mark_dirty();
        }
    }
}

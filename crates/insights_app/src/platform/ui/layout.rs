use std::ops::Range;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::constants::{BUTTON_WIDTH, CARD_HEIGHT};

/// Regions of the single screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub input: Rect,
    pub button: Rect,
    pub status: Rect,
    pub cards: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + subtitle
            Constraint::Length(3), // Input with border
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Key help
        ])
        .split(area);

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(rows[1]);

    ScreenAreas {
        header: rows[0],
        input: input_row[0],
        button: input_row[1],
        status: rows[2],
        cards: rows[3],
        footer: rows[4],
    }
}

/// Indices of the cards that fit in `height` rows while keeping `selected` on screen.
pub fn visible_cards(selected: usize, count: usize, height: u16) -> Range<usize> {
    let fits = usize::from((height / CARD_HEIGHT).max(1));
    if count <= fits {
        return 0..count;
    }
    let selected = selected.min(count - 1);
    let start = (selected + 1).saturating_sub(fits);
    start..start + fits
}

/// Stacked card slots inside `area`, one per visible card.
pub fn card_slots(area: Rect, visible: usize) -> Vec<Rect> {
    (0..visible)
        .map(|i| {
            let offset = CARD_HEIGHT.saturating_mul(i as u16);
            let y = area.y.saturating_add(offset);
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            Rect::new(area.x, y, area.width, height)
        })
        .filter(|slot| slot.height > 0)
        .collect()
}

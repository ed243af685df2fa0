use chrono::{DateTime, Local};
use insights_core::{AppViewModel, InsightCardView, RequestPhase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::constants::*;
use super::layout::{card_slots, split, visible_cards};

pub fn draw(f: &mut Frame, view: &AppViewModel, submitted_at: Option<DateTime<Local>>) {
    let areas = split(f.area());

    draw_header(f, areas.header);
    draw_input(f, view, areas.input);
    draw_button(f, view, areas.button);
    draw_status(f, view, submitted_at, areas.status);
    draw_cards(f, view, areas.cards);
    draw_footer(f, areas.footer);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(APP_SUBTITLE, Style::default().fg(TEXT_DIM))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_input(f: &mut Frame, view: &AppViewModel, area: Rect) {
    let border = if view.input_hint.is_some() {
        WARNING
    } else {
        ACCENT
    };
    let block = Block::default()
        .title(Span::styled(INPUT_TITLE, Style::default().fg(border)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    // Keep the tail of a long URL in view, where the cursor is.
    let visible_width = usize::from(inner.width.saturating_sub(1));
    let chars = view.input.chars().count();
    let skip = chars.saturating_sub(visible_width);
    let shown: String = view.input.chars().skip(skip).collect();

    f.render_widget(
        Paragraph::new(Span::styled(shown.clone(), Style::default().fg(TEXT))).block(block),
        area,
    );

    let cursor_x = inner.x + shown.chars().count() as u16;
    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position(Position::new(cursor_x.min(inner.right() - 1), inner.y));
    }
}

fn draw_button(f: &mut Frame, view: &AppViewModel, area: Rect) {
    let (label, color) = match view.spinner {
        Some(frame) => (format!(" {frame} Working… "), INACTIVE),
        None => (BUTTON_LABEL.to_string(), ACCENT),
    };
    let button = Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(button, area);
}

fn draw_status(
    f: &mut Frame,
    view: &AppViewModel,
    submitted_at: Option<DateTime<Local>>,
    area: Rect,
) {
    let line = status_line(view, submitted_at);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

pub(crate) fn status_text(view: &AppViewModel, submitted_at: Option<DateTime<Local>>) -> String {
    if let Some(hint) = view.input_hint {
        return hint.to_string();
    }
    let spinner = view.spinner.unwrap_or(" ");
    let since = submitted_at
        .map(|at| format!(" since {}", at.format("%H:%M:%S")))
        .unwrap_or_default();
    match &view.phase {
        RequestPhase::Idle => match &view.cards {
            None => "Ready".to_string(),
            Some(cards) if cards.len() == 1 => "1 insight".to_string(),
            Some(cards) => format!("{} insights", cards.len()),
        },
        RequestPhase::Submitting { url } => format!("{spinner} Submitting {url}{since}"),
        RequestPhase::Polling {
            url,
            attempts,
            status,
        } => {
            let status = status.as_deref().unwrap_or("accepted");
            format!("{spinner} Analysing {url}{since} · {status} · poll {attempts}")
        }
    }
}

fn status_line(view: &AppViewModel, submitted_at: Option<DateTime<Local>>) -> Line<'static> {
    let color = if view.input_hint.is_some() {
        WARNING
    } else if view.loading {
        ACCENT
    } else {
        TEXT_DIM
    };
    Line::from(Span::styled(
        status_text(view, submitted_at),
        Style::default().fg(color),
    ))
}

fn draw_cards(f: &mut Frame, view: &AppViewModel, area: Rect) {
    let cards = match &view.cards {
        None => {
            let hint = Paragraph::new(Line::from(Span::styled(
                "No report yet.",
                Style::default().fg(TEXT_DIM),
            )))
            .alignment(Alignment::Center);
            f.render_widget(hint, area);
            return;
        }
        Some(cards) if cards.is_empty() => {
            let empty = Paragraph::new(Line::from(Span::styled(
                "The analysis finished without insights.",
                Style::default().fg(TEXT_DIM),
            )))
            .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }
        Some(cards) => cards,
    };

    let range = visible_cards(view.selected, cards.len(), area.height);
    let slots = card_slots(area, range.len());
    for (index, slot) in range.zip(slots) {
        draw_card(f, &cards[index], index == view.selected, slot);
    }
}

fn draw_card(f: &mut Frame, card: &InsightCardView, selected: bool, area: Rect) {
    let border_color = if selected { ACCENT } else { INACTIVE };
    let block = Block::default()
        .title(Span::styled(
            format!(" #{} {} ", card.key, card.title),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DESCRIPTION_LINES),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let description = Paragraph::new(card.description.as_str())
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: true });
    f.render_widget(description, rows[0]);

    f.render_widget(Paragraph::new(tag_line(&card.tags)), rows[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(SUCCESS).bg(TAG_BG))
        .percent(card.impact_percent.min(100))
        .label(format!("Impact {}", card.impact_label))
        .use_unicode(true);
    f.render_widget(gauge, rows[2]);

    let caption = Paragraph::new(Span::styled(
        card.grid_label.as_str(),
        Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
    ));
    f.render_widget(caption, rows[3]);
}

fn tag_line(tags: &[String]) -> Line<'_> {
    let mut spans = Vec::with_capacity(tags.len() * 2);
    for tag in tags {
        spans.push(Span::styled(
            format!(" {tag} "),
            Style::default().fg(TEXT).bg(TAG_BG),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Span::styled(KEY_HELP, Style::default().fg(TEXT_DIM)))
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}

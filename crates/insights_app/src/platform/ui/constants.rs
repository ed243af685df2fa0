use std::time::Duration;

use ratatui::style::Color;

pub const APP_TITLE: &str = "Pricing Insights";
pub const APP_SUBTITLE: &str = "Enter a pricing page url and wait for the generated insights!";
pub const BUTTON_LABEL: &str = " ⏎ Generate Report ";
pub const INPUT_TITLE: &str = " Enter URL ";
pub const KEY_HELP: &str = "Enter submit · ↑/↓ select card · Ctrl-U clear · Esc quit";

/// Borders (2) + description (3) + tags + gauge + caption.
pub const CARD_HEIGHT: u16 = 8;
pub const DESCRIPTION_LINES: u16 = 3;
pub const BUTTON_WIDTH: u16 = 24;

/// Spinner animation rate.
pub const TICK_INTERVAL: Duration = Duration::from_millis(120);
/// How long the loop waits for terminal input before draining messages.
pub const INPUT_POLL: Duration = Duration::from_millis(50);

pub const ACCENT: Color = Color::Rgb(250, 179, 135);
pub const SUCCESS: Color = Color::Rgb(166, 218, 149);
pub const WARNING: Color = Color::Rgb(249, 226, 175);
pub const TEXT: Color = Color::Rgb(205, 214, 244);
pub const TEXT_DIM: Color = Color::Rgb(147, 153, 178);
pub const INACTIVE: Color = Color::Rgb(88, 91, 112);
pub const TAG_BG: Color = Color::Rgb(69, 71, 90);

//! Insights core: pure state machine and view-model helpers.
mod effect;
mod insight;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use insight::{GridCell, GridRange, Insight, MAX_IMPACT_SCORE};
pub use msg::Msg;
pub use state::{validate_pricing_url, AppState, PollSettings, RequestId, UrlRejection};
pub use update::update;
pub use view_model::{AppViewModel, InsightCardView, RequestPhase, SPINNER_FRAMES};

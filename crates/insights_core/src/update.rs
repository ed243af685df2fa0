use std::time::Duration;

use crate::state::validate_pricing_url;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // One request at a time; a second click while polling is dropped.
            if state.is_loading() {
                return (state, Vec::new());
            }
            match validate_pricing_url(state.input()) {
                Ok(url) => {
                    let request_id = state.begin_request(url.clone());
                    vec![Effect::SubmitUrl { request_id, url }]
                }
                Err(rejection) => {
                    state.reject_input(rejection);
                    Vec::new()
                }
            }
        }
        Msg::JobAccepted { request_id, job } => match state.active_mut(request_id) {
            Some(active) => {
                active.job = Some(job.clone());
                state.mark_dirty();
                vec![Effect::PollJob {
                    request_id,
                    job,
                    delay: Duration::ZERO,
                }]
            }
            None => Vec::new(),
        },
        Msg::JobPending { request_id, status } => {
            let settings = state.settings();
            let Some(active) = state.active_mut(request_id) else {
                return (state, Vec::new());
            };
            active.polls += 1;
            active.last_status = Some(status);
            let polls = active.polls;
            let job = active.job.clone();
            state.mark_dirty();

            match (job, settings.max_polls) {
                (Some(_), Some(max)) if polls >= max => {
                    state.end_request();
                    vec![Effect::LogFailure {
                        request_id,
                        reason: format!("gave up after {polls} polls without a finished job"),
                    }]
                }
                (Some(job), _) => vec![Effect::PollJob {
                    request_id,
                    job,
                    delay: settings.interval,
                }],
                // A pending status before the job was accepted cannot be polled again.
                (None, _) => {
                    state.end_request();
                    vec![Effect::LogFailure {
                        request_id,
                        reason: "job status arrived before the job was accepted".to_string(),
                    }]
                }
            }
        }
        Msg::InsightsReady {
            request_id,
            insights,
        } => {
            if state.active_mut(request_id).is_none() {
                return (state, Vec::new());
            }
            state.end_request();
            state.set_insights(insights);
            Vec::new()
        }
        Msg::RequestFailed { request_id, reason } => {
            if state.active_mut(request_id).is_none() {
                return (state, Vec::new());
            }
            state.end_request();
            vec![Effect::LogFailure { request_id, reason }]
        }
        Msg::SelectNextCard => {
            state.move_selection(true);
            Vec::new()
        }
        Msg::SelectPreviousCard => {
            state.move_selection(false);
            Vec::new()
        }
        Msg::Tick => {
            state.advance_spinner();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

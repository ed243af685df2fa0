use std::sync::Once;
use std::time::Duration;

use insights_core::{
    update, AppState, Effect, GridCell, GridRange, Insight, Msg, PollSettings, RequestPhase,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(insights_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn insight(sequence_number: u32, title: &str, score: u8) -> Insight {
    Insight {
        title: title.to_string(),
        description: format!("{title} description"),
        impact_score: score,
        tags: vec!["pricing".to_string()],
        sequence_number,
        grid: GridRange {
            from: GridCell::new("A", "1"),
            to: GridCell::new("B", "2"),
        },
    }
}

/// Drive a request to the polling phase and return the job uuid in use.
fn accepted(state: AppState, url: &str) -> (AppState, u64) {
    let (state, effects) = submit(state, url);
    let request_id = match effects.as_slice() {
        [Effect::SubmitUrl { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::JobAccepted {
            request_id,
            job: "job-1".to_string(),
        },
    );
    (state, request_id)
}

#[test]
fn submit_emits_request_and_starts_loading() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "  https://example.com/pricing  ");

    assert_eq!(
        effects,
        vec![Effect::SubmitUrl {
            request_id: 1,
            url: "https://example.com/pricing".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert!(view.spinner.is_some());
    assert_eq!(
        view.phase,
        RequestPhase::Submitting {
            url: "https://example.com/pricing".to_string()
        }
    );
    assert_eq!(view.cards, None);
    assert!(state.consume_dirty());
}

#[test]
fn accepted_job_is_polled_immediately() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://example.com");
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(
        state,
        Msg::JobAccepted {
            request_id: 1,
            job: "abc-123".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::PollJob {
            request_id: 1,
            job: "abc-123".to_string(),
            delay: Duration::ZERO,
        }]
    );
    assert_eq!(
        state.view().phase,
        RequestPhase::Polling {
            url: "https://example.com".to_string(),
            attempts: 0,
            status: None,
        }
    );
}

#[test]
fn pending_status_polls_again_after_interval() {
    init_logging();
    let settings = PollSettings {
        interval: Duration::from_millis(1500),
        max_polls: None,
    };
    let (state, request_id) = accepted(AppState::with_settings(settings), "https://example.com");

    let (state, effects) = update(
        state,
        Msg::JobPending {
            request_id,
            status: "RUNNING".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::PollJob {
            request_id,
            job: "job-1".to_string(),
            delay: Duration::from_millis(1500),
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert_eq!(
        view.phase,
        RequestPhase::Polling {
            url: "https://example.com".to_string(),
            attempts: 1,
            status: Some("RUNNING".to_string()),
        }
    );
}

#[test]
fn default_interval_is_two_seconds() {
    init_logging();
    let (state, request_id) = accepted(AppState::new(), "https://example.com");
    let (_state, effects) = update(
        state,
        Msg::JobPending {
            request_id,
            status: "QUEUED".to_string(),
        },
    );

    assert!(matches!(
        effects.as_slice(),
        [Effect::PollJob { delay, .. }] if *delay == Duration::from_secs(2)
    ));
}

#[test]
fn finished_job_stops_polling_and_renders_cards() {
    init_logging();
    let (state, request_id) = accepted(AppState::new(), "https://example.com");
    let insights = vec![insight(1, "Anchor the top tier", 8), insight(2, "Drop the free plan", 3)];

    let (mut state, effects) = update(
        state,
        Msg::InsightsReady {
            request_id,
            insights: insights.clone(),
        },
    );

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.spinner, None);
    assert_eq!(view.phase, RequestPhase::Idle);
    let cards = view.cards.expect("cards rendered");
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].key, 1);
    assert_eq!(cards[0].title, "Anchor the top tier");
    assert_eq!(cards[1].key, 2);
    assert_eq!(state.insights(), Some(insights.as_slice()));

    // A late pending status for the finished request schedules nothing.
    let (state, effects) = update(
        state,
        Msg::JobPending {
            request_id,
            status: "RUNNING".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.view().loading);
}

#[test]
fn finished_job_with_no_insights_renders_empty_list() {
    init_logging();
    let (state, request_id) = accepted(AppState::new(), "https://example.com");
    let (state, _) = update(
        state,
        Msg::InsightsReady {
            request_id,
            insights: Vec::new(),
        },
    );

    assert_eq!(state.view().cards, Some(Vec::new()));
}

#[test]
fn failure_stops_loading_and_keeps_previous_cards() {
    init_logging();
    let (state, first) = accepted(AppState::new(), "https://example.com");
    let (state, _) = update(
        state,
        Msg::InsightsReady {
            request_id: first,
            insights: vec![insight(1, "Keep me", 5)],
        },
    );

    let (state, second) = accepted(state, "https://other.example.com");
    assert_eq!(second, first + 1);
    let (state, effects) = update(
        state,
        Msg::RequestFailed {
            request_id: second,
            reason: "network error".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::LogFailure {
            request_id: second,
            reason: "network error".to_string(),
        }]
    );
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.input_hint, None);
    let cards = view.cards.expect("previous cards kept");
    assert_eq!(cards[0].title, "Keep me");
}

#[test]
fn submit_is_ignored_while_loading() {
    init_logging();
    let (state, _) = accepted(AppState::new(), "https://example.com");

    let (mut state, effects) = submit(state, "https://second.example.com");

    assert!(effects.is_empty());
    assert!(state.view().loading);
    assert_eq!(
        state.view().phase,
        RequestPhase::Polling {
            url: "https://example.com".to_string(),
            attempts: 0,
            status: None,
        }
    );
    // The input still reflects what the user typed.
    assert_eq!(state.view().input, "https://second.example.com");
    assert!(state.consume_dirty());
}

#[test]
fn messages_for_other_requests_are_ignored() {
    init_logging();
    let (mut state, request_id) = accepted(AppState::new(), "https://example.com");
    state.consume_dirty();
    let stale = request_id + 7;

    let (state, effects) = update(
        state,
        Msg::JobAccepted {
            request_id: stale,
            job: "other".to_string(),
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        Msg::InsightsReady {
            request_id: stale,
            insights: vec![insight(1, "Stale", 1)],
        },
    );
    assert!(effects.is_empty());
    let (mut state, effects) = update(
        state,
        Msg::RequestFailed {
            request_id: stale,
            reason: "boom".to_string(),
        },
    );
    assert!(effects.is_empty());

    assert!(state.view().loading);
    assert_eq!(state.view().cards, None);
    assert!(!state.consume_dirty());
}

#[test]
fn empty_input_shows_hint_without_request() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "   ");

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.input_hint, Some("Enter a pricing page URL"));

    // Editing the input clears the hint.
    let (state, _) = update(state, Msg::InputChanged("h".to_string()));
    assert_eq!(state.view().input_hint, None);
}

#[test]
fn non_http_input_shows_hint_without_request() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "example.com/pricing");

    assert!(effects.is_empty());
    assert_eq!(
        state.view().input_hint,
        Some("URL must start with http:// or https://")
    );
}

#[test]
fn max_polls_abandons_request() {
    init_logging();
    let settings = PollSettings {
        interval: Duration::from_secs(2),
        max_polls: Some(2),
    };
    let (state, request_id) = accepted(AppState::with_settings(settings), "https://example.com");

    let (state, effects) = update(
        state,
        Msg::JobPending {
            request_id,
            status: "RUNNING".to_string(),
        },
    );
    assert!(matches!(effects.as_slice(), [Effect::PollJob { .. }]));

    let (state, effects) = update(
        state,
        Msg::JobPending {
            request_id,
            status: "RUNNING".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::LogFailure {
            request_id,
            reason: "gave up after 2 polls without a finished job".to_string(),
        }]
    );
    assert!(!state.view().loading);
}

#[test]
fn new_request_after_finish_gets_fresh_id() {
    init_logging();
    let (state, first) = accepted(AppState::new(), "https://example.com");
    let (state, _) = update(
        state,
        Msg::InsightsReady {
            request_id: first,
            insights: Vec::new(),
        },
    );

    let (_state, effects) = submit(state, "https://example.com");

    assert_eq!(
        effects,
        vec![Effect::SubmitUrl {
            request_id: first + 1,
            url: "https://example.com".to_string(),
        }]
    );
}

#[test]
fn selection_is_clamped_to_cards() {
    init_logging();
    let (state, request_id) = accepted(AppState::new(), "https://example.com");
    let (state, _) = update(
        state,
        Msg::InsightsReady {
            request_id,
            insights: vec![insight(1, "a", 1), insight(2, "b", 2), insight(3, "c", 3)],
        },
    );

    let (state, _) = update(state, Msg::SelectPreviousCard);
    assert_eq!(state.view().selected, 0);

    let (state, _) = update(state, Msg::SelectNextCard);
    let (state, _) = update(state, Msg::SelectNextCard);
    let (mut state, _) = update(state, Msg::SelectNextCard);
    assert_eq!(state.view().selected, 2);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::SelectNextCard);
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::SelectPreviousCard);
    assert_eq!(state.view().selected, 1);
}

#[test]
fn tick_animates_spinner_while_loading() {
    init_logging();
    let (mut state, _) = submit(AppState::new(), "https://example.com");
    let first = state.view().spinner;
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::Tick);

    assert!(state.consume_dirty());
    assert_ne!(state.view().spinner, first);
}

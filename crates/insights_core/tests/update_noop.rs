use insights_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_while_idle_changes_nothing() {
    let mut state = AppState::new();
    assert!(!state.consume_dirty());

    let (mut next, effects) = update(state.clone(), Msg::Tick);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next.view().spinner, None);
}

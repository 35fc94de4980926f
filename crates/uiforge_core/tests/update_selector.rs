use std::sync::Once;

use pretty_assertions::assert_eq;
use uiforge_core::{
    update, AppState, Effect, Msg, RequestFailure, Route, Strategy, StrategyDetailsView,
    StrategySummary, NONE_SENTINEL, NOTICE_STRATEGIES_FAILED, NOTICE_STRATEGY_FAILED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn summaries() -> Vec<StrategySummary> {
    vec![
        StrategySummary {
            filename: "minimal.json".into(),
            name: "minimal".into(),
        },
        StrategySummary {
            filename: "card_a.json".into(),
            name: "Card A".into(),
        },
    ]
}

fn minimal() -> Strategy {
    Strategy {
        filename: String::new(),
        name: "minimal".into(),
        abstraction_level: "high".into(),
        role: "front-end engineer".into(),
        format: "single HTML snippet".into(),
        prompt_prefix: "Build: ".into(),
        additional_requirements: None,
    }
}

fn loaded_root() -> AppState {
    let (state, effects) = update(AppState::new(), Msg::PageLoaded(Route::Root));
    assert_eq!(effects, vec![Effect::FetchStrategies]);
    let (state, effects) = update(state, Msg::StrategiesLoaded(Ok(summaries())));
    assert!(effects.is_empty());
    state
}

fn select(state: AppState, filename: &str, strategy: Strategy) -> AppState {
    let (state, effects) = update(state, Msg::StrategySelected(filename.to_string()));
    assert_eq!(
        effects,
        vec![Effect::FetchStrategy {
            filename: filename.to_string()
        }]
    );
    let (state, _) = update(
        state,
        Msg::StrategyLoaded {
            filename: filename.to_string(),
            result: Ok(strategy),
        },
    );
    state
}

#[test]
fn root_page_lists_strategies() {
    init_logging();
    let mut state = loaded_root();
    let view = state.view();

    assert_eq!(view.strategies.len(), 2);
    assert_eq!(view.strategies[1].name, "Card A");
    assert!(view.strategies.iter().all(|option| !option.selected));
    assert_eq!(view.details, StrategyDetailsView::placeholder());
    assert!(state.consume_dirty());
}

#[test]
fn selecting_shows_fields_read_only_with_none_sentinel() {
    init_logging();
    let state = select(loaded_root(), "minimal.json", minimal());
    let view = state.view();

    assert_eq!(view.details.name, "minimal");
    assert_eq!(view.details.abstraction_level, "high");
    assert_eq!(view.details.role, "front-end engineer");
    assert_eq!(view.details.format, "single HTML snippet");
    assert_eq!(view.details.additional_requirements, NONE_SENTINEL);
    assert!(view.strategies[0].selected);
    // Filename is filled in from the selector when the backend omits it.
    assert_eq!(
        state.selected_strategy().map(|s| s.filename.as_str()),
        Some("minimal.json")
    );
}

#[test]
fn deselecting_restores_initial_placeholders() {
    init_logging();
    let initial = loaded_root().view();
    let state = select(loaded_root(), "minimal.json", minimal());
    let (state, effects) = update(state, Msg::StrategySelected(String::new()));

    assert!(effects.is_empty());
    assert!(state.selected_strategy().is_none());
    let view = state.view();
    assert_eq!(view.details, initial.details);
    assert_eq!(view.strategies, initial.strategies);
}

#[test]
fn failed_detail_fetch_keeps_prior_selection() {
    init_logging();
    let state = select(loaded_root(), "minimal.json", minimal());
    let before = state.view().details;

    let (state, _) = update(state, Msg::StrategySelected("card_a.json".into()));
    let (mut state, effects) = update(
        state,
        Msg::StrategyLoaded {
            filename: "card_a.json".into(),
            result: Err(RequestFailure::Transport("connection refused".into())),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.take_notices(), vec![NOTICE_STRATEGY_FAILED.to_string()]);
    let view = state.view();
    assert_eq!(view.details, before);
    assert!(view.strategies[0].selected);
    assert!(!view.strategies[1].selected);
}

#[test]
fn late_detail_response_for_old_selection_is_ignored() {
    init_logging();
    let state = loaded_root();
    let (state, _) = update(state, Msg::StrategySelected("minimal.json".into()));
    let (state, _) = update(state, Msg::StrategySelected("card_a.json".into()));
    let (state, _) = update(
        state,
        Msg::StrategyLoaded {
            filename: "minimal.json".into(),
            result: Ok(minimal()),
        },
    );

    assert!(state.selected_strategy().is_none());
    assert_eq!(state.view().details, StrategyDetailsView::placeholder());
}

#[test]
fn failed_list_load_notifies_and_keeps_state() {
    init_logging();
    let state = loaded_root();
    let before = state.view().strategies;
    let (mut state, effects) = update(
        state,
        Msg::StrategiesLoaded(Err(RequestFailure::Transport("timeout".into()))),
    );

    assert!(effects.is_empty());
    assert_eq!(state.take_notices(), vec![NOTICE_STRATEGIES_FAILED.to_string()]);
    assert_eq!(state.view().strategies, before);
}

#[test]
fn edit_and_new_navigate_to_editor() {
    init_logging();
    let (mut state, effects) = update(loaded_root(), Msg::EditStrategyClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.take_notices(),
        vec!["Please select a prompt strategy first".to_string()]
    );

    let state = select(state, "minimal.json", minimal());
    let (state, effects) = update(state, Msg::EditStrategyClicked);
    assert_eq!(
        effects,
        vec![Effect::Navigate(Route::StrategyEditor {
            filename: Some("minimal.json".into())
        })]
    );

    let (_state, effects) = update(state, Msg::NewStrategyClicked);
    assert_eq!(
        effects,
        vec![Effect::Navigate(Route::StrategyEditor { filename: None })]
    );
}

use std::sync::Once;

use pretty_assertions::assert_eq;
use uiforge_core::{
    update, AppState, EditorField, Effect, Msg, Page, RequestFailure, Route, SaveReceipt,
    Strategy, StrategyDraft, NOTICE_STRATEGY_SAVED,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn new_editor() -> AppState {
    let (state, effects) = update(
        AppState::new(),
        Msg::PageLoaded(Route::parse("/strategy-editor")),
    );
    assert!(effects.is_empty());
    assert_eq!(state.page(), Page::StrategyEditor);
    state
}

fn set(state: AppState, field: EditorField, value: &str) -> AppState {
    update(
        state,
        Msg::EditorFieldChanged {
            field,
            value: value.to_string(),
        },
    )
    .0
}

#[test]
fn empty_name_never_saves() {
    init_logging();
    let state = set(new_editor(), EditorField::Role, "designer");
    let (mut state, effects) = update(state, Msg::SaveStrategyClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.take_notices(),
        vec!["Strategy name must not be empty".to_string()]
    );
}

#[test]
fn blank_fields_are_sent_as_empty_strings() {
    init_logging();
    let state = set(new_editor(), EditorField::Name, "Card A");
    let (_state, effects) = update(state, Msg::SaveStrategyClicked);

    let expected = StrategyDraft {
        name: "Card A".into(),
        ..StrategyDraft::default()
    };
    assert_eq!(effects, vec![Effect::SaveStrategy { draft: expected.clone() }]);

    let body = serde_json::to_value(&expected).unwrap();
    assert_eq!(body["additional_requirements"], serde_json::json!(""));
    assert_eq!(body.as_object().map(|o| o.len()), Some(6));
}

#[test]
fn editing_loads_existing_strategy_into_the_form() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PageLoaded(Route::parse("/strategy-editor?filename=card_a.json")),
    );
    assert_eq!(
        effects,
        vec![Effect::FetchStrategy {
            filename: "card_a.json".into()
        }]
    );

    let (state, _) = update(
        state,
        Msg::StrategyLoaded {
            filename: "card_a.json".into(),
            result: Ok(Strategy {
                name: "Card A".into(),
                role: "designer".into(),
                prompt_prefix: "Create: ".into(),
                ..Strategy::default()
            }),
        },
    );
    let view = state.view();
    assert_eq!(view.editing.as_deref(), Some("card_a.json"));
    assert_eq!(view.editor.name, "Card A");
    assert_eq!(view.editor.prompt_prefix, "Create: ");
    assert_eq!(view.editor.additional_requirements, "");
}

#[test]
fn save_success_notifies_and_returns_home() {
    init_logging();
    let state = set(new_editor(), EditorField::Name, "Card A");
    let (state, _) = update(state, Msg::SaveStrategyClicked);
    let (mut state, effects) = update(
        state,
        Msg::StrategySaved(Ok(SaveReceipt {
            filename: Some("card_a.json".into()),
        })),
    );

    assert_eq!(effects, vec![Effect::Navigate(Route::Root)]);
    assert_eq!(state.take_notices(), vec![NOTICE_STRATEGY_SAVED.to_string()]);
}

#[test]
fn save_failure_stays_on_the_editor() {
    init_logging();
    let state = set(new_editor(), EditorField::Name, "Card A");
    let (mut state, effects) = update(
        state,
        Msg::StrategySaved(Err(RequestFailure::Server("disk full".into()))),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.take_notices(),
        vec!["Failed to save strategy: disk full".to_string()]
    );
    assert_eq!(state.view().editor.name, "Card A");
}

#[test]
fn cancel_returns_home() {
    init_logging();
    let (_state, effects) = update(new_editor(), Msg::CancelClicked);
    assert_eq!(effects, vec![Effect::Navigate(Route::Root)]);
}

use std::sync::Once;

use pretty_assertions::assert_eq;
use uiforge_core::{
    update, AppState, Effect, GenerationRequest, GenerationResult, Msg, PreviewContent,
    RequestFailure, Route, Strategy, StrategySummary, NOTICE_NOTHING_TO_PREVIEW,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn strategy() -> Strategy {
    Strategy {
        filename: "minimal.json".into(),
        name: "minimal".into(),
        role: "designer".into(),
        ..Strategy::default()
    }
}

fn with_strategy() -> AppState {
    let (state, _) = update(AppState::new(), Msg::PageLoaded(Route::Root));
    let (state, _) = update(
        state,
        Msg::StrategiesLoaded(Ok(vec![StrategySummary {
            filename: "minimal.json".into(),
            name: "minimal".into(),
        }])),
    );
    let (state, _) = update(state, Msg::StrategySelected("minimal.json".into()));
    let (state, _) = update(
        state,
        Msg::StrategyLoaded {
            filename: "minimal.json".into(),
            result: Ok(strategy()),
        },
    );
    state
}

fn generate(state: AppState, description: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::DescriptionChanged(description.to_string()));
    update(state, Msg::GenerateClicked)
}

fn success(html: &str) -> Result<GenerationResult, RequestFailure> {
    Ok(GenerationResult {
        html: html.to_string(),
        history_id: Some("h-1".into()),
    })
}

#[test]
fn blank_description_never_issues_a_request() {
    init_logging();
    for description in ["", "   ", "\n\t  \n"] {
        let (mut state, effects) = generate(with_strategy(), description);
        assert!(effects.is_empty());
        assert_eq!(
            state.take_notices(),
            vec!["Please enter a component description".to_string()]
        );
        assert_eq!(state.preview(), &PreviewContent::EmptyState);
        assert_eq!(state.in_flight(), None);
    }
}

#[test]
fn missing_strategy_never_issues_a_request() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::PageLoaded(Route::Root));
    let (mut state, effects) = generate(state, "login form");

    assert!(effects.is_empty());
    assert_eq!(
        state.take_notices(),
        vec!["Please select a prompt strategy first".to_string()]
    );
    assert_eq!(state.preview(), &PreviewContent::EmptyState);
}

#[test]
fn in_progress_is_shown_before_the_request_resolves() {
    init_logging();
    let (state, effects) = generate(with_strategy(), "  login form  ");

    let expected = GenerationRequest::new("login form", Some(&strategy())).unwrap();
    assert_eq!(
        effects,
        vec![Effect::Generate {
            request_id: 1,
            request: expected,
        }]
    );
    let view = state.view();
    assert_eq!(view.preview, PreviewContent::InProgress);
    assert!(view.generating);
    assert!(!view.preview_enabled);

    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: success("<div>X</div>"),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RenderFragment {
            html: "<div>X</div>".into()
        }]
    );
    let view = state.view();
    assert_eq!(view.preview, PreviewContent::Fragment("<div>X</div>".into()));
    assert!(view.preview_enabled);
    assert!(!view.generating);
}

#[test]
fn failure_shows_error_and_keeps_preview_disabled() {
    init_logging();
    let (state, _) = generate(with_strategy(), "login form");
    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Err(RequestFailure::Server("description must not be empty".into())),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(
        view.preview,
        PreviewContent::Error("description must not be empty".into())
    );
    assert!(!view.preview_enabled);
}

#[test]
fn failure_after_success_disables_preview_again() {
    init_logging();
    let (state, _) = generate(with_strategy(), "login form");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: success("<p>ok</p>"),
        },
    );
    assert!(state.view().preview_enabled);

    let (state, _) = update(state, Msg::GenerateClicked);
    assert!(!state.view().preview_enabled);
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 2,
            result: Err(RequestFailure::Transport("connection reset".into())),
        },
    );
    assert!(!state.view().preview_enabled);
}

#[test]
fn stale_generation_response_is_discarded() {
    init_logging();
    let (state, first) = generate(with_strategy(), "login form");
    let (state, second) = update(state, Msg::GenerateClicked);
    assert!(matches!(first.as_slice(), [Effect::Generate { request_id: 1, .. }]));
    assert!(matches!(second.as_slice(), [Effect::Generate { request_id: 2, .. }]));

    // The newer request resolves first and wins.
    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 2,
            result: success("<p>second</p>"),
        },
    );
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: success("<p>first</p>"),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.preview(),
        &PreviewContent::Fragment("<p>second</p>".into())
    );
}

#[test]
fn preview_opens_only_a_mounted_fragment() {
    init_logging();
    let (mut state, effects) = update(with_strategy(), Msg::PreviewClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.take_notices(),
        vec![NOTICE_NOTHING_TO_PREVIEW.to_string()]
    );

    let (state, _) = generate(state, "card");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: success("<div class=\"card\"></div>"),
        },
    );
    let (_state, effects) = update(state, Msg::PreviewClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenPreview {
            html: "<div class=\"card\"></div>".into()
        }]
    );
}

#[test]
fn blank_fragment_keeps_preview_disabled() {
    init_logging();
    let (state, _) = generate(with_strategy(), "card");
    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: success("   \n"),
        },
    );
    assert_eq!(effects, vec![Effect::RenderFragment { html: "   \n".into() }]);
    assert!(!state.view().preview_enabled);

    let (mut state, effects) = update(state, Msg::PreviewClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.take_notices(),
        vec![NOTICE_NOTHING_TO_PREVIEW.to_string()]
    );
}

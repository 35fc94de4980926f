use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{
    AppState, Effect, GenerationRequest, Msg, Page, PreviewContent, RequestFailure, Route,
    StrategyDraft, ValidationError,
};

pub const NOTICE_STRATEGIES_FAILED: &str = "Failed to load strategies, check the network connection";
pub const NOTICE_STRATEGY_FAILED: &str = "Failed to load strategy details";
pub const NOTICE_HISTORY_EMPTY: &str = "No history yet";
pub const NOTICE_HISTORY_FAILED: &str = "Failed to load history";
pub const NOTICE_NOTHING_TO_PREVIEW: &str = "No component to preview";
pub const NOTICE_MISSING_HISTORY_ID: &str = "No history record id given";
pub const NOTICE_STRATEGY_SAVED: &str = "Strategy saved";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded(route) => load_page(&mut state, route),
        Msg::StrategiesLoaded(result) => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            match result {
                Ok(strategies) => state.set_strategies(strategies),
                Err(err) => {
                    engine_warn!("Strategy list failed: {}", err);
                    state.notify(NOTICE_STRATEGIES_FAILED);
                }
            }
            Vec::new()
        }
        Msg::StrategySelected(filename) => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            let filename = filename.trim().to_string();
            if filename.is_empty() {
                state.deselect();
                Vec::new()
            } else {
                state.begin_selection(filename.clone());
                vec![Effect::FetchStrategy { filename }]
            }
        }
        Msg::StrategyLoaded { filename, result } => {
            on_strategy_loaded(&mut state, filename, result);
            Vec::new()
        }
        Msg::DescriptionChanged(text) => {
            if state.page() == Page::Generator {
                state.set_description(text);
            }
            Vec::new()
        }
        Msg::GenerateClicked => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            match GenerationRequest::new(state.description(), state.selected_strategy()) {
                Ok(request) => {
                    let request_id = state.begin_generation();
                    engine_info!(
                        "Generation #{} requested with strategy {:?}",
                        request_id,
                        request.strategy().filename
                    );
                    vec![Effect::Generate {
                        request_id,
                        request,
                    }]
                }
                Err(err) => {
                    state.notify(err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::GenerationFinished { request_id, result } => {
            if state.page() != Page::Generator || state.in_flight() != Some(request_id) {
                engine_debug!("Discarding stale generation response #{}", request_id);
                return (state, Vec::new());
            }
            state.finish_generation();
            match result {
                Ok(generated) => {
                    if let Some(history_id) = generated.history_id.as_deref() {
                        engine_info!("Generation #{} stored as history {}", request_id, history_id);
                    }
                    state.set_preview(PreviewContent::Fragment(generated.html.clone()));
                    vec![Effect::RenderFragment {
                        html: generated.html,
                    }]
                }
                Err(err) => {
                    engine_warn!("Generation #{} failed: {}", request_id, err);
                    state.set_preview(PreviewContent::Error(err.message().to_string()));
                    Vec::new()
                }
            }
        }
        Msg::PreviewClicked => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            match state.preview() {
                PreviewContent::Fragment(html) if state.preview().is_previewable() => {
                    vec![Effect::OpenPreview { html: html.clone() }]
                }
                _ => {
                    state.notify(NOTICE_NOTHING_TO_PREVIEW);
                    Vec::new()
                }
            }
        }
        Msg::NewStrategyClicked => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            vec![Effect::Navigate(Route::StrategyEditor { filename: None })]
        }
        Msg::EditStrategyClicked => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            match state.selected_strategy() {
                Some(strategy) => vec![Effect::Navigate(Route::StrategyEditor {
                    filename: Some(strategy.filename.clone()),
                })],
                None => {
                    state.notify(ValidationError::MissingStrategy.to_string());
                    Vec::new()
                }
            }
        }
        Msg::HistoryClicked => {
            if state.page() == Page::Generator {
                vec![Effect::FetchHistory]
            } else {
                Vec::new()
            }
        }
        Msg::HistoryLoaded(result) => {
            if state.page() != Page::Generator {
                return (state, Vec::new());
            }
            match result {
                Ok(entries) if entries.is_empty() => state.notify(NOTICE_HISTORY_EMPTY),
                Ok(entries) => state.set_preview(PreviewContent::History(entries)),
                Err(err) => {
                    engine_warn!("History list failed: {}", err);
                    state.notify(format!("{NOTICE_HISTORY_FAILED}: {err}"));
                }
            }
            Vec::new()
        }
        Msg::HistoryEntryChosen(id) => match state.preview() {
            PreviewContent::History(entries) if entries.iter().any(|entry| entry.id == id) => {
                vec![Effect::Navigate(Route::ResultView {
                    history_id: Some(id),
                })]
            }
            _ => {
                engine_debug!("Ignoring history entry {} outside the history list", id);
                Vec::new()
            }
        },
        Msg::HistoryClosed => {
            if matches!(state.preview(), PreviewContent::History(_)) {
                state.set_preview(PreviewContent::EmptyState);
            }
            Vec::new()
        }
        Msg::HistoryItemLoaded { id, result } => {
            if state.page() != Page::ResultView || state.viewing() != Some(id.as_str()) {
                engine_debug!("Ignoring history record {} loaded for another view", id);
                return (state, Vec::new());
            }
            match result {
                Ok(entry) => {
                    state.set_replay_labels(entry.description, entry.strategy);
                    state.set_preview(PreviewContent::Fragment(entry.html.clone()));
                    vec![Effect::RenderFragment { html: entry.html }]
                }
                Err(err) => {
                    engine_warn!("History record {} failed to load: {}", id, err);
                    state.set_replay_labels(String::new(), String::new());
                    state.set_preview(PreviewContent::Error(err.message().to_string()));
                    Vec::new()
                }
            }
        }
        Msg::BackClicked => {
            if state.page() == Page::ResultView {
                vec![Effect::Navigate(Route::Root)]
            } else {
                Vec::new()
            }
        }
        Msg::EditorFieldChanged { field, value } => {
            if state.page() == Page::StrategyEditor {
                state.editor_mut().set(field, value);
            }
            Vec::new()
        }
        Msg::SaveStrategyClicked => {
            if state.page() != Page::StrategyEditor {
                return (state, Vec::new());
            }
            let draft = state.editor().clone();
            match draft.validate() {
                Ok(()) => vec![Effect::SaveStrategy { draft }],
                Err(err) => {
                    state.notify(err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::StrategySaved(result) => {
            if state.page() != Page::StrategyEditor {
                return (state, Vec::new());
            }
            match result {
                Ok(receipt) => {
                    engine_info!("Strategy saved as {:?}", receipt.filename);
                    state.notify(NOTICE_STRATEGY_SAVED);
                    vec![Effect::Navigate(Route::Root)]
                }
                Err(err) => {
                    state.notify(format!("Failed to save strategy: {err}"));
                    Vec::new()
                }
            }
        }
        Msg::CancelClicked => {
            if state.page() == Page::StrategyEditor {
                vec![Effect::Navigate(Route::Root)]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load_page(state: &mut AppState, route: Route) -> Vec<Effect> {
    match route {
        Route::Root => {
            state.enter_page(Page::Generator);
            vec![Effect::FetchStrategies]
        }
        Route::StrategyEditor { filename } => {
            state.enter_page(Page::StrategyEditor);
            state.set_editing(filename.clone());
            filename
                .map(|filename| vec![Effect::FetchStrategy { filename }])
                .unwrap_or_default()
        }
        Route::ResultView { history_id: None } => {
            // Entered without state: bounce to the root page before any fetch.
            state.enter_page(Page::ResultView);
            state.notify(NOTICE_MISSING_HISTORY_ID);
            vec![Effect::Navigate(Route::Root)]
        }
        Route::ResultView {
            history_id: Some(id),
        } => {
            state.enter_page(Page::ResultView);
            state.set_viewing(id.clone());
            vec![Effect::FetchHistoryItem { id }]
        }
    }
}

fn on_strategy_loaded(
    state: &mut AppState,
    filename: String,
    result: Result<crate::Strategy, RequestFailure>,
) {
    match state.page() {
        Page::Generator => {
            if state.selection() != Some(filename.as_str()) {
                engine_debug!("Ignoring strategy {} loaded after selection moved on", filename);
                return;
            }
            match result {
                Ok(mut strategy) => {
                    if strategy.filename.is_empty() {
                        strategy.filename = filename;
                    }
                    state.select(strategy);
                }
                Err(err) => {
                    engine_warn!("Strategy {} failed to load: {}", filename, err);
                    state.revert_selection();
                    state.notify(NOTICE_STRATEGY_FAILED);
                }
            }
        }
        Page::StrategyEditor => {
            if state.editing() != Some(filename.as_str()) {
                return;
            }
            match result {
                Ok(strategy) => *state.editor_mut() = StrategyDraft::from_strategy(&strategy),
                Err(err) => state.notify(format!("Failed to load strategy: {err}")),
            }
        }
        Page::ResultView => {}
    }
}

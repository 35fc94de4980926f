use engine_logging::{engine_debug, engine_info};
use uiforge_core::{update, AppState, AppViewModel, Effect, Msg, Route};
use uiforge_engine::{Epoch, LiveDocument, ScriptHost};

use super::ui::render::placeholder_markup;

/// Owns the state of the loaded page and its live document.
///
/// Rendering and navigation are handled here; every other effect is handed
/// back to the caller to run against the backend under [`Controller::epoch`].
/// Each navigation starts a new epoch, and completions from an older one
/// never reach the state.
pub struct Controller<H: ScriptHost> {
    state: AppState,
    document: LiveDocument<H>,
    route: Route,
    epoch: Epoch,
    notices: Vec<String>,
}

impl<H: ScriptHost> Controller<H> {
    pub fn new(host: H) -> Self {
        Self {
            state: AppState::new(),
            document: LiveDocument::new(host),
            route: Route::Root,
            epoch: 0,
            notices: Vec::new(),
        }
    }

    /// Loads `route` as a fresh page.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        engine_info!("Navigating to {}", route);
        self.epoch += 1;
        self.state = AppState::new();
        self.document.reset();
        self.route = route.clone();
        self.dispatch(Msg::PageLoaded(route))
    }

    /// Feeds a backend completion issued under `epoch`; one from a page
    /// that has since been left is dropped.
    pub fn deliver(&mut self, epoch: Epoch, msg: Msg) -> Vec<Effect> {
        if epoch != self.epoch {
            engine_debug!(
                "Dropping completion from epoch {} (now {})",
                epoch,
                self.epoch
            );
            return Vec::new();
        }
        self.dispatch(msg)
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.notices.extend(self.state.take_notices());
        if let Some(markup) = placeholder_markup(self.state.preview()) {
            self.document.show_placeholder(markup);
        }

        let mut pending = Vec::new();
        for effect in effects {
            match effect {
                Effect::RenderFragment { html } => {
                    let report = self.document.render(&html);
                    engine_debug!(
                        "Fragment mounted with {} scripts ({} failed)",
                        report.materialized,
                        report.failed
                    );
                }
                // What the surface holds now, not the fragment as received.
                Effect::OpenPreview { .. } => pending.push(Effect::OpenPreview {
                    html: self.document.surface().markup().to_string(),
                }),
                // Calls queued for the page being left would carry the new
                // epoch, so they go.
                Effect::Navigate(route) => pending = self.navigate(route),
                other => pending.push(other),
            }
        }
        pending
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Notices raised since the last call, including ones raised just
    /// before a navigation.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn document(&self) -> &LiveDocument<H> {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut LiveDocument<H> {
        &mut self.document
    }
}

use crate::view_model::{
    AppViewModel, ReplayLabelsView, StrategyDetailsView, StrategyOptionView,
};
use crate::{HistoryEntrySummary, RequestId, Strategy, StrategyDraft, StrategySummary};

/// Which of the three client pages is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Generator,
    StrategyEditor,
    ResultView,
}

/// What the shared preview surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewContent {
    /// The "generated component appears here" marker.
    #[default]
    EmptyState,
    /// Generation request outstanding.
    InProgress,
    Error(String),
    /// A mounted generated fragment (live or replayed).
    Fragment(String),
    /// The descriptive history list; never goes through the renderer.
    History(Vec<HistoryEntrySummary>),
}

impl PreviewContent {
    /// Only a mounted fragment with visible content can be opened as a
    /// standalone preview.
    pub fn is_previewable(&self) -> bool {
        matches!(self, PreviewContent::Fragment(html) if !html.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: Page,
    strategies: Vec<StrategySummary>,
    /// Filename picked in the selector, possibly still loading.
    selection: Option<String>,
    selected: Option<Strategy>,
    description: String,
    preview: PreviewContent,
    last_request_id: RequestId,
    in_flight: Option<RequestId>,
    /// History record this result view was opened for.
    viewing: Option<String>,
    replay: ReplayLabelsView,
    editing: Option<String>,
    editor: StrategyDraft,
    notices: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page: self.page,
            strategies: self
                .strategies
                .iter()
                .map(|summary| StrategyOptionView {
                    filename: summary.filename.clone(),
                    name: summary.name.clone(),
                    selected: self.selection.as_deref() == Some(summary.filename.as_str()),
                })
                .collect(),
            details: self
                .selected
                .as_ref()
                .map(StrategyDetailsView::from_strategy)
                .unwrap_or_else(StrategyDetailsView::placeholder),
            description: self.description.clone(),
            preview_enabled: self.preview.is_previewable(),
            preview: self.preview.clone(),
            generating: self.in_flight.is_some(),
            replay: self.replay.clone(),
            editing: self.editing.clone(),
            editor: self.editor.clone(),
            dirty: self.dirty,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn preview(&self) -> &PreviewContent {
        &self.preview
    }

    pub fn selected_strategy(&self) -> Option<&Strategy> {
        self.selected.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drains the blocking user notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
        self.dirty = true;
    }

    pub(crate) fn enter_page(&mut self, page: Page) {
        self.page = page;
        self.mark_dirty();
    }

    pub(crate) fn set_strategies(&mut self, strategies: Vec<StrategySummary>) {
        self.strategies = strategies;
        self.mark_dirty();
    }

    pub(crate) fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub(crate) fn begin_selection(&mut self, filename: String) {
        self.selection = Some(filename);
        self.mark_dirty();
    }

    /// Puts the selector back on whatever strategy is actually held.
    pub(crate) fn revert_selection(&mut self) {
        self.selection = self.selected.as_ref().map(|s| s.filename.clone());
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, strategy: Strategy) {
        self.selection = Some(strategy.filename.clone());
        self.selected = Some(strategy);
        self.mark_dirty();
    }

    pub(crate) fn deselect(&mut self) {
        self.selection = None;
        self.selected = None;
        self.mark_dirty();
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
        self.mark_dirty();
    }

    pub(crate) fn set_preview(&mut self, preview: PreviewContent) {
        self.preview = preview;
        self.mark_dirty();
    }

    /// Starts a generation: the in-progress marker goes up before the
    /// request exists anywhere else.
    pub(crate) fn begin_generation(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.in_flight = Some(self.last_request_id);
        self.set_preview(PreviewContent::InProgress);
        self.last_request_id
    }

    pub(crate) fn finish_generation(&mut self) {
        self.in_flight = None;
        self.mark_dirty();
    }

    pub(crate) fn viewing(&self) -> Option<&str> {
        self.viewing.as_deref()
    }

    pub(crate) fn set_viewing(&mut self, history_id: String) {
        self.viewing = Some(history_id);
    }

    pub(crate) fn set_replay_labels(&mut self, description: String, strategy: String) {
        self.replay = ReplayLabelsView {
            description,
            strategy,
        };
        self.mark_dirty();
    }

    pub(crate) fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub(crate) fn set_editing(&mut self, filename: Option<String>) {
        self.editing = filename;
        self.mark_dirty();
    }

    pub(crate) fn editor(&self) -> &StrategyDraft {
        &self.editor
    }

    pub(crate) fn editor_mut(&mut self) -> &mut StrategyDraft {
        self.mark_dirty();
        &mut self.editor
    }
}

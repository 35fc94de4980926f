//! UI Forge core: pure state machine, domain types and view-model helpers.
mod domain;
mod effect;
mod error;
mod msg;
mod route;
mod state;
mod update;
mod view_model;

pub use domain::{
    EditorField, GenerationRequest, GenerationResult, HistoryEntry, HistoryEntrySummary,
    RequestId, SaveReceipt, Strategy, StrategyDraft, StrategySummary,
};
pub use effect::Effect;
pub use error::{RequestFailure, ValidationError};
pub use msg::Msg;
pub use route::{Route, RESULT_VIEW_PATH, ROOT_PATH, STRATEGY_EDITOR_PATH};
pub use state::{AppState, Page, PreviewContent};
pub use update::{
    update, NOTICE_HISTORY_EMPTY, NOTICE_HISTORY_FAILED, NOTICE_MISSING_HISTORY_ID,
    NOTICE_NOTHING_TO_PREVIEW, NOTICE_STRATEGIES_FAILED, NOTICE_STRATEGY_FAILED,
    NOTICE_STRATEGY_SAVED,
};
pub use view_model::{
    AppViewModel, ReplayLabelsView, StrategyDetailsView, StrategyOptionView, FIELD_PLACEHOLDER,
    NAME_PLACEHOLDER, NONE_SENTINEL,
};

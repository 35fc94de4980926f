use crate::{GenerationRequest, RequestId, Route, StrategyDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchStrategies,
    FetchStrategy {
        filename: String,
    },
    Generate {
        request_id: RequestId,
        request: GenerationRequest,
    },
    /// Mount `html` on the preview surface and run its inline scripts.
    RenderFragment {
        html: String,
    },
    FetchHistory,
    FetchHistoryItem {
        id: String,
    },
    SaveStrategy {
        draft: StrategyDraft,
    },
    /// Open the current fragment as a standalone page.
    OpenPreview {
        html: String,
    },
    /// Full page navigation; nothing in the current state survives it.
    Navigate(Route),
}

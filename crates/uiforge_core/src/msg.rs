use crate::{
    EditorField, GenerationResult, HistoryEntry, HistoryEntrySummary, RequestFailure, RequestId,
    Route, SaveReceipt, Strategy, StrategySummary,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A page finished loading; state is fresh at this point.
    PageLoaded(Route),

    // Generator page: strategy selector.
    StrategiesLoaded(Result<Vec<StrategySummary>, RequestFailure>),
    /// User picked an entry in the selector; empty means deselect.
    StrategySelected(String),
    /// Backend answer for `GET /strategies/{filename}` (selector or editor).
    StrategyLoaded {
        filename: String,
        result: Result<Strategy, RequestFailure>,
    },

    // Generator page: orchestration.
    DescriptionChanged(String),
    GenerateClicked,
    GenerationFinished {
        request_id: RequestId,
        result: Result<GenerationResult, RequestFailure>,
    },
    PreviewClicked,
    NewStrategyClicked,
    EditStrategyClicked,

    // Generator page: history list.
    HistoryClicked,
    HistoryLoaded(Result<Vec<HistoryEntrySummary>, RequestFailure>),
    HistoryEntryChosen(String),
    HistoryClosed,

    // Result view page.
    HistoryItemLoaded {
        id: String,
        result: Result<HistoryEntry, RequestFailure>,
    },
    BackClicked,

    // Strategy editor page.
    EditorFieldChanged {
        field: EditorField,
        value: String,
    },
    SaveStrategyClicked,
    StrategySaved(Result<SaveReceipt, RequestFailure>),
    CancelClicked,

    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

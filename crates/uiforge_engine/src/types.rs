use std::fmt;

use uiforge_core::{
    GenerationRequest, GenerationResult, HistoryEntry, HistoryEntrySummary, RequestFailure,
    RequestId, SaveReceipt, Strategy, StrategyDraft, StrategySummary,
};

/// Page generation a call was issued under. The engine hands it back with
/// the completion untouched.
pub type Epoch = u64;

/// One backend call, as submitted to the [`crate::EngineHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListStrategies,
    GetStrategy { filename: String },
    SaveStrategy { draft: StrategyDraft },
    Generate {
        request_id: RequestId,
        request: GenerationRequest,
    },
    ListHistory,
    GetHistoryItem { id: String },
}

/// Completion of an [`ApiCall`], tagged with whatever the caller needs to
/// match it back up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    StrategiesListed(Result<Vec<StrategySummary>, ApiError>),
    StrategyFetched {
        filename: String,
        result: Result<Strategy, ApiError>,
    },
    StrategySaved(Result<SaveReceipt, ApiError>),
    Generated {
        request_id: RequestId,
        result: Result<GenerationResult, ApiError>,
    },
    HistoryListed(Result<Vec<HistoryEntrySummary>, ApiError>),
    HistoryItemFetched {
        id: String,
        result: Result<HistoryEntry, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Collapses the transport details into the two user-facing kinds.
    pub fn into_failure(self) -> RequestFailure {
        match self.kind {
            FailureKind::Server => RequestFailure::Server(self.message),
            _ => RequestFailure::Transport(self.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body was not the JSON shape the endpoint promises.
    Malformed,
    /// Body carried an `error` field.
    Server,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Malformed => write!(f, "malformed response"),
            FailureKind::Server => write!(f, "server error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_keep_the_backend_message() {
        let err = ApiError::new(FailureKind::Server, "history record not found");
        assert_eq!(
            err.into_failure(),
            RequestFailure::Server("history record not found".into())
        );
    }

    #[test]
    fn transport_errors_carry_the_kind() {
        let err = ApiError::new(FailureKind::HttpStatus(502), "502 Bad Gateway");
        assert_eq!(
            err.into_failure(),
            RequestFailure::Transport("http status 502: 502 Bad Gateway".into())
        );
    }
}

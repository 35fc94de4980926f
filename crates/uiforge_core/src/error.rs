/// Precondition failures detected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a component description")]
    MissingDescription,
    #[error("Please select a prompt strategy first")]
    MissingStrategy,
    #[error("Strategy name must not be empty")]
    MissingStrategyName,
}

/// A backend call that did not produce a usable response.
///
/// Both kinds are surfaced the same way; the split is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestFailure {
    /// Network failure, unexpected status or malformed body.
    #[error("{0}")]
    Transport(String),
    /// The backend answered with an `error` field.
    #[error("{0}")]
    Server(String),
}

impl RequestFailure {
    pub fn message(&self) -> &str {
        match self {
            RequestFailure::Transport(message) | RequestFailure::Server(message) => message,
        }
    }
}

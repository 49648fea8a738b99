use std::time::Duration;

/// Fault raised by an action executor while handling a request.
///
/// This is distinct from an executor *returning* a failed or error
/// [`ExecutionOutcome`](crate::ExecutionOutcome): a fault means the executor
/// could not produce an outcome at all. Messages may carry implementation
/// detail and must not be surfaced to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ActionExecutionError {
    /// The executor failed for an internal reason.
    #[error("execution: {0}")]
    Execution(String),

    /// The external handler answered with a response that could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The external handler did not answer in time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The transport to the external handler failed.
    #[error("transport: {0}")]
    Transport(String),
}

impl ActionExecutionError {
    /// Create an internal execution error.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a response-decoding error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// A string did not name a known [`ActionType`](crate::ActionType).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action type `{0}`")]
pub struct ParseActionTypeError(pub String);

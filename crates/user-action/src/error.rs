//! Faults returned to the lifecycle framework

use std::fmt;

use thiserror::Error;

/// Generic message for credentials in an unsupported representation.
pub const UNSUPPORTED_SECRET_MESSAGE: &str = "Credential is not in the expected format.";

/// Generic message for executor invocation faults.
pub const SERVER_ERROR_MESSAGE: &str = "Error while executing pre update password action.";

/// Who is at fault for a blocked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request itself was rejected.
    Client,
    /// The system could not evaluate the request.
    Server,
}

impl ErrorCategory {
    /// Stable category identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Server => "SERVER",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable codes for operations blocked by an action.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserActionErrorCode {
    /// The credential was not in a supported representation.
    UnsupportedSecret,
    /// The executor rejected the operation on a business rule.
    ExecutionFailed,
    /// The executor reported a system error.
    ExecutionError,
    /// The executor could not be invoked.
    ServerError,
}

impl UserActionErrorCode {
    /// Stable code string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedSecret => "UNSUPPORTED_SECRET",
            Self::ExecutionFailed => "EXECUTION_FAILED",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::ServerError => "SERVER_ERROR",
        }
    }

    /// The category every fault with this code belongs to.
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::UnsupportedSecret | Self::ExecutionFailed => ErrorCategory::Client,
            Self::ExecutionError | Self::ServerError => ErrorCategory::Server,
        }
    }
}

impl fmt::Display for UserActionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fault that blocks the intercepted user operation.
///
/// Client faults carry text meant for the caller; server faults from
/// invocation problems carry only a generic message. Construct them through
/// the named constructors so the code always matches the variant.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserOperationError {
    /// The request was rejected.
    #[error("{message}")]
    Client {
        /// Error code.
        code: UserActionErrorCode,
        /// Message for the caller.
        message: String,
    },

    /// The request could not be evaluated.
    #[error("{message}")]
    Server {
        /// Error code.
        code: UserActionErrorCode,
        /// Message for the caller.
        message: String,
    },
}

impl UserOperationError {
    /// The credential is in an unsupported representation.
    pub fn unsupported_secret() -> Self {
        Self::Client {
            code: UserActionErrorCode::UnsupportedSecret,
            message: UNSUPPORTED_SECRET_MESSAGE.to_owned(),
        }
    }

    /// The executor rejected the operation.
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::Client {
            code: UserActionErrorCode::ExecutionFailed,
            message: message.into(),
        }
    }

    /// The executor reported a system error.
    pub fn execution_error(message: impl Into<String>) -> Self {
        Self::Server {
            code: UserActionErrorCode::ExecutionError,
            message: message.into(),
        }
    }

    /// The executor could not be invoked.
    pub fn server_error() -> Self {
        Self::Server {
            code: UserActionErrorCode::ServerError,
            message: SERVER_ERROR_MESSAGE.to_owned(),
        }
    }

    /// The error code.
    pub fn code(&self) -> UserActionErrorCode {
        match self {
            Self::Client { code, .. } | Self::Server { code, .. } => *code,
        }
    }

    /// The error code as a string, e.g. `EXECUTION_FAILED`.
    pub fn error_code(&self) -> &'static str {
        self.code().as_str()
    }

    /// The error category.
    pub fn error_category(&self) -> ErrorCategory {
        match self {
            Self::Client { .. } => ErrorCategory::Client,
            Self::Server { .. } => ErrorCategory::Server,
        }
    }

    /// Returns `true` for client faults.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    /// Returns `true` for server faults.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// The message meant for the caller.
    pub fn message(&self) -> &str {
        match self {
            Self::Client { message, .. } | Self::Server { message, .. } => message,
        }
    }
}

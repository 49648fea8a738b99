//! Mapping executor outcomes onto the lifecycle contract
//!
//! | Outcome   | Result                            |
//! |-----------|-----------------------------------|
//! | `Success` | `Ok(true)`                        |
//! | `Failed`  | client fault, `EXECUTION_FAILED`  |
//! | `Error`   | server fault, `EXECUTION_ERROR`   |
//! | `Unknown` | `Ok(false)`                       |

use tollgate_action::ExecutionOutcome;

use crate::error::UserOperationError;

const SEPARATOR: &str = ". ";

/// Join a primary message with an optional description.
///
/// A present description is appended verbatim, even when empty.
///
/// ```rust
/// use tollgate_user_action::join_message;
///
/// assert_eq!(join_message("Weak", Some("Add digits")), "Weak. Add digits");
/// assert_eq!(join_message("Weak", Some("")), "Weak. ");
/// assert_eq!(join_message("Weak", None), "Weak");
/// ```
pub fn join_message(primary: &str, description: Option<&str>) -> String {
    match description {
        Some(description) => format!("{primary}{SEPARATOR}{description}"),
        None => primary.to_owned(),
    }
}

/// Translate an executor outcome into proceed (`true`), block (`false`), or a fault.
pub fn reconcile(outcome: ExecutionOutcome) -> Result<bool, UserOperationError> {
    match outcome {
        ExecutionOutcome::Success { .. } => Ok(true),
        ExecutionOutcome::Failed {
            reason,
            description,
        } => Err(UserOperationError::execution_failed(join_message(
            &reason,
            description.as_deref(),
        ))),
        ExecutionOutcome::Error {
            message,
            description,
        } => Err(UserOperationError::execution_error(join_message(
            &message,
            description.as_deref(),
        ))),
        ExecutionOutcome::Unknown => Ok(false),
    }
}

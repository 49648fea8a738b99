use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ActionExecutionError;

/// Arbitrary data an executor hands back on success.
pub type ResponseContext = HashMap<String, serde_json::Value>;

/// Result of invoking an action executor.
///
/// The dispatch listener matches on this enum to decide whether the
/// intercepted operation proceeds:
/// - `Success` → proceed
/// - `Failed` → block with the handler's business reason (client fault)
/// - `Error` → block with the handler's error (server fault)
/// - `Unknown` → block without claiming a specific fault
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// The handler allowed the operation.
    Success {
        /// Data returned by the handler.
        response_context: ResponseContext,
    },

    /// The handler rejected the operation on a business rule.
    Failed {
        /// Short reason, shown to the client.
        reason: String,
        /// Optional elaboration of the reason.
        description: Option<String>,
    },

    /// The handler reported an internal or system error.
    Error {
        /// Short error message.
        message: String,
        /// Optional elaboration of the message.
        description: Option<String>,
    },

    /// Status tag was absent or unrecognized.
    Unknown,
}

/// Status tag of an [`ExecutionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStatus {
    /// See [`ExecutionOutcome::Success`].
    Success,
    /// See [`ExecutionOutcome::Failed`].
    Failed,
    /// See [`ExecutionOutcome::Error`].
    Error,
}

impl ActionStatus {
    /// Wire form of the status tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
        }
    }

    fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

// ── Convenience constructors ────────────────────────────────────────────────

impl ExecutionOutcome {
    /// Create a success outcome with an empty response context.
    pub fn success() -> Self {
        Self::Success {
            response_context: ResponseContext::new(),
        }
    }

    /// Create a success outcome carrying a response context.
    pub fn success_with_context(response_context: ResponseContext) -> Self {
        Self::Success { response_context }
    }

    /// Create a failed outcome without a description.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
            description: None,
        }
    }

    /// Create a failed outcome with a description.
    pub fn failed_with_description(
        reason: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::Failed {
            reason: reason.into(),
            description: Some(description.into()),
        }
    }

    /// Create an error outcome without a description.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            description: None,
        }
    }

    /// Create an error outcome with a description.
    pub fn error_with_description(
        message: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::Error {
            message: message.into(),
            description: Some(description.into()),
        }
    }

    /// The status tag, or `None` for [`ExecutionOutcome::Unknown`].
    pub fn status(&self) -> Option<ActionStatus> {
        match self {
            Self::Success { .. } => Some(ActionStatus::Success),
            Self::Failed { .. } => Some(ActionStatus::Failed),
            Self::Error { .. } => Some(ActionStatus::Error),
            Self::Unknown => None,
        }
    }

    /// Returns `true` if the handler allowed the operation.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Decode an external handler's JSON response.
    ///
    /// The response carries an `actionStatus` tag of `SUCCESS`, `FAILED` or
    /// `ERROR`. Failed responses must carry `failureReason` (optionally
    /// `failureDescription`), error responses must carry `errorMessage`
    /// (optionally `errorDescription`). Every other top-level field of a
    /// success response becomes its response context.
    ///
    /// A missing or unrecognized status decodes to [`ExecutionOutcome::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tollgate_action::ExecutionOutcome;
    ///
    /// let body = serde_json::json!({
    ///     "actionStatus": "FAILED",
    ///     "failureReason": "password_reused",
    /// });
    /// let outcome = ExecutionOutcome::from_response(&body).unwrap();
    /// assert_eq!(outcome, ExecutionOutcome::failed("password_reused"));
    /// ```
    pub fn from_response(body: &serde_json::Value) -> Result<Self, ActionExecutionError> {
        let wire = WireResponse::deserialize(body)
            .map_err(|e| ActionExecutionError::invalid_response(e.to_string()))?;
        wire.into_outcome()
    }

    /// Decode an external handler's raw JSON response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ActionExecutionError> {
        let wire: WireResponse = serde_json::from_slice(body)
            .map_err(|e| ActionExecutionError::invalid_response(e.to_string()))?;
        wire.into_outcome()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    action_status: Option<String>,
    failure_reason: Option<String>,
    failure_description: Option<String>,
    error_message: Option<String>,
    error_description: Option<String>,
    #[serde(flatten)]
    rest: ResponseContext,
}

impl WireResponse {
    fn into_outcome(self) -> Result<ExecutionOutcome, ActionExecutionError> {
        let status = self.action_status.as_deref().and_then(ActionStatus::from_wire);
        match status {
            Some(ActionStatus::Success) => Ok(ExecutionOutcome::Success {
                response_context: self.rest,
            }),
            Some(ActionStatus::Failed) => {
                let reason = self.failure_reason.ok_or_else(|| {
                    ActionExecutionError::invalid_response("missing `failureReason`")
                })?;
                Ok(ExecutionOutcome::Failed {
                    reason,
                    description: self.failure_description,
                })
            }
            Some(ActionStatus::Error) => {
                let message = self.error_message.ok_or_else(|| {
                    ActionExecutionError::invalid_response("missing `errorMessage`")
                })?;
                Ok(ExecutionOutcome::Error {
                    message,
                    description: self.error_description,
                })
            }
            None => Ok(ExecutionOutcome::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn constructors_set_status() {
        assert_eq!(ExecutionOutcome::success().status(), Some(ActionStatus::Success));
        assert_eq!(ExecutionOutcome::failed("r").status(), Some(ActionStatus::Failed));
        assert_eq!(ExecutionOutcome::error("m").status(), Some(ActionStatus::Error));
        assert_eq!(ExecutionOutcome::Unknown.status(), None);
        assert!(ExecutionOutcome::success().is_success());
        assert!(!ExecutionOutcome::Unknown.is_success());
    }

    #[test]
    fn decodes_success_with_context() {
        let body = json!({
            "actionStatus": "SUCCESS",
            "operations": [{"op": "replace", "path": "/user/claims/0"}],
        });

        let outcome = ExecutionOutcome::from_response(&body).unwrap();

        let ExecutionOutcome::Success { response_context } = outcome else {
            panic!("expected Success, got {outcome:?}");
        };
        assert_eq!(response_context.len(), 1);
        assert!(response_context.contains_key("operations"));
    }

    #[test]
    fn decodes_failed_with_description() {
        let body = json!({
            "actionStatus": "FAILED",
            "failureReason": "FailureReason",
            "failureDescription": "FailureDescription",
        });

        assert_eq!(
            ExecutionOutcome::from_response(&body).unwrap(),
            ExecutionOutcome::failed_with_description("FailureReason", "FailureDescription")
        );
    }

    #[test]
    fn decodes_error_without_description() {
        let body = json!({"actionStatus": "ERROR", "errorMessage": "ErrorMessage"});

        assert_eq!(
            ExecutionOutcome::from_response(&body).unwrap(),
            ExecutionOutcome::error("ErrorMessage")
        );
    }

    #[rstest]
    #[case::missing(json!({}))]
    #[case::null(json!({"actionStatus": null}))]
    #[case::unrecognized(json!({"actionStatus": "INCOMPLETE"}))]
    #[case::lowercase(json!({"actionStatus": "success"}))]
    fn absent_or_unrecognized_status_is_unknown(#[case] body: serde_json::Value) {
        assert_eq!(
            ExecutionOutcome::from_response(&body).unwrap(),
            ExecutionOutcome::Unknown
        );
    }

    #[rstest]
    #[case::failed_without_reason(json!({"actionStatus": "FAILED"}), "failureReason")]
    #[case::error_without_message(json!({"actionStatus": "ERROR"}), "errorMessage")]
    fn recognized_status_requires_primary_text(
        #[case] body: serde_json::Value,
        #[case] field: &str,
    ) {
        let err = ExecutionOutcome::from_response(&body).unwrap_err();
        assert!(matches!(err, ActionExecutionError::InvalidResponse(_)));
        assert!(err.to_string().contains(field));
    }

    #[test]
    fn non_object_body_is_invalid() {
        let err = ExecutionOutcome::from_response(&json!("SUCCESS")).unwrap_err();
        assert!(matches!(err, ActionExecutionError::InvalidResponse(_)));
    }

    #[test]
    fn decodes_raw_bytes() {
        let outcome = ExecutionOutcome::from_slice(br#"{"actionStatus":"SUCCESS"}"#).unwrap();
        assert_eq!(outcome, ExecutionOutcome::success());

        let err = ExecutionOutcome::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, ActionExecutionError::InvalidResponse(_)));
    }
}

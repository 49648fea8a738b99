//! The pluggable executor capability and the request it receives.

use std::fmt;

use zeroize::Zeroizing;

use crate::action_type::ActionType;
use crate::context::Flow;
use crate::error::ActionExecutionError;
use crate::outcome::ExecutionOutcome;

/// Handler for one [`ActionType`], typically backed by an external service.
///
/// Implementations are registered in an
/// [`ActionExecutorRegistry`](crate::ActionExecutorRegistry) under the type
/// they report from [`supported_action_type`](Self::supported_action_type).
///
/// Execution is synchronous: the calling lifecycle thread blocks until an
/// outcome is produced. Timeouts and retries, if any, belong to the
/// implementation.
pub trait ActionExecutor: Send + Sync + 'static {
    /// The action type this executor handles.
    fn supported_action_type(&self) -> ActionType;

    /// Execute the action for one intercepted operation.
    ///
    /// Returning `Err` signals that no outcome could be produced at all;
    /// business rejections are expressed as
    /// [`ExecutionOutcome::Failed`] instead.
    fn execute(
        &self,
        request: &ActionExecutionRequest,
    ) -> Result<ExecutionOutcome, ActionExecutionError>;
}

/// The user an intercepted operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUser {
    /// Unique user identifier.
    pub id: String,
    /// User store (domain) the user lives in.
    pub user_store_domain: Option<String>,
}

/// Everything an executor needs to evaluate one intercepted operation.
///
/// The credential bytes are wiped when the request is dropped, and are
/// redacted from `Debug` output.
///
/// # Example
///
/// ```rust
/// use tollgate_action::{ActionExecutionRequest, ActionType};
///
/// let request = ActionExecutionRequest::new(ActionType::PreUpdatePassword, "user-1")
///     .with_user_store_domain("PRIMARY")
///     .with_credential(b"hunter2".to_vec());
///
/// assert_eq!(request.user().id, "user-1");
/// assert_eq!(request.credential(), b"hunter2");
/// assert!(!format!("{request:?}").contains("hunter2"));
/// ```
pub struct ActionExecutionRequest {
    action_type: ActionType,
    user: RequestUser,
    credential: Zeroizing<Vec<u8>>,
    tenant_domain: Option<String>,
    flow: Option<Flow>,
}

impl ActionExecutionRequest {
    /// Create a request for `user_id` with no credential attached.
    pub fn new(action_type: ActionType, user_id: impl Into<String>) -> Self {
        Self {
            action_type,
            user: RequestUser {
                id: user_id.into(),
                user_store_domain: None,
            },
            credential: Zeroizing::new(Vec::new()),
            tenant_domain: None,
            flow: None,
        }
    }

    /// Set the user store domain.
    #[must_use]
    pub fn with_user_store_domain(mut self, domain: impl Into<String>) -> Self {
        self.user.user_store_domain = Some(domain.into());
        self
    }

    /// Attach the credential byte form. Accepts plain or zeroizing buffers.
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<Zeroizing<Vec<u8>>>) -> Self {
        self.credential = credential.into();
        self
    }

    /// Set the tenant domain.
    #[must_use]
    pub fn with_tenant_domain(mut self, tenant_domain: Option<String>) -> Self {
        self.tenant_domain = tenant_domain;
        self
    }

    /// Set the running flow.
    #[must_use]
    pub fn with_flow(mut self, flow: Option<Flow>) -> Self {
        self.flow = flow;
        self
    }

    /// The action type being executed.
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// The user the operation applies to.
    pub fn user(&self) -> &RequestUser {
        &self.user
    }

    /// Byte form of the credential.
    pub fn credential(&self) -> &[u8] {
        &self.credential
    }

    /// Tenant domain, if known.
    pub fn tenant_domain(&self) -> Option<&str> {
        self.tenant_domain.as_deref()
    }

    /// The running flow, if known.
    pub fn flow(&self) -> Option<Flow> {
        self.flow
    }
}

impl fmt::Debug for ActionExecutionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionExecutionRequest")
            .field("action_type", &self.action_type)
            .field("user", &self.user)
            .field("credential", &"[REDACTED]")
            .field("tenant_domain", &self.tenant_domain)
            .field("flow", &self.flow)
            .finish()
    }
}

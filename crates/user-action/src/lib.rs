//! # Tollgate User Action
//!
//! Dispatches intercepted user-lifecycle operations to the action executor
//! registered for them and turns the executor's outcome into the
//! proceed-or-fault answer the lifecycle framework expects.
//!
//! The only operation wired today is the pre-update-password check:
//!
//! ```rust
//! use std::sync::Arc;
//! use tollgate_action::{
//!     ActionExecutionError, ActionExecutionRequest, ActionExecutor, ActionExecutorRegistry,
//!     ActionType, ExecutionOutcome,
//! };
//! use tollgate_user_action::{ActionDispatchListener, UserStore};
//!
//! struct RejectShort;
//!
//! impl ActionExecutor for RejectShort {
//!     fn supported_action_type(&self) -> ActionType {
//!         ActionType::PreUpdatePassword
//!     }
//!
//!     fn execute(
//!         &self,
//!         request: &ActionExecutionRequest,
//!     ) -> Result<ExecutionOutcome, ActionExecutionError> {
//!         if request.credential().len() < 8 {
//!             return Ok(ExecutionOutcome::failed_with_description(
//!                 "Password too short",
//!                 "Use at least 8 characters",
//!             ));
//!         }
//!         Ok(ExecutionOutcome::success())
//!     }
//! }
//!
//! let registry = Arc::new(ActionExecutorRegistry::new());
//! registry.register(Arc::new(RejectShort));
//!
//! let listener = ActionDispatchListener::builder().registry(registry).build();
//! let store = UserStore::primary();
//!
//! let err = listener
//!     .intercept_pre_credential_update("user-1", Box::new(String::from("short")), &store)
//!     .unwrap_err();
//! assert_eq!(err.message(), "Password too short. Use at least 8 characters");
//! assert!(err.is_client_error());
//!
//! let proceed = listener
//!     .intercept_pre_credential_update("user-1", Box::new(String::from("long enough")), &store)
//!     .unwrap();
//! assert!(proceed);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod listener;
pub mod reconcile;
pub mod user_store;

pub use error::{ErrorCategory, UserActionErrorCode, UserOperationError};
pub use listener::{
    ActionDispatchListener, ActionDispatchListenerBuilder, DEFAULT_LISTENER_ORDER,
    LISTENER_NAME, LISTENER_TYPE,
};
pub use reconcile::{join_message, reconcile};
pub use user_store::{PRIMARY_DOMAIN_NAME, UserStore, UserStoreContext};

//! # Tollgate Action System
//!
//! Execution abstraction for identity lifecycle actions.
//!
//! This crate defines **what** an action executor is and **how** the
//! dispatch layer finds and talks to it, but not how a lifecycle listener
//! reconciles the result. Concrete executors (HTTP webhooks, in-process
//! policies) live in plugins and only depend on the types here.
//!
//! ## Core Types
//!
//! - [`ActionType`]: lifecycle operation an executor intercepts
//! - [`ActionExecutor`]: pluggable handler capability
//! - [`ActionExecutionRequest`]: user, credential bytes and flow context
//! - [`ExecutionOutcome`]: closed result (success, failed, error, unknown)
//! - [`ActionExecutionError`]: fault raised when no outcome could be produced
//! - [`ActionExecutorRegistry`]: type → executor routing table
//! - [`IdentityContext`] / [`AmbientContext`]: ambient flow information
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tollgate_action::prelude::*;
//!
//! struct MinLength(usize);
//!
//! impl ActionExecutor for MinLength {
//!     fn supported_action_type(&self) -> ActionType {
//!         ActionType::PreUpdatePassword
//!     }
//!
//!     fn execute(
//!         &self,
//!         request: &ActionExecutionRequest,
//!     ) -> Result<ExecutionOutcome, ActionExecutionError> {
//!         if request.credential().len() < self.0 {
//!             return Ok(ExecutionOutcome::failed_with_description(
//!                 "weak_password",
//!                 "Password is too short",
//!             ));
//!         }
//!         Ok(ExecutionOutcome::success())
//!     }
//! }
//!
//! let registry = ActionExecutorRegistry::new();
//! registry.register(Arc::new(MinLength(8)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Action type tags used as registry keys.
pub mod action_type;
/// Ambient identity and flow context.
pub mod context;
/// Executor fault types.
pub mod error;
/// Executor capability and request type.
pub mod executor;
/// Execution outcome and handler response decoding.
pub mod outcome;
/// Convenience re-exports for executor authors.
pub mod prelude;
/// Registry routing action types to executors.
pub mod registry;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use action_type::ActionType;
pub use context::{
    AmbientContext, Flow, FlowName, IdentityContext, InitiatingPersona, ThreadLocalContext,
};
pub use error::{ActionExecutionError, ParseActionTypeError};
pub use executor::{ActionExecutionRequest, ActionExecutor, RequestUser};
pub use outcome::{ActionStatus, ExecutionOutcome, ResponseContext};
pub use registry::ActionExecutorRegistry;

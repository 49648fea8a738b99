//! Convenience re-exports for executor authors.
//!
//! ```rust
//! use tollgate_action::prelude::*;
//! ```

pub use crate::action_type::ActionType;
pub use crate::context::{Flow, FlowName, IdentityContext, InitiatingPersona};
pub use crate::error::ActionExecutionError;
pub use crate::executor::{ActionExecutionRequest, ActionExecutor};
pub use crate::outcome::{ExecutionOutcome, ResponseContext};
pub use crate::registry::ActionExecutorRegistry;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::action_type::ActionType;
use crate::executor::ActionExecutor;

/// Routes each [`ActionType`] to at most one executor.
///
/// Plugins register their executor at activation and unregister it at
/// deactivation. Lookups are cheap and may run concurrently from many
/// lifecycle threads; registration is rare.
///
/// Executors are stored as `Arc<dyn ActionExecutor>` so a lookup hands out
/// a handle that stays valid even if the slot is replaced mid-call.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tollgate_action::{
///     ActionExecutionError, ActionExecutionRequest, ActionExecutor, ActionExecutorRegistry,
///     ActionType, ExecutionOutcome,
/// };
///
/// struct AllowAll;
/// impl ActionExecutor for AllowAll {
///     fn supported_action_type(&self) -> ActionType { ActionType::PreUpdatePassword }
///     fn execute(&self, _: &ActionExecutionRequest)
///         -> Result<ExecutionOutcome, ActionExecutionError> {
///         Ok(ExecutionOutcome::success())
///     }
/// }
///
/// let registry = ActionExecutorRegistry::new();
/// let executor: Arc<dyn ActionExecutor> = Arc::new(AllowAll);
/// registry.register(executor.clone());
///
/// assert!(registry.get(ActionType::PreUpdatePassword).is_some());
/// assert!(registry.get(ActionType::PreRegistration).is_none());
///
/// registry.unregister(&executor);
/// assert!(registry.is_empty());
/// ```
#[derive(Default)]
pub struct ActionExecutorRegistry {
    executors: RwLock<HashMap<ActionType, Arc<dyn ActionExecutor>>>,
}

static GLOBAL: LazyLock<Arc<ActionExecutorRegistry>> =
    LazyLock::new(|| Arc::new(ActionExecutorRegistry::new()));

impl ActionExecutorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry plugins register into by default.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Register an executor under the type it supports.
    ///
    /// Last write wins: an executor already registered for the same type is
    /// replaced and returned.
    pub fn register(&self, executor: Arc<dyn ActionExecutor>) -> Option<Arc<dyn ActionExecutor>> {
        let action_type = executor.supported_action_type();
        let previous = self.executors.write().insert(action_type, executor);
        if previous.is_some() {
            tracing::warn!(
                action_type = %action_type,
                "replaced an already registered action executor"
            );
        } else {
            tracing::debug!(action_type = %action_type, "registered action executor");
        }
        previous
    }

    /// Remove `executor` if it is the instance currently registered for its type.
    ///
    /// A different instance occupying the slot is left in place. Returns
    /// `true` if a registration was removed.
    pub fn unregister(&self, executor: &Arc<dyn ActionExecutor>) -> bool {
        let action_type = executor.supported_action_type();
        let mut executors = self.executors.write();
        let is_same = executors
            .get(&action_type)
            .is_some_and(|current| same_instance(current, executor));
        if is_same {
            executors.remove(&action_type);
            tracing::debug!(action_type = %action_type, "unregistered action executor");
        }
        is_same
    }

    /// Look up the executor for `action_type`.
    pub fn get(&self, action_type: ActionType) -> Option<Arc<dyn ActionExecutor>> {
        self.executors.read().get(&action_type).cloned()
    }

    /// Check whether an executor is registered for `action_type`.
    pub fn contains(&self, action_type: ActionType) -> bool {
        self.executors.read().contains_key(&action_type)
    }

    /// Snapshot of the registered action types.
    pub fn action_types(&self) -> Vec<ActionType> {
        let mut types: Vec<_> = self.executors.read().keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Number of registered executors.
    pub fn len(&self) -> usize {
        self.executors.read().len()
    }

    /// Returns `true` if no executors are registered.
    pub fn is_empty(&self) -> bool {
        self.executors.read().is_empty()
    }

    /// Remove every registration.
    pub fn clear(&self) {
        self.executors.write().clear();
    }
}

fn same_instance(a: &Arc<dyn ActionExecutor>, b: &Arc<dyn ActionExecutor>) -> bool {
    // Compare data addresses only; vtable pointers are not unique.
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl std::fmt::Debug for ActionExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionExecutorRegistry")
            .field("count", &self.len())
            .field("action_types", &self.action_types())
            .finish()
    }
}

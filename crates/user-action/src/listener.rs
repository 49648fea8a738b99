//! The pre-update-password dispatch listener

use std::fmt;
use std::sync::Arc;

use tollgate_action::{
    ActionExecutionRequest, ActionExecutorRegistry, ActionType, AmbientContext, ThreadLocalContext,
};
use tollgate_config::{InMemoryConfigSource, ListenerConfigSource, ListenerKey};
use tollgate_credential::{CredentialMaterial, RawCredential};

use crate::error::UserOperationError;
use crate::reconcile::reconcile;
use crate::user_store::UserStoreContext;

/// Listener family this listener is configured under.
pub const LISTENER_TYPE: &str = "user-operation";

/// Name this listener is configured under.
pub const LISTENER_NAME: &str = "action-user-operation";

/// Order used when none is configured.
pub const DEFAULT_LISTENER_ORDER: i32 = 10000;

/// Intercepts credential updates and hands them to the
/// [`ActionType::PreUpdatePassword`] executor.
///
/// The listener holds no per-call state and may be shared across threads.
pub struct ActionDispatchListener {
    key: ListenerKey,
    registry: Arc<ActionExecutorRegistry>,
    config: Arc<dyn ListenerConfigSource>,
    context: Arc<dyn AmbientContext>,
}

impl ActionDispatchListener {
    /// Listener using the process-wide registry, no configuration and the
    /// thread-local identity context.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a listener.
    pub fn builder() -> ActionDispatchListenerBuilder {
        ActionDispatchListenerBuilder::default()
    }

    /// The key this listener reads its configuration under.
    pub fn key(&self) -> &ListenerKey {
        &self.key
    }

    /// Whether configuration allows this listener to run.
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled(&self.key)
    }

    /// Position of this listener among the framework's listeners.
    pub fn execution_order_id(&self) -> i32 {
        self.config
            .order(&self.key)
            .unwrap_or(DEFAULT_LISTENER_ORDER)
    }

    /// Run the pre-update-password action for a credential update.
    ///
    /// Returns `Ok(true)` to let the update proceed and `Ok(false)` to
    /// block it without a specific fault. The credential and its byte form
    /// are wiped before this returns, whatever the result.
    ///
    /// # Errors
    ///
    /// - `UNSUPPORTED_SECRET` if `credential` is not text or bytes
    /// - `EXECUTION_FAILED` if the executor rejected the update
    /// - `EXECUTION_ERROR` if the executor reported a system error
    /// - `SERVER_ERROR` if the executor could not be invoked
    pub fn intercept_pre_credential_update(
        &self,
        user_id: &str,
        credential: RawCredential,
        user_store: &dyn UserStoreContext,
    ) -> Result<bool, UserOperationError> {
        let action_type = ActionType::PreUpdatePassword;
        let span = tracing::debug_span!("pre_update_password", user_id, %action_type);
        let _enter = span.enter();

        if !self.is_enabled() {
            tracing::debug!(listener = %self.key, "listener disabled, skipping action");
            CredentialMaterial::wipe_raw(credential);
            return Ok(true);
        }

        let material = CredentialMaterial::try_from_raw(credential).map_err(|_| {
            tracing::debug!("credential is not in a supported representation");
            UserOperationError::unsupported_secret()
        })?;

        let Some(executor) = self.registry.get(action_type) else {
            tracing::debug!("no executor registered, proceeding");
            return Ok(true);
        };

        let ambient = self.context.current();
        let request = ActionExecutionRequest::new(action_type, user_id)
            .with_user_store_domain(user_store.domain_name())
            .with_credential(material.into_bytes())
            .with_tenant_domain(ambient.tenant_domain)
            .with_flow(ambient.flow);

        let outcome = executor.execute(&request);
        drop(request);

        let outcome = outcome.map_err(|err| {
            tracing::error!(error = %err, "pre update password action could not be executed");
            UserOperationError::server_error()
        })?;

        let status = outcome.status();
        let result = reconcile(outcome);
        match &result {
            Ok(true) => tracing::debug!(?status, "action allowed the update"),
            Ok(false) => tracing::warn!(?status, "action returned no usable status"),
            Err(err) => tracing::warn!(
                code = err.error_code(),
                category = %err.error_category(),
                "action blocked the update"
            ),
        }
        result
    }
}

impl Default for ActionDispatchListener {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionDispatchListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatchListener")
            .field("key", &self.key)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ActionDispatchListener`].
///
/// Unset collaborators fall back to the process-wide registry, an empty
/// configuration and the thread-local identity context.
#[derive(Default)]
#[must_use = "builder does nothing until .build() is called"]
pub struct ActionDispatchListenerBuilder {
    registry: Option<Arc<ActionExecutorRegistry>>,
    config: Option<Arc<dyn ListenerConfigSource>>,
    context: Option<Arc<dyn AmbientContext>>,
}

impl ActionDispatchListenerBuilder {
    /// Registry to resolve executors from.
    pub fn registry(mut self, registry: Arc<ActionExecutorRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Source of the enable flag and order.
    pub fn config_source(mut self, config: Arc<dyn ListenerConfigSource>) -> Self {
        self.config = Some(config);
        self
    }

    /// Source of the flow and tenant attached to requests.
    pub fn ambient_context(mut self, context: Arc<dyn AmbientContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Build the listener.
    pub fn build(self) -> ActionDispatchListener {
        ActionDispatchListener {
            key: ListenerKey::new(LISTENER_TYPE, LISTENER_NAME),
            registry: self.registry.unwrap_or_else(ActionExecutorRegistry::global),
            config: self
                .config
                .unwrap_or_else(|| Arc::new(InMemoryConfigSource::new())),
            context: self.context.unwrap_or_else(|| Arc::new(ThreadLocalContext)),
        }
    }
}

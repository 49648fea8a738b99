//! Ambient identity context attached to outgoing action requests.
//!
//! The lifecycle framework records which flow is running (password reset,
//! registration, ...) and who started it. The dispatch core only reads it,
//! through [`AmbientContext`], and copies it onto the request unchanged.
//!
//! [`IdentityContext`] is stored per thread: activate one for the duration
//! of a closure with [`IdentityContext::scope_sync`].

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the identity flow an operation runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum FlowName {
    /// Forgotten or administrator-triggered password reset.
    PasswordReset,
    /// Self or administrator user registration.
    UserRegistration,
    /// Registration completed by an invited user.
    InvitedUserRegistration,
    /// Profile attribute update.
    ProfileUpdate,
    /// Credential update outside a reset flow.
    UserCredentialUpdate,
    /// Login.
    Login,
}

impl FlowName {
    /// Stable kebab-case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PasswordReset => "password-reset",
            Self::UserRegistration => "user-registration",
            Self::InvitedUserRegistration => "invited-user-registration",
            Self::ProfileUpdate => "profile-update",
            Self::UserCredentialUpdate => "user-credential-update",
            Self::Login => "login",
        }
    }
}

/// Who initiated the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum InitiatingPersona {
    /// An administrator acting on another user.
    Admin,
    /// An application acting on its own authority.
    Application,
    /// The user acting on their own account.
    User,
}

impl InitiatingPersona {
    /// Stable kebab-case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Application => "application",
            Self::User => "user",
        }
    }
}

/// The running flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flow {
    /// Flow name.
    pub name: FlowName,
    /// Flow initiator.
    pub initiating_persona: InitiatingPersona,
}

impl Flow {
    /// Create a flow descriptor.
    pub const fn new(name: FlowName, initiating_persona: InitiatingPersona) -> Self {
        Self {
            name,
            initiating_persona,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name.as_str(), self.initiating_persona.as_str())
    }
}

/// Request-scoped identity context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    /// The running flow, if the framework recorded one.
    pub flow: Option<Flow>,
    /// Tenant the operation belongs to.
    pub tenant_domain: Option<String>,
}

thread_local! {
    static CURRENT: RefCell<IdentityContext> = RefCell::new(IdentityContext::default());
}

impl IdentityContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the running flow.
    #[must_use]
    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.flow = Some(flow);
        self
    }

    /// Set the tenant domain.
    #[must_use]
    pub fn with_tenant_domain(mut self, tenant_domain: impl Into<String>) -> Self {
        self.tenant_domain = Some(tenant_domain.into());
        self
    }

    /// Snapshot of the context active on this thread.
    #[must_use]
    pub fn current() -> Self {
        CURRENT.with(|c| c.borrow().clone())
    }

    /// Run a closure with this context active on the current thread.
    ///
    /// Nesting is supported; the previous context is restored on return.
    pub fn scope_sync<R>(self, f: impl FnOnce() -> R) -> R {
        let prev = CURRENT.with(|cell| cell.replace(self));
        let result = f();
        CURRENT.with(|cell| cell.replace(prev));
        result
    }
}

/// Read access to the ambient identity context.
pub trait AmbientContext: Send + Sync {
    /// The context of the operation currently being intercepted.
    fn current(&self) -> IdentityContext;
}

/// Reads the context activated on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadLocalContext;

impl AmbientContext for ThreadLocalContext {
    fn current(&self) -> IdentityContext {
        IdentityContext::current()
    }
}

/// A fixed context, handy for embedding and tests.
impl AmbientContext for IdentityContext {
    fn current(&self) -> IdentityContext {
        self.clone()
    }
}

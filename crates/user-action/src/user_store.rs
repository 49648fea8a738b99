//! The user store an intercepted operation targets

/// Domain name of the primary user store.
pub const PRIMARY_DOMAIN_NAME: &str = "PRIMARY";

/// Read access to the user store handling the intercepted operation.
pub trait UserStoreContext {
    /// Domain name of the store, e.g. `PRIMARY` or `SECONDARY.LDAP`.
    fn domain_name(&self) -> String;
}

/// A user store identified by its domain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStore {
    domain_name: Option<String>,
}

impl UserStore {
    /// The primary user store.
    pub fn primary() -> Self {
        Self { domain_name: None }
    }

    /// A secondary user store. A blank name denotes the primary store.
    pub fn with_domain(domain_name: impl Into<String>) -> Self {
        let domain_name = domain_name.into();
        let domain_name = (!domain_name.trim().is_empty()).then_some(domain_name);
        Self { domain_name }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::primary()
    }
}

impl UserStoreContext for UserStore {
    fn domain_name(&self) -> String {
        self.domain_name
            .clone()
            .unwrap_or_else(|| PRIMARY_DOMAIN_NAME.to_owned())
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseActionTypeError;

/// Lifecycle operation an action executor intercepts.
///
/// Used as the registry key: at most one executor is routed per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ActionType {
    /// Runs before an access token is issued.
    PreIssueAccessToken,
    /// Runs during authentication.
    Authentication,
    /// Runs before a password (credential) update is persisted.
    PreUpdatePassword,
    /// Runs before profile attributes are updated.
    PreUpdateProfile,
    /// Runs before a new user is registered.
    PreRegistration,
}

impl ActionType {
    /// Every known action type.
    pub const ALL: [Self; 5] = [
        Self::PreIssueAccessToken,
        Self::Authentication,
        Self::PreUpdatePassword,
        Self::PreUpdateProfile,
        Self::PreRegistration,
    ];

    /// Stable kebab-case identifier, as used in configuration and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreIssueAccessToken => "pre-issue-access-token",
            Self::Authentication => "authentication",
            Self::PreUpdatePassword => "pre-update-password",
            Self::PreUpdateProfile => "pre-update-profile",
            Self::PreRegistration => "pre-registration",
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PreIssueAccessToken => "Pre Issue Access Token",
            Self::Authentication => "Authentication",
            Self::PreUpdatePassword => "Pre Update Password",
            Self::PreUpdateProfile => "Pre Update Profile",
            Self::PreRegistration => "Pre Registration",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ParseActionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseActionTypeError(s.to_owned()))
    }
}

//! # Tollgate Credential
//!
//! Short-lived secret material handed to lifecycle action handlers.
//!
//! - [`CredentialMaterial`]: text or byte secret with a canonical byte form
//!   and automatic zeroization
//! - [`RawCredential`]: opaque value as received from a lifecycle framework
//! - [`UnsupportedSecretType`]: rejection of any other representation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Unsupported-representation error.
pub mod error;
/// Credential material and raw credential conversion.
pub mod material;

pub use error::UnsupportedSecretType;
pub use material::{CredentialMaterial, RawCredential};
pub use zeroize::Zeroizing;

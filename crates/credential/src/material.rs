//! Credential material with automatic zeroization
//!
//! Provides [`CredentialMaterial`], the short-lived form a secret takes while
//! it is handed to an action handler. Memory is zeroed when the value is
//! dropped or explicitly [`clear`](CredentialMaterial::clear)ed.

use std::any::Any;
use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::UnsupportedSecretType;

/// An opaque, owned credential value as handed over by a lifecycle framework.
///
/// Convert it with [`CredentialMaterial::try_from_raw`]; only the
/// representations listed there are accepted.
pub type RawCredential = Box<dyn Any + Send>;

#[derive(Zeroize)]
enum Inner {
    Text(String),
    Bytes(Vec<u8>),
}

/// Secret credential with automatic memory zeroization.
///
/// Holds either a character sequence or a byte sequence. The canonical byte
/// form of text is its UTF-8 encoding. The secret is never exposed through
/// `Debug` or `Display`.
///
/// # Examples
///
/// ```
/// use tollgate_credential::CredentialMaterial;
///
/// let secret = CredentialMaterial::from_text("hunter2");
/// assert_eq!(secret.len(), 7);
///
/// let bytes = secret.into_bytes();
/// assert_eq!(bytes.as_slice(), b"hunter2");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CredentialMaterial {
    inner: Inner,
}

impl CredentialMaterial {
    /// Creates material from a character-sequence secret.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            inner: Inner::Text(text.into()),
        }
    }

    /// Creates material from a byte-sequence secret.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Inner::Bytes(bytes.into()),
        }
    }

    /// Creates material from a slice of characters.
    ///
    /// The caller still owns `chars` and is responsible for wiping it.
    pub fn from_chars(chars: &[char]) -> Self {
        // Exact capacity: a growing buffer would free unwiped prefixes.
        let mut text = String::with_capacity(chars.iter().map(|c| c.len_utf8()).sum());
        text.extend(chars);
        Self::from_text(text)
    }

    /// Converts an opaque framework value into credential material.
    ///
    /// Accepted representations: `CredentialMaterial`, `String`,
    /// `&'static str`, `Box<str>`, `Vec<char>`, `Vec<u8>` and `Box<[u8]>`.
    /// Intermediate copies are wiped before returning. Any other type is
    /// rejected with [`UnsupportedSecretType`].
    pub fn try_from_raw(raw: RawCredential) -> Result<Self, UnsupportedSecretType> {
        let raw = match raw.downcast::<Self>() {
            Ok(material) => return Ok(*material),
            Err(raw) => raw,
        };
        let raw = match raw.downcast::<String>() {
            Ok(text) => return Ok(Self::from_text(*text)),
            Err(raw) => raw,
        };
        let raw = match raw.downcast::<&'static str>() {
            Ok(text) => return Ok(Self::from_text(*text)),
            Err(raw) => raw,
        };
        let raw = match raw.downcast::<Box<str>>() {
            Ok(text) => return Ok(Self::from_text(String::from(*text))),
            Err(raw) => raw,
        };
        let raw = match raw.downcast::<Vec<char>>() {
            Ok(mut chars) => {
                let material = Self::from_chars(&chars);
                chars.zeroize();
                return Ok(material);
            }
            Err(raw) => raw,
        };
        let raw = match raw.downcast::<Vec<u8>>() {
            Ok(bytes) => return Ok(Self::from_bytes(*bytes)),
            Err(raw) => raw,
        };
        match raw.downcast::<Box<[u8]>>() {
            Ok(bytes) => Ok(Self::from_bytes(Vec::from(*bytes))),
            Err(_) => Err(UnsupportedSecretType),
        }
    }

    /// Wipes an opaque framework value that will not be used.
    ///
    /// Supported representations are zeroized before their memory is
    /// released; anything else is dropped as is.
    pub fn wipe_raw(raw: RawCredential) {
        drop(Self::try_from_raw(raw));
    }

    /// Returns a zeroizing copy of the canonical byte form.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.expose_secret(<[u8]>::to_vec))
    }

    /// Consumes the material and returns its byte form without copying.
    ///
    /// The returned buffer wipes itself on drop.
    pub fn into_bytes(mut self) -> Zeroizing<Vec<u8>> {
        let bytes = match &mut self.inner {
            Inner::Text(text) => std::mem::take(text).into_bytes(),
            Inner::Bytes(bytes) => std::mem::take(bytes),
        };
        Zeroizing::new(bytes)
    }

    /// Accesses the byte form within a closure scope.
    ///
    /// The borrowed slice cannot escape the closure.
    pub fn expose_secret<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        match &self.inner {
            Inner::Text(text) => f(text.as_bytes()),
            Inner::Bytes(bytes) => f(bytes),
        }
    }

    /// Length of the byte form.
    pub fn len(&self) -> usize {
        self.expose_secret(<[u8]>::len)
    }

    /// Returns `true` if the secret is empty or has been cleared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the secret was supplied as characters.
    pub fn is_text(&self) -> bool {
        matches!(self.inner, Inner::Text(_))
    }

    /// Wipes the secret in place. The material is empty afterwards.
    pub fn clear(&mut self) {
        self.zeroize();
    }
}

impl From<String> for CredentialMaterial {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

impl From<&str> for CredentialMaterial {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<Vec<u8>> for CredentialMaterial {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for CredentialMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for CredentialMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// The credential handed over by the caller is not one of the supported
/// secret representations.
///
/// Raised before any handler sees the value, so the rejected input never
/// leaves the caller's custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported secret type")]
pub struct UnsupportedSecretType;

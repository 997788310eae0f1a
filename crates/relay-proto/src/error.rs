//! Error types for envelope decoding and encoding.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtoError`].
pub type Result<T, E = ProtoError> = std::result::Result<T, E>;

/// Why an envelope could not be decoded or encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtoError {
    /// The frame body is not a JSON document.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// The body is JSON but carries no string `type` field.
    #[error("envelope has no type")]
    MissingKind,

    /// The `type` field names a kind the relay does not know.
    #[error("unknown envelope type: {0}")]
    UnknownKind(String),

    /// A recognized kind with a missing or mistyped field.
    #[error("invalid {kind} envelope: {reason}")]
    InvalidPayload {
        /// Wire name of the recognized kind.
        kind: &'static str,
        /// Serde's description of the offending field.
        reason: String,
    },

    /// An outbound envelope failed to serialize.
    #[error("failed to encode envelope: {0}")]
    Encode(String),
}

impl ProtoError {
    /// Static label for metrics.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::MissingKind => "missing_kind",
            Self::UnknownKind(_) => "unknown_kind",
            Self::InvalidPayload { .. } => "invalid_payload",
            Self::Encode(_) => "encode",
        }
    }
}

//! Unified error handling for the relay.
//!
//! Decode failures live in [`relay_proto::ProtoError`]; this module covers
//! what can go wrong after an envelope has been decoded. None of these
//! errors close the originating connection.

use relay_proto::ProtoError;
use thiserror::Error;

/// Errors that can occur while dispatching a decoded envelope.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// An outbound envelope could not be serialized.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtoError),

    /// The originating connection is no longer registered with the hub.
    #[error("connection {0} is not registered")]
    UnknownConnection(relay_proto::PlayerId),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Protocol(e) => e.error_code(),
            Self::UnknownConnection(_) => "unknown_connection",
        }
    }
}

/// Result type for envelope handlers.
pub type HandlerResult<T = ()> = Result<T, HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use relay_proto::PlayerId;

    #[test]
    fn protocol_errors_keep_their_code() {
        let err = HandlerError::from(ProtoError::Encode("boom".into()));
        assert_eq!(err.error_code(), "encode");
    }

    #[test]
    fn unknown_connection_display() {
        let err = HandlerError::UnknownConnection(PlayerId::new(9));
        assert_eq!(err.to_string(), "connection 9 is not registered");
        assert_eq!(err.error_code(), "unknown_connection");
    }
}

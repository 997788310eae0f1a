//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::net::SocketAddr;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listen.max_message_size must be greater than zero")]
    ZeroMaxMessageSize,
    #[error("http.address {0} collides with listen.address")]
    HttpAddressCollides(SocketAddr),
    #[error("http.assets_dir is not a directory: {0}")]
    AssetsDirNotFound(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listen.max_message_size == 0 {
        errors.push(ValidationError::ZeroMaxMessageSize);
    }

    if let Some(ref http) = config.http {
        if http.address.port() == config.listen.address.port()
            && (http.address.ip() == config.listen.address.ip()
                || http.address.ip().is_unspecified()
                || config.listen.address.ip().is_unspecified())
        {
            errors.push(ValidationError::HttpAddressCollides(http.address));
        }

        if let Some(ref dir) = http.assets_dir
            && !dir.is_dir()
        {
            errors.push(ValidationError::AssetsDirNotFound(dir.display().to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Error types for configuration loading.

/// Errors raised while building a [`VerificationConfig`](crate::VerificationConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured address is not a hex-encoded 20-byte address.
    #[error("Invalid address in {key}: {value}")]
    InvalidAddress {
        /// Environment variable or field name
        key: String,
        /// The rejected value
        value: String,
    },

    /// A configured timeout is not a whole number of seconds.
    #[error("Invalid timeout in {key}: {value}")]
    InvalidTimeout {
        /// Environment variable or field name
        key: String,
        /// The rejected value
        value: String,
    },
}

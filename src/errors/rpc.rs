//! Shared RPC error types for blockchain provider operations.
//!
//! This module provides error types for common RPC failures that can occur
//! when the gateway talks to a node on behalf of the verification cache.

use std::time::Duration;

/// Errors that can occur during blockchain RPC operations.
///
/// This error type captures common failure modes when interacting with
/// blockchain providers (e.g., via Alloy). It includes context about what
/// operation was being performed to aid in debugging.
///
/// # Examples
///
/// ```rust
/// use entityscan::RpcError;
/// use std::time::Duration;
///
/// let error = RpcError::Timeout {
///     operation: "eth_call isVerifiedEntity".to_string(),
///     timeout: Duration::from_secs(30),
/// };
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The RPC endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// The node rejected the call or the transport failed.
    ///
    /// This is a catch-all for RPC failures such as network errors,
    /// execution reverts, or provider downtime.
    #[error("RPC call failed during {operation}")]
    CallFailed {
        /// Description of the operation that failed
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The node did not answer within the configured timeout.
    #[error("RPC call timed out after {timeout:?} during {operation}")]
    Timeout {
        /// Description of the operation that timed out
        operation: String,
        /// The timeout that elapsed
        timeout: Duration,
    },
}

impl RpcError {
    /// Helper to create a `CallFailed` error from any error type.
    pub fn call_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::CallFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        RpcError::Timeout {
            operation: operation.into(),
            timeout,
        }
    }
}

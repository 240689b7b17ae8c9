//! Error types for read-only contract calls.
//!
//! These are produced by [`ReadCallGateway`](crate::gateway::ReadCallGateway)
//! implementations. The verification cache never surfaces them to its
//! callers; it logs them and records a negative result instead.

use super::RpcError;

/// Errors that can occur while invoking a read-only contract method.
///
/// # Examples
///
/// ```rust
/// use entityscan::ContractCallError;
///
/// let error = ContractCallError::MethodNotFound {
///     method: "isVerifiedEntity".to_string(),
/// };
/// assert!(error.to_string().contains("isVerifiedEntity"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ContractCallError {
    /// The ABI attached to the contract descriptor has no such function.
    #[error("Method not found in contract ABI: {method}")]
    MethodNotFound {
        /// Name of the requested method
        method: String,
    },

    /// An argument could not be parsed as an EVM address.
    #[error("Invalid address argument {address}: {reason}")]
    InvalidAddress {
        /// The offending input
        address: String,
        /// Parser message
        reason: String,
    },

    /// Arguments did not match the function inputs.
    #[error("Failed to encode call to {method}: {details}")]
    EncodeFailed {
        /// Name of the method being called
        method: String,
        /// Details from the ABI encoder
        details: String,
    },

    /// Return data did not match the function outputs.
    #[error("Failed to decode output of {method}: {details}")]
    DecodeFailed {
        /// Name of the method being called
        method: String,
        /// Details from the ABI decoder
        details: String,
    },

    /// Transport-level failure talking to the node.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl ContractCallError {
    /// Helper to create an `EncodeFailed` error from any displayable error.
    pub fn encode_failed(method: impl Into<String>, details: impl std::fmt::Display) -> Self {
        ContractCallError::EncodeFailed {
            method: method.into(),
            details: details.to_string(),
        }
    }

    /// Helper to create a `DecodeFailed` error from any displayable error.
    pub fn decode_failed(method: impl Into<String>, details: impl std::fmt::Display) -> Self {
        ContractCallError::DecodeFailed {
            method: method.into(),
            details: details.to_string(),
        }
    }
}

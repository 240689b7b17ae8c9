//! Error types for the entityscan library.
//!
//! This module provides strongly-typed errors for all public APIs in entityscan.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`ContractCallError`,
//!   `ConfigError`, etc.)
//! - **Unified error type** (`EntityscanError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! Note that the verification cache itself never returns an error: lookups
//! that fail are logged and recorded as "not verified". These types surface
//! from the gateway, provider and configuration layers.
//!
//! # Examples
//!
//! ```rust,ignore
//! use entityscan::{ContractCallError, RpcError};
//!
//! match gateway.call(&registry, "isVerifiedEntity", &options, &args, rpc_url).await {
//!     Ok(values) => println!("Decoded: {values:?}"),
//!     Err(ContractCallError::Rpc(RpcError::Timeout { timeout, .. })) => {
//!         eprintln!("Node did not answer within {timeout:?}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod config;
mod contract;
mod rpc;

pub use config::ConfigError;
pub use contract::ContractCallError;
pub use rpc::RpcError;

/// Unified error type for all entityscan operations.
///
/// All module-specific error types automatically convert to `EntityscanError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum EntityscanError {
    /// Error from configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a contract read call.
    #[error("Contract call error: {0}")]
    ContractCall(#[from] ContractCallError),

    /// Error from provider construction or transport.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

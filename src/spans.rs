//! Tracing span creation helpers for entityscan operations.
//!
//! This module provides span creation functions following an orthogonal design pattern
//! where telemetry concerns are separated from business logic. Instead of using
//! `#[instrument]` attributes directly on functions, each instrumented operation has
//! a corresponding span helper function in this module.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::{Level, Span};

use crate::address::NormalizedAddress;

/// Create span for a single address verification.
///
/// This is the main public API entry point of the verification cache.
///
/// Parent: verify_addresses span when called as part of a batch
/// Children: lookup span when the cache misses
#[inline]
pub(crate) fn verify_address(address: &NormalizedAddress) -> Span {
    tracing::debug_span!("entityscan.verify_address", address = %address)
}

/// Create span for a batch of address verifications.
///
/// Parent: None (root span for this operation)
/// Children: verify_address spans (one per address)
#[inline]
pub(crate) fn verify_addresses(count: usize) -> Span {
    tracing::span!(Level::INFO, "entityscan.verify_addresses", count = count)
}

/// Create span for a registry lookup, spawned or run inline.
///
/// Parent: verify_address span of the caller that started it
/// Children: registry_call span
#[inline]
pub(crate) fn lookup(address: &NormalizedAddress, contract: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "entityscan.lookup",
        address = %address,
        contract = %contract,
    )
}

/// Create span for a read-only contract call through the alloy gateway.
///
/// Parent: lookup span
/// Children: alloy transport spans
#[inline]
pub(crate) fn registry_call(contract: Address, method: &str, rpc_endpoint: &str) -> Span {
    tracing::debug_span!(
        "entityscan.registry_call",
        contract = %contract,
        method = method,
        rpc_endpoint = rpc_endpoint,
    )
}

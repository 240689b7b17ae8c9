// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address verification cache
//!
//! Explorer views need to know, for every address they render, whether the
//! on-chain entity registry lists it as a verified entity. Asking the node is
//! a network round trip per address, and the answer does not change within a
//! session for practical purposes, so [`VerificationCache`] sits in front of
//! the registry:
//!
//! - [`is_address_verified`](VerificationCache::is_address_verified) answers
//!   synchronously from the cache and never touches the network;
//! - [`verify_address`](VerificationCache::verify_address) fills the cache,
//!   deduplicating lookups that are already in flight;
//! - [`clear_verification_cache`](VerificationCache::clear_verification_cache)
//!   drops everything when the execution context changes.
//!
//! Lookups fail closed: anything that goes wrong while asking the registry is
//! logged and recorded as "not verified". None of the cache operations return
//! an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use entityscan::{AlloyReadGateway, VerificationCache, VerificationConfig};
//!
//! let config = VerificationConfig::from_env()?;
//! let gateway = AlloyReadGateway::new(config.rpc_timeout);
//! let cache = VerificationCache::new(config, gateway);
//!
//! if cache.verify_address("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").await {
//!     println!("verified entity");
//! }
//!
//! // Later, from rendering code that cannot await
//! let badge = cache.verification_badge("0x70997970c51812dc3a010c7d01b50e0d17dc79c8", "small");
//! ```

mod badge;
mod cache;

pub use badge::{VerificationBadge, DEFAULT_BADGE_SIZE};
pub use cache::VerificationCache;

use serde::{Deserialize, Serialize};

/// What a caller observes when its address already has a lookup in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InFlightPolicy {
    /// Return `false` immediately; the caller is expected to ask again later
    #[default]
    ReportUnverified,
    /// Await the lookup that is already running and return its result
    Coalesce,
}

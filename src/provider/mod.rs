// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP providers for registry calls
//!
//! The explorer switches between workspaces at runtime, each with its own RPC
//! endpoint, so providers are keyed by endpoint URL rather than by chain.
//!
//! This module provides:
//! - [`create_http_provider`] - Create a bare HTTP provider for one endpoint
//! - [`ProviderPool`] - Reuse providers across lookups against the same endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use entityscan::provider::ProviderPool;
//! use alloy_provider::Provider;
//!
//! let pool = ProviderPool::new();
//! let provider = pool.get_or_connect("http://localhost:8545")?;
//! let block = provider.get_block_number().await?;
//! ```

mod factory;
mod pool;

pub use factory::create_http_provider;
pub use pool::{PooledProvider, ProviderPool};

use alloy_network::Ethereum;

/// Type alias for a bare HTTP provider on an Ethereum-compatible chain
///
/// The demo ledger is a plain EVM chain (anvil or besu), so no network-specific
/// receipt fields are needed.
pub type EthereumHttpProvider = alloy_provider::RootProvider<Ethereum>;

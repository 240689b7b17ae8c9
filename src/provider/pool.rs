// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider reuse across registry lookups
//!
//! The [`ProviderPool`] keeps one provider per RPC endpoint so that repeated
//! lookups against the same workspace share an HTTP connection pool instead
//! of building a new client for every address.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::errors::RpcError;

use super::{create_http_provider, EthereumHttpProvider};

/// Type alias for a pooled provider
pub type PooledProvider = Arc<EthereumHttpProvider>;

/// A thread-safe pool of providers indexed by endpoint URL
///
/// The pool uses a read-write lock so concurrent lookups against an already
/// connected endpoint never contend with each other.
#[derive(Debug, Default)]
pub struct ProviderPool {
    providers: RwLock<HashMap<String, PooledProvider>>,
}

impl ProviderPool {
    /// Create a new empty provider pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the provider for an endpoint, connecting it on first use
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn get_or_connect(&self, url: &str) -> Result<PooledProvider, RpcError> {
        if let Some(provider) = self.get(url) {
            return Ok(provider);
        }

        let mut providers = self.providers.write();
        // Another task may have connected while we waited for the write lock
        if let Some(provider) = providers.get(url) {
            return Ok(Arc::clone(provider));
        }

        let provider = Arc::new(create_http_provider(url)?);
        info!(url = url, "Added provider to pool");
        providers.insert(url.to_string(), Arc::clone(&provider));
        Ok(provider)
    }

    /// Get the provider for an endpoint if one is connected
    #[must_use]
    pub fn get(&self, url: &str) -> Option<PooledProvider> {
        self.providers.read().get(url).cloned()
    }

    /// Drop the provider for an endpoint
    pub fn remove(&self, url: &str) -> Option<PooledProvider> {
        let removed = self.providers.write().remove(url);
        if removed.is_some() {
            debug!(url = url, "Removed provider from pool");
        }
        removed
    }

    /// Check if a provider exists for an endpoint
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.providers.read().contains_key(url)
    }

    /// Get the number of providers in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// Check if the pool is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all providers from the pool
    pub fn clear(&self) {
        self.providers.write().clear();
        info!("Cleared all providers from pool");
    }
}

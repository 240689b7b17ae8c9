// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests against a live node with the demo registry deployed
//!
//! Run with a local anvil or besu node that has the demo contracts deployed:
//!
//! ```bash
//! RPC_URL=http://localhost:8545 cargo test --test live_registry_tests -- --ignored
//! ```

use std::time::Duration;

use entityscan::config::constants::demo;
use entityscan::{AlloyReadGateway, VerificationCache, VerificationConfigBuilder};

fn rpc_url() -> anyhow::Result<String> {
    Ok(dotenvy::var("RPC_URL")?)
}

/// The registry contract itself is not a registered entity, and the lookup
/// round trip fills the cache either way
#[tokio::test]
#[ignore = "requires a node with the demo registry deployed (RPC_URL)"]
async fn test_live_lookup_fills_cache() -> anyhow::Result<()> {
    let config = VerificationConfigBuilder::new()
        .rpc_server(rpc_url()?)
        .rpc_timeout(Duration::from_secs(10))
        .build();
    let gateway = AlloyReadGateway::new(config.rpc_timeout);
    let cache = VerificationCache::new(config, gateway);

    let verified = cache.verify_address(&demo::ENTITY_REGISTRY.to_string()).await;

    assert!(!verified);
    assert_eq!(
        cache.is_address_verified(&demo::ENTITY_REGISTRY.to_string()),
        Some(false)
    );
    Ok(())
}

/// An unreachable endpoint is reported as unverified and cached
#[tokio::test]
#[ignore = "opens a TCP connection to a closed local port"]
async fn test_unreachable_node_fails_closed() {
    let config = VerificationConfigBuilder::new()
        .rpc_server("http://127.0.0.1:9")
        .rpc_timeout(Duration::from_secs(2))
        .build();
    let gateway = AlloyReadGateway::new(config.rpc_timeout);
    let cache = VerificationCache::new(config, gateway);
    let entity = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    assert!(!cache.verify_address(entity).await);
    assert_eq!(cache.is_address_verified(entity), Some(false));
}

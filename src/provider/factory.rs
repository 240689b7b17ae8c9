// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_network::Ethereum;
use alloy_provider::ProviderBuilder;
use tracing::warn;

use crate::errors::RpcError;

use super::EthereumHttpProvider;

/// Create an HTTP provider for a single RPC endpoint
///
/// Returns a bare `RootProvider` without fillers. Registry lookups are plain
/// `eth_call`s, so nonce, gas and chain-id fillers would only add round trips.
///
/// Note: RPC request/response logging is handled natively by alloy's transport
/// layer at DEBUG/TRACE level.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(url: &str) -> Result<EthereumHttpProvider, RpcError> {
    let parsed_url: url::Url = url.trim().parse().map_err(|e| {
        warn!(url = url, error = ?e, "Invalid provider URL");
        RpcError::ProviderUrlInvalid(url.to_string())
    })?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<Ethereum>()
        .connect_http(parsed_url))
}

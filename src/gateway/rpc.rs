// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-backed read call gateway

use std::time::Duration;

use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_network::TransactionBuilder;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use tracing::{debug, Instrument};

use crate::config::DEFAULT_RPC_TIMEOUT;
use crate::errors::{ContractCallError, RpcError};
use crate::provider::ProviderPool;
use crate::spans;

use super::{CallOptions, ContractDescriptor, ReadCallGateway};

/// Gateway that executes `eth_call` over HTTP through alloy providers
///
/// Providers are created lazily per endpoint and reused for the lifetime of
/// the gateway. Each call is bounded by the configured timeout.
#[derive(Debug)]
pub struct AlloyReadGateway {
    pool: ProviderPool,
    timeout: Duration,
}

impl Default for AlloyReadGateway {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_TIMEOUT)
    }
}

impl AlloyReadGateway {
    /// Create a gateway with the given per-call timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            pool: ProviderPool::new(),
            timeout,
        }
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Providers connected so far
    pub fn pool(&self) -> &ProviderPool {
        &self.pool
    }
}

/// Build the `eth_call` request invoking `function` on `contract`
///
/// # Errors
///
/// Returns an error if the arguments do not match the function inputs.
pub(crate) fn build_call_request(
    contract: &ContractDescriptor,
    function: &Function,
    options: &CallOptions,
    args: &[DynSolValue],
) -> Result<TransactionRequest, ContractCallError> {
    let input = function
        .abi_encode_input(args)
        .map_err(|e| ContractCallError::encode_failed(&function.name, e))?;

    let mut request = TransactionRequest::default()
        .with_to(contract.address)
        .with_input(input);
    if let Some(from) = options.from {
        request = request.with_from(from);
    }
    if let Some(gas_limit) = options.gas_limit {
        request = request.with_gas_limit(gas_limit);
    }
    if let Some(gas_price) = options.gas_price {
        request = request.with_gas_price(gas_price);
    }
    Ok(request)
}

#[async_trait]
impl ReadCallGateway for AlloyReadGateway {
    async fn call(
        &self,
        contract: &ContractDescriptor,
        method: &str,
        options: &CallOptions,
        args: &[DynSolValue],
        rpc_endpoint: &str,
    ) -> Result<Vec<DynSolValue>, ContractCallError> {
        let span = spans::registry_call(contract.address, method, rpc_endpoint);

        async move {
            let function = contract.function(method)?;
            let request = build_call_request(contract, function, options, args)?;
            let provider = self.pool.get_or_connect(rpc_endpoint)?;
            let operation = format!("eth_call {method}");

            let output = tokio::time::timeout(
                self.timeout,
                provider.call(request).block(options.block_tag),
            )
            .await
            .map_err(|_| RpcError::timeout(operation.clone(), self.timeout))?
            .map_err(|e| RpcError::call_failed(operation, e))?;

            debug!(bytes = output.len(), "Received call output");

            function
                .abi_decode_output(&output)
                .map_err(|e| ContractCallError::decode_failed(method, e))
        }
        .instrument(span)
        .await
    }
}

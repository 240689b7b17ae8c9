// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only contract call gateway
//!
//! The verification cache depends on exactly one capability: invoke a named
//! view method on a deployed contract and get the decoded outputs back. This
//! module defines that seam as the [`ReadCallGateway`] trait so the cache can
//! be driven by the alloy-backed [`AlloyReadGateway`] in production and by a
//! scripted mock in tests.
//!
//! Connection management, timeouts and transport errors belong to the
//! gateway; the cache never retries or batches.
//!
//! # Example
//!
//! ```rust,ignore
//! use entityscan::gateway::{AlloyReadGateway, CallOptions, ReadCallGateway};
//! use entityscan::registry::verification_registry;
//! use alloy_dyn_abi::DynSolValue;
//!
//! let gateway = AlloyReadGateway::new(Duration::from_secs(30));
//! let registry = verification_registry(registry_address);
//! let outputs = gateway
//!     .call(
//!         &registry,
//!         "isVerifiedEntity",
//!         &CallOptions::default(),
//!         &[DynSolValue::Address(entity)],
//!         "http://localhost:8545",
//!     )
//!     .await?;
//! ```

use alloy_dyn_abi::DynSolValue;
use alloy_eips::BlockId;
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::Address;
use async_trait::async_trait;

use crate::errors::ContractCallError;

mod rpc;

pub use rpc::AlloyReadGateway;

/// A deployed contract together with the ABI used to talk to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDescriptor {
    /// Deployment address
    pub address: Address,
    /// ABI fragment covering at least the methods that will be called
    pub abi: JsonAbi,
}

impl ContractDescriptor {
    /// Describe a contract from its address and a list of functions
    pub fn new(address: Address, functions: impl IntoIterator<Item = Function>) -> Self {
        let mut abi = JsonAbi::new();
        for function in functions {
            abi.functions
                .entry(function.name.clone())
                .or_default()
                .push(function);
        }
        Self { address, abi }
    }

    /// Look up a function by name
    ///
    /// Overloads are not distinguished; the first declaration wins.
    ///
    /// # Errors
    ///
    /// Returns [`ContractCallError::MethodNotFound`] if the ABI has no
    /// function with that name.
    pub fn function(&self, method: &str) -> Result<&Function, ContractCallError> {
        self.abi
            .function(method)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| ContractCallError::MethodNotFound {
                method: method.to_string(),
            })
    }
}

/// Options forwarded to `eth_call`
///
/// Every field is optional except the block tag, which defaults to `latest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    /// Caller address seen by the contract (`msg.sender`)
    pub from: Option<Address>,
    /// Gas cap for the simulated call
    pub gas_limit: Option<u64>,
    /// Gas price for the simulated call, in wei
    pub gas_price: Option<u128>,
    /// Block the call executes against
    pub block_tag: BlockId,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            from: None,
            gas_limit: None,
            gas_price: None,
            block_tag: BlockId::latest(),
        }
    }
}

/// Capability to run a read-only method on a deployed contract
///
/// Implementations own connections and timeouts. A call either resolves to
/// the decoded output values, in declaration order, or fails with a
/// [`ContractCallError`].
#[async_trait]
pub trait ReadCallGateway: Send + Sync {
    /// Invoke `method` on `contract` at the node behind `rpc_endpoint`
    async fn call(
        &self,
        contract: &ContractDescriptor,
        method: &str,
        options: &CallOptions,
        args: &[DynSolValue],
        rpc_endpoint: &str,
    ) -> Result<Vec<DynSolValue>, ContractCallError>;
}

#[async_trait]
impl<G> ReadCallGateway for std::sync::Arc<G>
where
    G: ReadCallGateway + ?Sized,
{
    async fn call(
        &self,
        contract: &ContractDescriptor,
        method: &str,
        options: &CallOptions,
        args: &[DynSolValue],
        rpc_endpoint: &str,
    ) -> Result<Vec<DynSolValue>, ContractCallError> {
        (**self)
            .call(contract, method, options, args, rpc_endpoint)
            .await
    }
}

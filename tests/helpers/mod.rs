// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for entityscan integration tests
//!
//! Provides a scripted [`ReadCallGateway`] so the verification cache can be
//! exercised without a running node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;
use async_trait::async_trait;
use entityscan::{CallOptions, ContractCallError, ContractDescriptor, ReadCallGateway, RpcError};
use tokio::sync::Notify;

pub const VERIFIED: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const UNVERIFIED: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub const FAILING: &str = "0xcccccccccccccccccccccccccccccccccccccccc";
pub const RPC_SERVER: &str = "http://localhost:8545";

/// Install a test subscriber once; honors `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// What the mock answers for one address
#[derive(Debug, Clone)]
pub enum MockResponse {
    Outputs(Vec<DynSolValue>),
    Failure(String),
    Panic(String),
}

/// One call as seen by the gateway
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub contract: Address,
    pub method: String,
    pub options: CallOptions,
    pub args: Vec<DynSolValue>,
    pub rpc_endpoint: String,
}

/// Scripted gateway
///
/// Answers per address (first argument), counts calls, and can hold every
/// call open until the test releases it.
///
/// # Example
///
/// ```rust,ignore
/// let gateway = Arc::new(
///     MockGateway::new()
///         .with_verdict(VERIFIED, true)
///         .with_failure(FAILING, "connection refused")
///         .gated(),
/// );
/// let cache = VerificationCache::new(config, Arc::clone(&gateway));
/// ```
pub struct MockGateway {
    responses: HashMap<String, MockResponse>,
    default: MockResponse,
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCall>>,
    gated: bool,
    entered: Notify,
    release: Notify,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create a gateway that reports every address as unverified
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default: MockResponse::Outputs(vec![DynSolValue::Bool(false)]),
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
            gated: false,
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Answer `bool` for `address`
    pub fn with_verdict(self, address: &str, verified: bool) -> Self {
        self.with_outputs(address, vec![DynSolValue::Bool(verified)])
    }

    /// Answer raw output values for `address`
    pub fn with_outputs(mut self, address: &str, outputs: Vec<DynSolValue>) -> Self {
        self.responses
            .insert(address.to_lowercase(), MockResponse::Outputs(outputs));
        self
    }

    /// Fail every call for `address`
    pub fn with_failure(mut self, address: &str, message: &str) -> Self {
        self.responses
            .insert(address.to_lowercase(), MockResponse::Failure(message.to_string()));
        self
    }

    /// Panic inside the call for `address`
    pub fn with_panic(mut self, address: &str, message: &str) -> Self {
        self.responses
            .insert(address.to_lowercase(), MockResponse::Panic(message.to_string()));
        self
    }

    /// Hold every call until [`release`](Self::release) is called
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Total number of calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls received for `address`
    pub fn calls_for(&self, address: &str) -> usize {
        let address = address.to_lowercase();
        self.recorded()
            .iter()
            .filter(|call| argument_key(&call.args).as_deref() == Some(address.as_str()))
            .count()
    }

    /// Every call received so far
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.recorded.lock().unwrap().clone()
    }

    /// Wait until a gated call has started
    pub async fn wait_entered(&self) {
        tokio::time::timeout(Duration::from_secs(5), self.entered.notified())
            .await
            .expect("gateway call never started");
    }

    /// Let one gated call proceed
    pub fn release(&self) {
        self.release.notify_one();
    }
}

fn argument_key(args: &[DynSolValue]) -> Option<String> {
    match args.first() {
        Some(DynSolValue::Address(address)) => Some(address.to_string().to_lowercase()),
        _ => None,
    }
}

#[async_trait]
impl ReadCallGateway for MockGateway {
    async fn call(
        &self,
        contract: &ContractDescriptor,
        method: &str,
        options: &CallOptions,
        args: &[DynSolValue],
        rpc_endpoint: &str,
    ) -> Result<Vec<DynSolValue>, ContractCallError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(RecordedCall {
            contract: contract.address,
            method: method.to_string(),
            options: options.clone(),
            args: args.to_vec(),
            rpc_endpoint: rpc_endpoint.to_string(),
        });

        if self.gated {
            self.entered.notify_one();
            self.release.notified().await;
        }

        let response = argument_key(args)
            .and_then(|key| self.responses.get(&key).cloned())
            .unwrap_or_else(|| self.default.clone());

        match response {
            MockResponse::Outputs(outputs) => Ok(outputs),
            MockResponse::Failure(message) => Err(RpcError::call_failed(
                format!("eth_call {method}"),
                std::io::Error::other(message),
            )
            .into()),
            MockResponse::Panic(message) => panic!("{message}"),
        }
    }
}

/// Poll `condition` until it holds or a few seconds pass
pub async fn eventually<F>(mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

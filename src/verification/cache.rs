// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use futures::future::{BoxFuture, Shared};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn, Instrument};

use crate::address::NormalizedAddress;
use crate::config::constants::IS_VERIFIED_ENTITY;
use crate::config::VerificationConfig;
use crate::errors::ContractCallError;
use crate::gateway::{CallOptions, ContractDescriptor, ReadCallGateway};
use crate::registry::{decode_verdict, verification_registry, Verdict};
use crate::spans;

use super::badge::VerificationBadge;
use super::InFlightPolicy;

type SharedLookup = Shared<BoxFuture<'static, bool>>;

/// A lookup that has been started and not yet settled
struct InFlight {
    /// Unique per started lookup
    id: u64,
    lookup: SharedLookup,
}

/// Read-through cache of entity verification results
///
/// Cloning is cheap and every clone shares the same cache, pending set and
/// workspace endpoint, so one instance can be handed to every consumer.
///
/// # Invariants
///
/// - Keys are always [`NormalizedAddress`]es; callers may pass any case.
/// - An address is either cached, pending, or unknown. A settled lookup writes
///   its result before it leaves the pending set.
/// - A lookup started before [`clear_verification_cache`](Self::clear_verification_cache)
///   never writes into the cleared cache.
#[derive(Clone)]
pub struct VerificationCache {
    inner: Arc<Inner>,
}

struct Inner {
    gateway: Arc<dyn ReadCallGateway>,
    registry: Option<Arc<ContractDescriptor>>,
    rpc_server: RwLock<Option<String>>,
    policy: InFlightPolicy,
    entries: Mutex<HashMap<NormalizedAddress, bool>>,
    pending: Mutex<HashMap<NormalizedAddress, InFlight>>,
    /// Bumped on every clear
    generation: AtomicU64,
    next_lookup: AtomicU64,
}

impl VerificationCache {
    /// Create an empty cache that asks `gateway` on misses
    pub fn new<G>(config: VerificationConfig, gateway: G) -> Self
    where
        G: ReadCallGateway + 'static,
    {
        let registry = config
            .verification_contract_address
            .map(|address| Arc::new(verification_registry(address)));

        Self {
            inner: Arc::new(Inner {
                gateway: Arc::new(gateway),
                registry,
                rpc_server: RwLock::new(config.rpc_server),
                policy: config.in_flight_policy,
                entries: Mutex::new(HashMap::new()),
                pending: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
                next_lookup: AtomicU64::new(0),
            }),
        }
    }

    /// Whether a verification registry is configured
    pub fn has_verification_contract(&self) -> bool {
        self.inner.registry.is_some()
    }

    /// Address of the configured verification registry
    pub fn verification_contract_address(&self) -> Option<alloy_primitives::Address> {
        self.inner.registry.as_ref().map(|registry| registry.address)
    }

    /// RPC endpoint of the active workspace
    pub fn rpc_server(&self) -> Option<String> {
        self.inner.rpc_server.read().clone()
    }

    /// Cached verification status of `address`
    ///
    /// Returns `None` when no registry is configured, the address is empty, or
    /// the address has not been looked up yet. Never touches the network.
    pub fn is_address_verified(&self, address: &str) -> Option<bool> {
        if address.is_empty() || !self.has_verification_contract() {
            return None;
        }
        let key = NormalizedAddress::new(address);
        self.inner.entries.lock().get(&key).copied()
    }

    /// Find out whether `address` is a verified entity
    ///
    /// Returns `false` without a network call when the address is empty, no
    /// registry is configured, or the active workspace has no RPC endpoint.
    /// Cached answers are returned as is. If a lookup for the same address is
    /// already running, the result depends on the [`InFlightPolicy`]:
    /// `ReportUnverified` returns `false` right away, `Coalesce` waits for the
    /// running lookup.
    ///
    /// Otherwise the registry is asked. Failures, including a panicking
    /// gateway, are logged and cached as `false`.
    ///
    /// Inside a tokio runtime the lookup runs on its own task, so it completes
    /// and fills the cache even if this future is dropped. On any other
    /// executor the lookup runs inline and is abandoned, leaving nothing
    /// pending, when this future is dropped.
    pub async fn verify_address(&self, address: &str) -> bool {
        let Some(key) = NormalizedAddress::non_empty(address) else {
            return false;
        };
        let span = spans::verify_address(&key);

        async move {
            let Some(registry) = self.inner.registry.clone() else {
                return false;
            };
            let Some(rpc_server) = self.rpc_server() else {
                debug!("No RPC endpoint for the active workspace");
                return false;
            };

            let (lookup, _caller_slot) = {
                let mut pending = self.inner.pending.lock();

                if let Some(verified) = self.inner.entries.lock().get(&key).copied() {
                    debug!(verified, "Verification cache hit");
                    return verified;
                }

                match pending.get(&key) {
                    Some(in_flight) => match self.inner.policy {
                        InFlightPolicy::ReportUnverified => {
                            debug!("Verification already in flight");
                            return false;
                        }
                        InFlightPolicy::Coalesce => {
                            debug!("Joining in-flight verification");
                            (in_flight.lookup.clone(), None)
                        }
                    },
                    None => {
                        let id = self.inner.next_lookup.fetch_add(1, Ordering::SeqCst);
                        let (lookup, caller_slot) = Inner::start_lookup(
                            Arc::clone(&self.inner),
                            registry,
                            key.clone(),
                            rpc_server,
                            id,
                        );
                        pending.insert(
                            key,
                            InFlight {
                                id,
                                lookup: lookup.clone(),
                            },
                        );
                        (lookup, caller_slot)
                    }
                }
            };

            lookup.await
        }
        .instrument(span)
        .await
    }

    /// Verify several addresses concurrently
    ///
    /// Empty strings are skipped. Results are keyed by normalized address;
    /// when the same address appears more than once, the answer that settles
    /// last wins.
    pub async fn verify_addresses<I, S>(&self, addresses: I) -> HashMap<NormalizedAddress, bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lookups: FuturesUnordered<_> = addresses
            .into_iter()
            .filter_map(|address| NormalizedAddress::non_empty(address.as_ref()))
            .map(|key| async move {
                let verified = self.verify_address(key.as_str()).await;
                (key, verified)
            })
            .collect();

        let span = spans::verify_addresses(lookups.len());

        async move {
            let mut results = HashMap::with_capacity(lookups.len());
            while let Some((key, verified)) = lookups.next().await {
                results.insert(key, verified);
            }
            results
        }
        .instrument(span)
        .await
    }

    /// Drop every cached result and forget in-flight lookups
    ///
    /// Lookups still running keep going but their results are discarded.
    pub fn clear_verification_cache(&self) {
        let abandoned = {
            let mut pending = self.inner.pending.lock();
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            std::mem::take(&mut *pending)
        };
        drop(abandoned);
        self.inner.entries.lock().clear();
        debug!("Cleared verification cache");
    }

    /// Point the cache at another workspace's RPC endpoint
    ///
    /// Results obtained from the previous endpoint are no longer trustworthy,
    /// so the cache is cleared.
    pub fn switch_workspace(&self, rpc_server: Option<String>) {
        info!(rpc_server = ?rpc_server, "Switching verification workspace");
        *self.inner.rpc_server.write() = rpc_server;
        self.clear_verification_cache();
    }

    /// Badge to show next to `address`, if it is known to be verified
    pub fn verification_badge(&self, address: &str, size: &str) -> Option<VerificationBadge> {
        match self.is_address_verified(address) {
            Some(true) => Some(VerificationBadge::verified(size)),
            _ => None,
        }
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups currently in flight
    pub fn pending_count(&self) -> usize {
        self.inner.pending.lock().len()
    }
}

impl fmt::Debug for VerificationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationCache")
            .field("verification_contract", &self.verification_contract_address())
            .field("rpc_server", &self.rpc_server())
            .field("policy", &self.inner.policy)
            .field("cached", &self.len())
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl Inner {
    /// Start a lookup for `key`
    ///
    /// Inside a tokio runtime the lookup is spawned. Elsewhere it runs inline
    /// on whoever polls it, and the caller gets a slot that releases the
    /// pending entry if it stops polling early.
    fn start_lookup(
        inner: Arc<Inner>,
        registry: Arc<ContractDescriptor>,
        key: NormalizedAddress,
        rpc_server: String,
        id: u64,
    ) -> (SharedLookup, Option<PendingSlot>) {
        let generation = inner.generation.load(Ordering::SeqCst);
        let span = spans::lookup(&key, registry.address);
        let lookup = Inner::guarded_lookup(
            Arc::clone(&inner),
            registry,
            key.clone(),
            rpc_server,
            generation,
            id,
        )
        .instrument(span);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let task = runtime.spawn(lookup);
                let shared = task
                    .map(move |joined| match joined {
                        Ok(verified) => verified,
                        Err(error) => {
                            warn!(
                                address = %key,
                                error = %error,
                                "Verification task did not finish, recording address as unverified"
                            );
                            inner.record(key, generation, false);
                            false
                        }
                    })
                    .boxed()
                    .shared();
                (shared, None)
            }
            Err(_) => {
                debug!("No tokio runtime, running verification inline");
                let slot = PendingSlot { inner, key, id };
                (lookup.boxed().shared(), Some(slot))
            }
        }
    }

    /// Run a lookup, turning a panic into a cached `false`
    async fn guarded_lookup(
        inner: Arc<Inner>,
        registry: Arc<ContractDescriptor>,
        key: NormalizedAddress,
        rpc_server: String,
        generation: u64,
        id: u64,
    ) -> bool {
        let recorder = Arc::clone(&inner);
        let failed_key = key.clone();

        let lookup = Inner::lookup(inner, registry, key, rpc_server, generation, id);
        match AssertUnwindSafe(lookup).catch_unwind().await {
            Ok(verified) => verified,
            Err(panic) => {
                warn!(
                    address = %failed_key,
                    panic = panic_message(panic.as_ref()),
                    "Verification lookup panicked, recording address as unverified"
                );
                recorder.record(failed_key, generation, false);
                false
            }
        }
    }

    async fn lookup(
        inner: Arc<Inner>,
        registry: Arc<ContractDescriptor>,
        key: NormalizedAddress,
        rpc_server: String,
        generation: u64,
        id: u64,
    ) -> bool {
        let _slot = PendingSlot {
            inner: Arc::clone(&inner),
            key: key.clone(),
            id,
        };

        let verified = match inner.query(&registry, &key, &rpc_server).await {
            Ok(verdict) => {
                info!(
                    verified = verdict.verified,
                    encoding = %verdict.encoding,
                    "Verification lookup settled"
                );
                verdict.verified
            }
            Err(error) => {
                warn!(
                    error = %error,
                    rpc_server = %rpc_server,
                    "Verification lookup failed, recording address as unverified"
                );
                false
            }
        };

        inner.record(key, generation, verified);
        verified
    }

    /// Cache `verified` unless the cache was cleared since `generation`
    fn record(&self, key: NormalizedAddress, generation: u64, verified: bool) {
        let mut entries = self.entries.lock();
        if self.generation.load(Ordering::SeqCst) == generation {
            entries.insert(key, verified);
        } else {
            debug!("Cache cleared during lookup, discarding result");
        }
    }

    async fn query(
        &self,
        registry: &ContractDescriptor,
        key: &NormalizedAddress,
        rpc_server: &str,
    ) -> Result<Verdict, ContractCallError> {
        let entity = key.to_evm_address()?;
        let outputs = self
            .gateway
            .call(
                registry,
                IS_VERIFIED_ENTITY,
                &CallOptions::default(),
                &[DynSolValue::Address(entity)],
                rpc_server,
            )
            .await?;
        debug!(?outputs, "Raw verification result");
        Ok(decode_verdict(&outputs))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Removes its lookup from the pending set when dropped
///
/// Lives for the whole lookup so the entry goes away on success, failure and
/// task teardown alike.
struct PendingSlot {
    inner: Arc<Inner>,
    key: NormalizedAddress,
    id: u64,
}

impl Drop for PendingSlot {
    fn drop(&mut self) {
        let removed = {
            let mut pending = self.inner.pending.lock();
            // After a clear the key may belong to a newer lookup
            if pending
                .get(&self.key)
                .is_some_and(|in_flight| in_flight.id == self.id)
            {
                pending.remove(&self.key)
            } else {
                None
            }
        };
        // Dropping an inline lookup runs its own slot, which takes the lock
        drop(removed);
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # entityscan
//!
//! Entity verification for EVM block explorers.
//!
//! An explorer renders many addresses per page and wants to mark the ones that
//! an on-chain entity registry lists as verified. `entityscan` answers that
//! question with a read-through cache in front of the registry's
//! `isVerifiedEntity(address)` view method, and also tells explorer views
//! which items involve a configured "special" token.
//!
//! ## Modules
//!
//! - [`verification`] - The verification cache and badge descriptor
//! - [`gateway`] - Read-only contract call seam and its alloy implementation
//! - [`registry`] - Registry ABI and verdict decoding
//! - [`special_token`] - Special token highlighting
//! - [`provider`] - HTTP provider creation and pooling
//! - [`config`] - Configuration, environment loading and well-known addresses
//! - [`errors`] - Error types
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use entityscan::{AlloyReadGateway, VerificationCache, VerificationConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VerificationConfig::from_env()?;
//! let gateway = AlloyReadGateway::new(config.rpc_timeout);
//! let cache = VerificationCache::new(config, gateway);
//!
//! let verified = cache
//!     .verify_address("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
//!     .await;
//! println!("verified: {verified}");
//!
//! // Synchronous read from the cache, never touches the network
//! assert_eq!(
//!     cache.is_address_verified("0x70997970c51812dc3a010c7d01b50e0d17dc79c8"),
//!     Some(verified)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtimes
//!
//! Under tokio, each registry lookup is spawned and finishes even if its
//! caller goes away. The cache also works on other executors. There the lookup
//! runs inline on the awaiting task. [`AlloyReadGateway`] enforces its timeout
//! with tokio timers, so it still needs a tokio runtime.
//!
//! ## Workspaces
//!
//! Each explorer workspace has its own RPC endpoint. Switching workspaces
//! clears every cached answer:
//!
//! ```rust,no_run
//! # use entityscan::{AlloyReadGateway, VerificationCache, VerificationConfig};
//! # let cache = VerificationCache::new(VerificationConfig::default(), AlloyReadGateway::default());
//! cache.switch_workspace(Some("http://localhost:9545".to_string()));
//! assert!(cache.is_empty());
//! ```

pub mod address;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod provider;
pub mod registry;
pub mod special_token;
pub mod verification;

mod spans;

pub use address::NormalizedAddress;
pub use config::{VerificationConfig, VerificationConfigBuilder};
pub use errors::{ConfigError, ContractCallError, EntityscanError, RpcError};
pub use gateway::{AlloyReadGateway, CallOptions, ContractDescriptor, ReadCallGateway};
pub use registry::{decode_verdict, Verdict, VerdictEncoding};
pub use special_token::SpecialTokenMatcher;
pub use verification::{InFlightPolicy, VerificationBadge, VerificationCache, DEFAULT_BADGE_SIZE};

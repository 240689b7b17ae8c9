//! Configuration for entityscan operations
//!
//! This module provides the configuration that the verification cache and
//! the alloy gateway are built from: which registry to query, which RPC
//! endpoint belongs to the active workspace, and how long to wait for it.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use entityscan::VerificationConfig;
//!
//! // Default registry address, no workspace endpoint yet
//! let config = VerificationConfig::default();
//! assert!(config.has_verification_contract());
//! assert!(config.rpc_server.is_none());
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use entityscan::{InFlightPolicy, VerificationConfigBuilder};
//! use std::time::Duration;
//!
//! let config = VerificationConfigBuilder::new()
//!     .rpc_server("http://localhost:8545")
//!     .rpc_timeout(Duration::from_secs(5))
//!     .in_flight_policy(InFlightPolicy::Coalesce)
//!     .build();
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,no_run
//! use entityscan::VerificationConfig;
//!
//! // Reads VERIFICATION_CONTRACT_ADDRESS, RPC_SERVER, SPECIAL_TOKEN_ADDRESS
//! // and RPC_TIMEOUT_SECS (a `.env` file is honored)
//! let config = VerificationConfig::from_env()?;
//! # Ok::<(), entityscan::ConfigError>(())
//! ```

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;

use crate::errors::ConfigError;
use crate::verification::InFlightPolicy;

pub mod constants;

use constants::DEFAULT_VERIFICATION_CONTRACT;

/// Environment variable naming the verification contract
pub const ENV_VERIFICATION_CONTRACT: &str = "VERIFICATION_CONTRACT_ADDRESS";
/// Environment variable naming the active workspace RPC endpoint
pub const ENV_RPC_SERVER: &str = "RPC_SERVER";
/// Environment variable naming the special token contract
pub const ENV_SPECIAL_TOKEN: &str = "SPECIAL_TOKEN_ADDRESS";
/// Environment variable holding the RPC timeout in whole seconds
pub const ENV_RPC_TIMEOUT_SECS: &str = "RPC_TIMEOUT_SECS";

/// Default timeout for a single registry call
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for entity verification
///
/// Use [`VerificationConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Registry exposing `isVerifiedEntity(address)`
    /// Default: [`DEFAULT_VERIFICATION_CONTRACT`]. `None` disables verification.
    pub verification_contract_address: Option<Address>,

    /// RPC endpoint of the active workspace
    /// Default: None (every lookup short-circuits to "not verified")
    pub rpc_server: Option<String>,

    /// Token contract that explorer views highlight
    /// Default: None
    pub special_token_address: Option<String>,

    /// Timeout for a single registry call, enforced by the alloy gateway
    /// Default: 30 seconds
    pub rpc_timeout: Duration,

    /// What a caller sees when the address it asks about is already in flight
    /// Default: [`InFlightPolicy::ReportUnverified`]
    pub in_flight_policy: InFlightPolicy,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verification_contract_address: Some(DEFAULT_VERIFICATION_CONTRACT),
            rpc_server: None,
            special_token_address: None,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            in_flight_policy: InFlightPolicy::default(),
        }
    }
}

impl VerificationConfig {
    /// Load configuration from the process environment
    ///
    /// An empty or unset `VERIFICATION_CONTRACT_ADDRESS` falls back to the
    /// default registry. Empty `RPC_SERVER` / `SPECIAL_TOKEN_ADDRESS` count
    /// as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an address or the timeout cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// [`from_env`](Self::from_env) is this function over `dotenvy::var`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an address or the timeout cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = non_empty(ENV_VERIFICATION_CONTRACT) {
            let address =
                Address::from_str(value.trim()).map_err(|_| ConfigError::InvalidAddress {
                    key: ENV_VERIFICATION_CONTRACT.to_string(),
                    value: value.clone(),
                })?;
            config.verification_contract_address = Some(address);
        }

        config.rpc_server = non_empty(ENV_RPC_SERVER).map(|v| v.trim().to_string());

        if let Some(value) = non_empty(ENV_SPECIAL_TOKEN) {
            Address::from_str(value.trim()).map_err(|_| ConfigError::InvalidAddress {
                key: ENV_SPECIAL_TOKEN.to_string(),
                value: value.clone(),
            })?;
            config.special_token_address = Some(value.trim().to_ascii_lowercase());
        }

        if let Some(value) = non_empty(ENV_RPC_TIMEOUT_SECS) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    key: ENV_RPC_TIMEOUT_SECS.to_string(),
                    value: value.clone(),
                })?;
            config.rpc_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Whether a verification registry is configured
    pub fn has_verification_contract(&self) -> bool {
        self.verification_contract_address.is_some()
    }
}

/// Builder for [`VerificationConfig`]
///
/// Starts from [`VerificationConfig::default`].
///
/// # Example
///
/// ```rust
/// use entityscan::VerificationConfigBuilder;
/// use alloy_primitives::address;
///
/// let config = VerificationConfigBuilder::new()
///     .verification_contract(address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"))
///     .rpc_server("http://localhost:8545")
///     .special_token("0x2279B7A0a67DB372996a5FaB50D91eAA73d2eBe6")
///     .build();
///
/// assert_eq!(
///     config.special_token_address.as_deref(),
///     Some("0x2279b7a0a67db372996a5fab50d91eaa73d2ebe6")
/// );
/// ```
#[derive(Debug, Default)]
pub struct VerificationConfigBuilder {
    config: VerificationConfig,
}

impl VerificationConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Query a specific verification registry
    pub fn verification_contract(mut self, address: Address) -> Self {
        self.config.verification_contract_address = Some(address);
        self
    }

    /// Disable verification entirely
    ///
    /// Every lookup then reports "not verified" and cached reads report unknown.
    pub fn without_verification_contract(mut self) -> Self {
        self.config.verification_contract_address = None;
        self
    }

    /// Set the RPC endpoint of the active workspace
    pub fn rpc_server(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_server = Some(url.into());
        self
    }

    /// Set the special token address (stored lowercase)
    pub fn special_token(mut self, address: impl AsRef<str>) -> Self {
        self.config.special_token_address = Some(address.as_ref().to_ascii_lowercase());
        self
    }

    /// Set the per-call RPC timeout
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc_timeout = timeout;
        self
    }

    /// Choose how concurrent lookups for the same address behave
    pub fn in_flight_policy(mut self, policy: InFlightPolicy) -> Self {
        self.config.in_flight_policy = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> VerificationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_uses_demo_registry() {
        let config = VerificationConfig::default();
        assert_eq!(
            config.verification_contract_address,
            Some(DEFAULT_VERIFICATION_CONTRACT)
        );
        assert_eq!(config.rpc_timeout, Duration::from_secs(30));
        assert_eq!(config.in_flight_policy, InFlightPolicy::ReportUnverified);
    }

    #[test]
    fn test_from_lookup_empty_environment() {
        let config = VerificationConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, VerificationConfig::default());
    }

    #[test]
    fn test_from_lookup_empty_contract_falls_back_to_default() {
        let config =
            VerificationConfig::from_lookup(lookup_from(&[(ENV_VERIFICATION_CONTRACT, "")]))
                .unwrap();
        assert_eq!(
            config.verification_contract_address,
            Some(DEFAULT_VERIFICATION_CONTRACT)
        );
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = VerificationConfig::from_lookup(lookup_from(&[
            (
                ENV_VERIFICATION_CONTRACT,
                "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0",
            ),
            (ENV_RPC_SERVER, " http://localhost:8545 "),
            (
                ENV_SPECIAL_TOKEN,
                "0x2279B7A0a67DB372996a5FaB50D91eAA73d2eBe6",
            ),
            (ENV_RPC_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(
            config.verification_contract_address,
            Some(address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"))
        );
        assert_eq!(config.rpc_server.as_deref(), Some("http://localhost:8545"));
        assert_eq!(
            config.special_token_address.as_deref(),
            Some("0x2279b7a0a67db372996a5fab50d91eaa73d2ebe6")
        );
        assert_eq!(config.rpc_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_rejects_bad_contract() {
        let err = VerificationConfig::from_lookup(lookup_from(&[(
            ENV_VERIFICATION_CONTRACT,
            "0x1234",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err =
            VerificationConfig::from_lookup(lookup_from(&[(ENV_RPC_TIMEOUT_SECS, "soon")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_builder_without_contract() {
        let config = VerificationConfigBuilder::new()
            .without_verification_contract()
            .build();
        assert!(!config.has_verification_contract());
    }
}

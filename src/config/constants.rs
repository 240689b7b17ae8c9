//! Well-known addresses and constants
//!
//! This module centralizes the contract addresses of the local CBDC demo
//! deployment (deterministic anvil addresses from the deploy script) and the
//! names of the registry methods the crate calls.

use alloy_primitives::{address, Address};

/// Verification contract queried when nothing else is configured
///
/// This is the first contract deployed by the demo script on a fresh anvil
/// node, which is where the explorer expects the verification registry.
///
/// Contract: 0x5FbDB2315678afecb367f032d93F642f64180aa3
pub const DEFAULT_VERIFICATION_CONTRACT: Address =
    address!("5fbdb2315678afecb367f032d93f642f64180aa3");

/// Registry method answering "is this address a verified entity?"
pub const IS_VERIFIED_ENTITY: &str = "isVerifiedEntity";

/// Human-readable ABI of [`IS_VERIFIED_ENTITY`]
pub const IS_VERIFIED_ENTITY_SIGNATURE: &str =
    "function isVerifiedEntity(address _entity) view returns (bool)";

/// Contracts of the local demo deployment
pub mod demo {
    use super::*;

    /// Entity registry holding verified entities
    ///
    /// Contract: 0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0
    pub const ENTITY_REGISTRY: Address = address!("9fe46736679d2d9a65f0992f2272de9f3c7fa6e0");

    /// Compliance registry routing checks to compliance modules
    ///
    /// Contract: 0x0165878A594ca255338adfa4d48449f69242Eb8F
    pub const COMPLIANCE_REGISTRY: Address =
        address!("0165878a594ca255338adfa4d48449f69242eb8f");

    /// e-VND compliant token, the special token highlighted by explorers
    ///
    /// Contract: 0x2279B7A0a67DB372996a5FaB50D91eAA73d2eBe6
    pub const COMPLIANT_TOKEN: Address = address!("2279b7a0a67db372996a5fab50d91eaa73d2ebe6");

    /// Exchange portal for fiat on/off ramps
    ///
    /// Contract: 0x67d269191c92Caf3cD7723F116c85e6E9bf55933
    pub const EXCHANGE_PORTAL: Address = address!("67d269191c92caf3cd7723f116c85e6e9bf55933");
}

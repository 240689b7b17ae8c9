// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Case-insensitive account identifiers
//!
//! Explorer views hand us addresses in whatever case they were rendered in
//! (checksummed, lowercase, or pasted by a user). Every lookup, cache key and
//! comparison goes through [`NormalizedAddress`], which stores the lowercase
//! form, so `0xABC…` and `0xabc…` always refer to the same entry.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::errors::ContractCallError;

/// Lowercase string form of an account identifier
///
/// # Invariant
///
/// The inner string never contains uppercase ASCII characters. The only way
/// to build one is through [`NormalizedAddress::new`] (or `From`/`Deserialize`,
/// which delegate to it).
///
/// # Examples
///
/// ```
/// use entityscan::NormalizedAddress;
///
/// let a = NormalizedAddress::new("0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
/// let b = NormalizedAddress::new("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedAddress(String);

impl NormalizedAddress {
    /// Normalize an address string
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().to_ascii_lowercase())
    }

    /// Normalize an address, returning `None` for the empty string
    ///
    /// Callers treat an empty address the same as a missing one.
    pub fn non_empty(address: &str) -> Option<Self> {
        if address.is_empty() {
            None
        } else {
            Some(Self::new(address))
        }
    }

    /// Borrow the lowercase string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a 20-byte EVM address for use as a contract call argument
    ///
    /// # Errors
    ///
    /// Returns [`ContractCallError::InvalidAddress`] if the string is not a
    /// hex-encoded 20-byte address.
    pub fn to_evm_address(&self) -> Result<Address, ContractCallError> {
        Address::from_str(&self.0).map_err(|e| ContractCallError::InvalidAddress {
            address: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NormalizedAddress {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for NormalizedAddress {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<Address> for NormalizedAddress {
    fn from(address: Address) -> Self {
        // Address's Display is EIP-55 checksummed
        Self::new(address.to_string())
    }
}

impl From<NormalizedAddress> for String {
    fn from(address: NormalizedAddress) -> Self {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_mixed_case_inputs_normalize_to_same_value() {
        let checksummed = NormalizedAddress::new("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let lower = NormalizedAddress::new("0x70997970c51812dc3a010c7d01b50e0d17dc79c8");
        let upper = NormalizedAddress::new("0X70997970C51812DC3A010C7D01B50E0D17DC79C8");

        assert_eq!(checksummed, lower);
        assert_eq!(upper.as_str(), "0x70997970c51812dc3a010c7d01b50e0d17dc79c8");
    }

    #[test]
    fn test_non_empty_rejects_empty_string() {
        assert!(NormalizedAddress::non_empty("").is_none());
        assert!(NormalizedAddress::non_empty("0xabc").is_some());
    }

    #[test]
    fn test_from_evm_address_is_lowercase() {
        let addr = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let normalized = NormalizedAddress::from(addr);
        assert_eq!(
            normalized.as_str(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }

    #[test]
    fn test_to_evm_address_round_trips_hex() {
        let normalized = NormalizedAddress::new("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
        let parsed = normalized.to_evm_address().unwrap();
        assert_eq!(parsed, address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"));
    }

    #[test]
    fn test_to_evm_address_rejects_garbage() {
        let normalized = NormalizedAddress::new("not-an-address");
        let err = normalized.to_evm_address().unwrap_err();
        assert!(matches!(err, ContractCallError::InvalidAddress { .. }));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let normalized: NormalizedAddress =
            serde_json::from_str("\"0xABCDEF0000000000000000000000000000000001\"").unwrap();
        assert_eq!(
            normalized.as_str(),
            "0xabcdef0000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(NormalizedAddress::new("0xAB"), true);
        assert_eq!(map.get("0xab"), Some(&true));
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Special token highlighting
//!
//! A deployment can nominate one token contract as "special" so that explorer
//! views highlight transactions, transfers and balances that involve it. The
//! shapes below mirror the explorer's camelCase JSON and only carry the fields
//! the matcher looks at; unknown fields are ignored on deserialization.
//!
//! # Example
//!
//! ```rust
//! use entityscan::special_token::{SpecialTokenMatcher, TransactionSummary};
//!
//! let matcher = SpecialTokenMatcher::new(Some("0xE7f1725E7734CE288F8367e1Bb143E90bb3F0512"));
//!
//! let tx: TransactionSummary = serde_json::from_str(
//!     r#"{ "to": "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512", "tokenTransfers": [] }"#,
//! )?;
//! assert!(matcher.has_special_token_transfer(&tx));
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::address::NormalizedAddress;
use crate::config::VerificationConfig;

/// CSS class explorer views put on highlighted rows
pub const SPECIAL_TOKEN_HIGHLIGHT_CLASS: &str = "special-token-highlight";

/// Token transfer emitted by a transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    /// Token contract that emitted the transfer
    #[serde(default)]
    pub token: Option<String>,
}

/// Token balance of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Token contract the balance is held in
    #[serde(default)]
    pub token: Option<String>,
}

/// Receipt fields relevant for highlighting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    /// Contract created by the transaction, if any
    #[serde(default)]
    pub contract_address: Option<String>,
}

/// Transaction fields relevant for highlighting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Recipient, absent for contract creations
    #[serde(default)]
    pub to: Option<String>,
    /// Token transfers emitted by the transaction; `null` reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub token_transfers: Vec<TokenTransfer>,
    /// Receipt, once the transaction is mined
    #[serde(default)]
    pub receipt: Option<ReceiptSummary>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decides whether explorer items involve the special token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialTokenMatcher {
    token: Option<NormalizedAddress>,
}

impl SpecialTokenMatcher {
    /// Create a matcher for `token`; `None` or an empty string disables it
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.and_then(NormalizedAddress::non_empty),
        }
    }

    /// Create a matcher from `special_token_address` in `config`
    pub fn from_config(config: &VerificationConfig) -> Self {
        Self::new(config.special_token_address.as_deref())
    }

    /// Whether a special token is configured
    pub fn has_special_token(&self) -> bool {
        self.token.is_some()
    }

    /// Normalized special token address
    pub fn special_token_address(&self) -> Option<&NormalizedAddress> {
        self.token.as_ref()
    }

    /// Whether `address` is the special token, ignoring case
    pub fn is_special_token(&self, address: &str) -> bool {
        match &self.token {
            Some(token) if !address.is_empty() => token.as_str().eq_ignore_ascii_case(address),
            _ => false,
        }
    }

    fn matches(&self, address: Option<&str>) -> bool {
        address.is_some_and(|address| self.is_special_token(address))
    }

    /// Whether `tx` involves the special token
    ///
    /// If the transaction carries token transfers, only they are consulted.
    /// Otherwise the recipient and then the created contract are checked.
    pub fn has_special_token_transfer(&self, tx: &TransactionSummary) -> bool {
        if !self.has_special_token() {
            return false;
        }

        if !tx.token_transfers.is_empty() {
            return tx
                .token_transfers
                .iter()
                .any(|transfer| self.is_special_token_transfer(transfer));
        }

        self.matches(tx.to.as_deref())
            || self.matches(
                tx.receipt
                    .as_ref()
                    .and_then(|receipt| receipt.contract_address.as_deref()),
            )
    }

    /// Whether `balance` is held in the special token
    pub fn is_special_token_balance(&self, balance: &TokenBalance) -> bool {
        self.matches(balance.token.as_deref())
    }

    /// Whether `transfer` moved the special token
    pub fn is_special_token_transfer(&self, transfer: &TokenTransfer) -> bool {
        self.matches(transfer.token.as_deref())
    }

    /// CSS class for highlighted items
    pub fn highlight_class(&self) -> &'static str {
        SPECIAL_TOKEN_HIGHLIGHT_CLASS
    }
}

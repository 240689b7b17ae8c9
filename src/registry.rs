// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Entity registry ABI and verdict decoding
//!
//! The verification registry exposes a single view method,
//! `isVerifiedEntity(address) returns (bool)`. Registries deployed by older
//! demo scripts, or proxies in front of them, do not always hand back a clean
//! `bool`, so the decoded output goes through [`decode_verdict`], which
//! enumerates every encoding we accept and how it maps to a verdict.
//!
//! | first output value                         | encoding   | verified               |
//! |--------------------------------------------|------------|------------------------|
//! | none                                       | `Empty`    | false                  |
//! | `bool`                                     | `Bool`     | the value              |
//! | `string`                                   | `Text`     | equals "true", any case|
//! | `address`, `bytes`, `bytesN`, `function`   | `Text`     | false                  |
//! | `uintN` / `intN`                           | `Number`   | value is non-zero      |
//! | arrays and tuples                          | `Fallback` | true                   |

use std::fmt;

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::{Function, Param, StateMutability};
use alloy_primitives::Address;
use serde::Serialize;

use crate::config::constants::IS_VERIFIED_ENTITY;
use crate::gateway::ContractDescriptor;

/// ABI of `isVerifiedEntity(address _entity) view returns (bool)`
pub fn is_verified_entity_function() -> Function {
    Function {
        name: IS_VERIFIED_ENTITY.to_string(),
        inputs: vec![param("address", "_entity")],
        outputs: vec![param("bool", "")],
        state_mutability: StateMutability::View,
    }
}

fn param(ty: &str, name: &str) -> Param {
    Param {
        ty: ty.to_string(),
        name: name.to_string(),
        components: vec![],
        internal_type: None,
    }
}

/// Describe a verification registry deployed at `address`
pub fn verification_registry(address: Address) -> ContractDescriptor {
    ContractDescriptor::new(address, [is_verified_entity_function()])
}

/// How the registry encoded its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictEncoding {
    /// No output values at all
    Empty,
    /// A Solidity `bool`
    Bool,
    /// A textual value (string, or a hex-rendered address/bytes value)
    Text,
    /// An integer of any width
    Number,
    /// Any other value, judged by truthiness
    Fallback,
}

impl fmt::Display for VerdictEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Number => "number",
            Self::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Decoded answer of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the address is a verified entity
    pub verified: bool,
    /// Which accepted encoding the answer came in
    pub encoding: VerdictEncoding,
}

impl Verdict {
    const fn new(verified: bool, encoding: VerdictEncoding) -> Self {
        Self { verified, encoding }
    }
}

/// Map the decoded outputs of `isVerifiedEntity` to a verdict
///
/// Only the first output value is inspected.
///
/// # Examples
///
/// ```
/// use alloy_dyn_abi::DynSolValue;
/// use entityscan::registry::{decode_verdict, VerdictEncoding};
///
/// let verdict = decode_verdict(&[DynSolValue::Bool(true)]);
/// assert!(verdict.verified);
/// assert_eq!(verdict.encoding, VerdictEncoding::Bool);
///
/// let verdict = decode_verdict(&[DynSolValue::String("TRUE".into())]);
/// assert!(verdict.verified);
///
/// assert!(!decode_verdict(&[]).verified);
/// ```
pub fn decode_verdict(outputs: &[DynSolValue]) -> Verdict {
    let Some(first) = outputs.first() else {
        return Verdict::new(false, VerdictEncoding::Empty);
    };

    match first {
        DynSolValue::Bool(value) => Verdict::new(*value, VerdictEncoding::Bool),
        DynSolValue::String(text) => {
            Verdict::new(text.eq_ignore_ascii_case("true"), VerdictEncoding::Text)
        }
        // Hex renderings of these can never read "true"
        DynSolValue::Address(_)
        | DynSolValue::Bytes(_)
        | DynSolValue::FixedBytes(..)
        | DynSolValue::Function(_) => Verdict::new(false, VerdictEncoding::Text),
        DynSolValue::Uint(value, _) => Verdict::new(!value.is_zero(), VerdictEncoding::Number),
        DynSolValue::Int(value, _) => Verdict::new(!value.is_zero(), VerdictEncoding::Number),
        _ => Verdict::new(true, VerdictEncoding::Fallback),
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// arg.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A key/value pair of a `Map` argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgMapEntry {
    pub key: Arg,
    pub value: Arg,
}

/// A contract call argument in its JSON-RPC `ContractParameter` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Arg {
    /// Serialised as `{"type":"Any","value":null}` when empty.
    Any {
        #[serde(default)]
        value: Option<Value>,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool,
    },
    PublicKey {
        value: String,
    },
    /// Big-endian script hash hex without `0x`.
    Hash160 {
        value: String,
    },
    /// Big-endian hash hex without `0x`.
    Hash256 {
        value: String,
    },
    /// Decimal string, never a float.
    Integer {
        value: String,
    },
    Array {
        value: Vec<Arg>,
    },
    Map {
        value: Vec<ArgMapEntry>,
    },
    /// Hex or base64 bytes.
    ByteArray {
        value: String,
    },
}

impl Arg {
    /// The explicit "no value" argument.
    pub fn null() -> Self {
        Arg::Any { value: None }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Any { .. } => "Any",
            Arg::String { .. } => "String",
            Arg::Boolean { .. } => "Boolean",
            Arg::PublicKey { .. } => "PublicKey",
            Arg::Hash160 { .. } => "Hash160",
            Arg::Hash256 { .. } => "Hash256",
            Arg::Integer { .. } => "Integer",
            Arg::Array { .. } => "Array",
            Arg::Map { .. } => "Map",
            Arg::ByteArray { .. } => "ByteArray",
        }
    }

    /// The argument as JSON, ready to be placed in an RPC parameter list.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

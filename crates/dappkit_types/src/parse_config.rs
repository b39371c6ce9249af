// Copyright (C) 2015-2025 The Neo Project.
//
// parse_config.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Type hints describing the application-level shape of a stack item.
//!
//! A `ByteString` may hold text, raw bytes, a script hash or a public key;
//! nothing on the wire tells them apart. A [`ParseConfig`] supplies that
//! missing knowledge, recursively for containers, and the ABI tables below
//! say which wire type backs each ABI type.

use crate::error::{TypesError, TypesResult};
use crate::stack_item::StackItemType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire type names as reported by the VM, including `Null` for `Void`.
pub mod internal_types {
    pub const ARRAY: &str = "Array";
    pub const BYTESTRING: &str = "ByteString";
    pub const BUFFER: &str = "Buffer";
    pub const INTEGER: &str = "Integer";
    pub const INTEROPINTERFACE: &str = "InteropInterface";
    pub const BOOLEAN: &str = "Boolean";
    pub const MAP: &str = "Map";
    pub const NULL: &str = "Null";
    pub const POINTER: &str = "Pointer";
    pub const STRUCT: &str = "Struct";
}

/// Contract ABI parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbiType {
    Any,
    Signature,
    Boolean,
    Integer,
    Hash160,
    Hash256,
    ByteArray,
    PublicKey,
    String,
    Array,
    Map,
    InteropInterface,
    Void,
}

static ABI_TYPES: Lazy<HashMap<&'static str, AbiType>> = Lazy::new(|| {
    [
        AbiType::Any,
        AbiType::Signature,
        AbiType::Boolean,
        AbiType::Integer,
        AbiType::Hash160,
        AbiType::Hash256,
        AbiType::ByteArray,
        AbiType::PublicKey,
        AbiType::String,
        AbiType::Array,
        AbiType::Map,
        AbiType::InteropInterface,
        AbiType::Void,
    ]
    .into_iter()
    .map(|abi| (abi.upper_name(), abi))
    .collect()
});

impl AbiType {
    pub fn name(self) -> &'static str {
        match self {
            AbiType::Any => "Any",
            AbiType::Signature => "Signature",
            AbiType::Boolean => "Boolean",
            AbiType::Integer => "Integer",
            AbiType::Hash160 => "Hash160",
            AbiType::Hash256 => "Hash256",
            AbiType::ByteArray => "ByteArray",
            AbiType::PublicKey => "PublicKey",
            AbiType::String => "String",
            AbiType::Array => "Array",
            AbiType::Map => "Map",
            AbiType::InteropInterface => "InteropInterface",
            AbiType::Void => "Void",
        }
    }

    fn upper_name(self) -> &'static str {
        match self {
            AbiType::Any => "ANY",
            AbiType::Signature => "SIGNATURE",
            AbiType::Boolean => "BOOLEAN",
            AbiType::Integer => "INTEGER",
            AbiType::Hash160 => "HASH160",
            AbiType::Hash256 => "HASH256",
            AbiType::ByteArray => "BYTEARRAY",
            AbiType::PublicKey => "PUBLICKEY",
            AbiType::String => "STRING",
            AbiType::Array => "ARRAY",
            AbiType::Map => "MAP",
            AbiType::InteropInterface => "INTEROPINTERFACE",
            AbiType::Void => "VOID",
        }
    }

    /// Looks an ABI type up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        ABI_TYPES.get(name.to_ascii_uppercase().as_str()).copied()
    }

    /// The wire type backing this ABI type. `Any` has none.
    pub fn internal(self) -> Option<&'static str> {
        match self {
            AbiType::Any => None,
            AbiType::Signature
            | AbiType::Hash160
            | AbiType::Hash256
            | AbiType::ByteArray
            | AbiType::PublicKey
            | AbiType::String => Some(internal_types::BYTESTRING),
            AbiType::Boolean => Some(internal_types::BOOLEAN),
            AbiType::Integer => Some(internal_types::INTEGER),
            AbiType::Array => Some(internal_types::ARRAY),
            AbiType::Map => Some(internal_types::MAP),
            AbiType::InteropInterface => Some(internal_types::INTEROPINTERFACE),
            AbiType::Void => Some(internal_types::NULL),
        }
    }
}

/// Semantic refinements of an ABI type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintType {
    Address,
    PublicKey,
    ScriptHash,
    ScriptHashLittleEndian,
    BlockHash,
    TransactionId,
    StorageContext,
    Iterator,
}

impl HintType {
    pub fn name(self) -> &'static str {
        match self {
            HintType::Address => "Address",
            HintType::PublicKey => "PublicKey",
            HintType::ScriptHash => "ScriptHash",
            HintType::ScriptHashLittleEndian => "ScriptHashLittleEndian",
            HintType::BlockHash => "BlockHash",
            HintType::TransactionId => "TransactionId",
            HintType::StorageContext => "StorageContext",
            HintType::Iterator => "Iterator",
        }
    }

    /// The ABI type this hint refines.
    pub fn abi(self) -> AbiType {
        match self {
            HintType::Address => AbiType::String,
            HintType::PublicKey => AbiType::PublicKey,
            HintType::ScriptHash | HintType::ScriptHashLittleEndian => AbiType::Hash160,
            HintType::BlockHash | HintType::TransactionId => AbiType::Hash256,
            HintType::StorageContext | HintType::Iterator => AbiType::InteropInterface,
        }
    }
}

/// Recursive type hint for decoding a stack item or encoding an argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParseConfig {
    /// No expectation, or a union of alternatives resolved against the wire type.
    Any {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        union: Option<Vec<ParseConfig>>,
    },
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<HintType>,
    },
    Boolean,
    ByteArray,
    PublicKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<HintType>,
    },
    Hash160 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<HintType>,
    },
    Hash256 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<HintType>,
    },
    Integer,
    /// `generic` applies to every element.
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        generic: Option<Box<ParseConfig>>,
    },
    Map {
        #[serde(
            default,
            rename = "genericKey",
            skip_serializing_if = "Option::is_none"
        )]
        generic_key: Option<Box<ParseConfig>>,
        #[serde(
            default,
            rename = "genericItem",
            skip_serializing_if = "Option::is_none"
        )]
        generic_item: Option<Box<ParseConfig>>,
    },
    InteropInterface {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<HintType>,
    },
}

impl ParseConfig {
    pub fn any() -> Self {
        ParseConfig::Any { union: None }
    }

    pub fn union<T: Into<Vec<ParseConfig>>>(configs: T) -> Self {
        ParseConfig::Any {
            union: Some(configs.into()),
        }
    }

    pub fn string() -> Self {
        ParseConfig::String { hint: None }
    }

    /// A string that must look like a Neo N3 address.
    pub fn address() -> Self {
        ParseConfig::String {
            hint: Some(HintType::Address),
        }
    }

    pub fn public_key() -> Self {
        ParseConfig::PublicKey { hint: None }
    }

    pub fn hash160(hint: Option<HintType>) -> Self {
        ParseConfig::Hash160 { hint }
    }

    pub fn hash256(hint: Option<HintType>) -> Self {
        ParseConfig::Hash256 { hint }
    }

    pub fn array(generic: Option<ParseConfig>) -> Self {
        ParseConfig::Array {
            generic: generic.map(Box::new),
        }
    }

    pub fn map(generic_key: Option<ParseConfig>, generic_item: Option<ParseConfig>) -> Self {
        ParseConfig::Map {
            generic_key: generic_key.map(Box::new),
            generic_item: generic_item.map(Box::new),
        }
    }

    /// The ABI type named by the config's `type` tag.
    pub fn abi_type(&self) -> AbiType {
        match self {
            ParseConfig::Any { .. } => AbiType::Any,
            ParseConfig::String { .. } => AbiType::String,
            ParseConfig::Boolean => AbiType::Boolean,
            ParseConfig::ByteArray => AbiType::ByteArray,
            ParseConfig::PublicKey { .. } => AbiType::PublicKey,
            ParseConfig::Hash160 { .. } => AbiType::Hash160,
            ParseConfig::Hash256 { .. } => AbiType::Hash256,
            ParseConfig::Integer => AbiType::Integer,
            ParseConfig::Array { .. } => AbiType::Array,
            ParseConfig::Map { .. } => AbiType::Map,
            ParseConfig::InteropInterface { .. } => AbiType::InteropInterface,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.abi_type().name()
    }

    pub fn hint(&self) -> Option<HintType> {
        match self {
            ParseConfig::String { hint }
            | ParseConfig::PublicKey { hint }
            | ParseConfig::Hash160 { hint }
            | ParseConfig::Hash256 { hint }
            | ParseConfig::InteropInterface { hint } => *hint,
            _ => None,
        }
    }

    /// The wire type this config decodes, read from the ABI table.
    pub fn internal_type(&self) -> Option<&'static str> {
        AbiType::from_name(self.type_name()).and_then(AbiType::internal)
    }

    /// Whether this config may be applied to an item of `item_type`.
    ///
    /// `Any` configs and null items are compatible with everything, arrays
    /// also accept structs.
    pub fn accepts(&self, item_type: StackItemType) -> bool {
        if matches!(self, ParseConfig::Any { .. }) || item_type == StackItemType::Any {
            return true;
        }
        if matches!(self, ParseConfig::Array { .. }) && item_type == StackItemType::Struct {
            return true;
        }
        self.internal_type()
            .map_or(false, |internal| internal.eq_ignore_ascii_case(item_type.name()))
    }

    /// Reads a config from its JSON form, e.g. `{"type":"Array","generic":{"type":"Integer"}}`.
    pub fn from_json_str(json: &str) -> TypesResult<Self> {
        serde_json::from_str(json).map_err(|err| TypesError::InvalidParseConfig(err.to_string()))
    }
}

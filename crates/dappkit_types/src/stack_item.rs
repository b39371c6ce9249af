// Copyright (C) 2015-2025 The Neo Project.
//
// stack_item.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Stack items as they travel over JSON-RPC.
//!
//! The node serialises every VM stack item as an object tagged by `type`.
//! Byte payloads are base64 encoded and integers are decimal strings, so no
//! precision is lost in transit.

use crate::error::{TypesError, TypesResult};
use crate::type_checker::TypeChecker;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The closed set of wire type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackItemType {
    Any,
    Boolean,
    Integer,
    ByteString,
    Array,
    Map,
    InteropInterface,
    Pointer,
    Buffer,
    Struct,
}

impl StackItemType {
    /// Every wire type, in declaration order.
    pub const ALL: [StackItemType; 10] = [
        StackItemType::Any,
        StackItemType::Boolean,
        StackItemType::Integer,
        StackItemType::ByteString,
        StackItemType::Array,
        StackItemType::Map,
        StackItemType::InteropInterface,
        StackItemType::Pointer,
        StackItemType::Buffer,
        StackItemType::Struct,
    ];

    /// The `type` discriminator used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            StackItemType::Any => "Any",
            StackItemType::Boolean => "Boolean",
            StackItemType::Integer => "Integer",
            StackItemType::ByteString => "ByteString",
            StackItemType::Array => "Array",
            StackItemType::Map => "Map",
            StackItemType::InteropInterface => "InteropInterface",
            StackItemType::Pointer => "Pointer",
            StackItemType::Buffer => "Buffer",
            StackItemType::Struct => "Struct",
        }
    }
}

impl fmt::Display for StackItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StackItemType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item_type| item_type.name() == s)
            .ok_or_else(|| TypesError::UnknownType(s.to_string()))
    }
}

/// A key/value pair of a `Map` stack item. Keys are stack items too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackItemMapEntry {
    pub key: StackItem,
    pub value: StackItem,
}

/// A stack item in its JSON-RPC representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StackItem {
    /// Null, optionally carrying a raw value.
    Any {
        #[serde(default)]
        value: Option<Value>,
    },

    Boolean {
        value: bool,
    },

    /// Arbitrary-precision integer as a decimal string.
    Integer {
        value: String,
    },

    /// Base64 encoded bytes. What the bytes mean is only known from a type hint.
    ByteString {
        value: String,
    },

    Array {
        value: Vec<StackItem>,
    },

    Map {
        value: Vec<StackItemMapEntry>,
    },

    /// Opaque handle, e.g. an iterator kept alive in an RPC session.
    InteropInterface {
        interface: String,
        id: String,
    },

    Pointer {
        value: String,
    },

    Buffer {
        value: String,
    },

    /// Fixed-layout tuple, decoded exactly like an array.
    Struct {
        value: Vec<StackItem>,
    },
}

impl StackItem {
    /// The null item.
    pub fn null() -> Self {
        StackItem::Any { value: None }
    }

    /// Creates a boolean stack item.
    pub fn boolean(value: bool) -> Self {
        StackItem::Boolean { value }
    }

    /// Creates an integer stack item from anything printable as a decimal.
    pub fn integer<T: ToString>(value: T) -> Self {
        StackItem::Integer {
            value: value.to_string(),
        }
    }

    /// Creates a byte string stack item from raw bytes.
    pub fn byte_string<T: AsRef<[u8]>>(bytes: T) -> Self {
        StackItem::ByteString {
            value: general_purpose::STANDARD.encode(bytes.as_ref()),
        }
    }

    /// Creates a byte string stack item holding UTF-8 text.
    pub fn utf8(text: &str) -> Self {
        Self::byte_string(text.as_bytes())
    }

    /// Creates an array stack item.
    pub fn array<T: Into<Vec<StackItem>>>(items: T) -> Self {
        StackItem::Array {
            value: items.into(),
        }
    }

    /// Creates a struct stack item.
    pub fn structure<T: Into<Vec<StackItem>>>(items: T) -> Self {
        StackItem::Struct {
            value: items.into(),
        }
    }

    /// Creates a map stack item, preserving the order of `entries`.
    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StackItem, StackItem)>,
    {
        StackItem::Map {
            value: entries
                .into_iter()
                .map(|(key, value)| StackItemMapEntry { key, value })
                .collect(),
        }
    }

    /// Returns the wire type of the item.
    pub fn item_type(&self) -> StackItemType {
        match self {
            StackItem::Any { .. } => StackItemType::Any,
            StackItem::Boolean { .. } => StackItemType::Boolean,
            StackItem::Integer { .. } => StackItemType::Integer,
            StackItem::ByteString { .. } => StackItemType::ByteString,
            StackItem::Array { .. } => StackItemType::Array,
            StackItem::Map { .. } => StackItemType::Map,
            StackItem::InteropInterface { .. } => StackItemType::InteropInterface,
            StackItem::Pointer { .. } => StackItemType::Pointer,
            StackItem::Buffer { .. } => StackItemType::Buffer,
            StackItem::Struct { .. } => StackItemType::Struct,
        }
    }

    /// True for a `Boolean` item whose value is `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, StackItem::Boolean { value: true })
    }

    /// Reads an untyped JSON value, rejecting anything the classifier rejects.
    pub fn from_value(value: &Value) -> TypesResult<Self> {
        if !TypeChecker::is_stack_item(value) {
            return Err(TypesError::not_a_stack_item(value));
        }
        serde_json::from_value(value.clone()).map_err(|_| TypesError::not_a_stack_item(value))
    }

    /// Converts the item back to its JSON-RPC form.
    pub fn to_value(&self) -> TypesResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Reads `raw` as a stack item, keeping shapes outside the model as an `Any`
/// item that carries the raw JSON.
pub(crate) fn lenient_item(raw: Value) -> StackItem {
    match StackItem::deserialize(&raw) {
        Ok(item) => item,
        Err(_) => StackItem::Any { value: Some(raw) },
    }
}

/// `deserialize_with` for a single stack item reported by a node.
pub(crate) fn deserialize_lenient_item<'de, D>(deserializer: D) -> Result<StackItem, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_item(Value::deserialize(deserializer)?))
}

/// `deserialize_with` for a node-reported stack; `null` reads as empty.
pub(crate) fn deserialize_lenient_items<'de, D>(deserializer: D) -> Result<Vec<StackItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().map(lenient_item).collect())
}

impl TryFrom<&Value> for StackItem {
    type Error = TypesError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        StackItem::from_value(value)
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// decode.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::convert::decode_base64;
use crate::account::looks_like_address;
use crate::error::DecodeError;
use neo_dappkit_types::{HintType, ParseConfig, StackItem, StackItemType};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::{Map, Number, Value};

const HASH160_SIZE: usize = 20;
const HASH256_SIZE: usize = 32;

/// Decodes a stack item into a plain JSON value, guided by `config`.
///
/// * `ByteString` becomes text unless the config asks for hex, a script hash
///   or a block/transaction hash. Bytes that are not UTF-8 come back as the
///   original base64 string.
/// * `Integer` becomes a JSON number. Values outside the 64-bit range are
///   approximated as `f64`; use [`decode_big_integer`] for exact values.
/// * `Map` becomes an object in entry order, with keys stringified.
/// * `InteropInterface` becomes `null`; iterate it through the chain client.
///
/// Fails with a [`DecodeError`] when the wire data does not satisfy the hint,
/// e.g. a `Hash160` config applied to a 19 byte string.
pub fn decode(item: &StackItem, config: Option<&ParseConfig>) -> Result<Value, DecodeError> {
    let item_type = item.item_type();
    let resolved = resolve_union(item_type, config);
    let config = resolved.as_ref();

    if let Some(config) = config {
        if !config.accepts(item_type) {
            return Err(DecodeError::IncompatibleConfig {
                config: config.type_name().to_string(),
                item: item_type.name().to_string(),
            });
        }
    }

    match item {
        StackItem::ByteString { value } => decode_byte_string(value, config),
        StackItem::Integer { value } => decode_integer(value),
        StackItem::Array { value } | StackItem::Struct { value } => {
            let generic = match config {
                Some(ParseConfig::Array { generic }) => generic.as_deref(),
                _ => None,
            };
            value
                .iter()
                .map(|element| decode(element, generic))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        StackItem::Map { value } => {
            let (generic_key, generic_item) = match config {
                Some(ParseConfig::Map {
                    generic_key,
                    generic_item,
                }) => (generic_key.as_deref(), generic_item.as_deref()),
                _ => (None, None),
            };

            let mut object = Map::with_capacity(value.len());
            for entry in value {
                let key = decode(&entry.key, generic_key)?;
                let decoded = decode(&entry.value, generic_item)?;
                object.insert(map_key(key), decoded);
            }
            Ok(Value::Object(object))
        }
        StackItem::InteropInterface { .. } => Ok(Value::Null),
        StackItem::Boolean { value } => Ok(Value::Bool(*value)),
        StackItem::Any { value } => Ok(value.as_ref().map_or(Value::Null, parse_embedded)),
        StackItem::Pointer { value } | StackItem::Buffer { value } => {
            Ok(parse_embedded(&Value::String(value.clone())))
        }
    }
}

/// Classifies an untyped JSON value, then decodes it.
pub fn decode_value(value: &Value, config: Option<&ParseConfig>) -> Result<Value, DecodeError> {
    let item = StackItem::from_value(value)?;
    decode(&item, config)
}

/// Exact integer value of an `Integer`, `Boolean` or byte string item.
///
/// Byte strings are read as little-endian two's complement, the way the VM
/// converts them.
pub fn decode_big_integer(item: &StackItem) -> Result<BigInt, DecodeError> {
    match item {
        StackItem::Integer { value } => value
            .trim()
            .parse::<BigInt>()
            .map_err(|_| DecodeError::InvalidInteger(value.clone())),
        StackItem::Boolean { value } => Ok(BigInt::from(u8::from(*value))),
        StackItem::ByteString { value } | StackItem::Buffer { value } => {
            Ok(BigInt::from_signed_bytes_le(&decode_base64(value)?))
        }
        other => Err(DecodeError::IncompatibleConfig {
            config: "Integer".to_string(),
            item: other.item_type().name().to_string(),
        }),
    }
}

/// Narrows an `Any` union to the single config that applies to `item_type`.
///
/// Candidates are matched by the wire type backing their ABI type. Several
/// ByteString-backed candidates cannot be told apart from the bytes alone, so
/// that case falls back to a plain `String`.
fn resolve_union(item_type: StackItemType, config: Option<&ParseConfig>) -> Option<ParseConfig> {
    let candidates = match config? {
        ParseConfig::Any { union: Some(union) } => union,
        other => return Some(other.clone()),
    };

    let matching: Vec<&ParseConfig> = candidates
        .iter()
        .filter(|candidate| backs(candidate, item_type))
        .collect();

    match matching.as_slice() {
        [] => None,
        [_, _, ..] if item_type == StackItemType::ByteString => Some(ParseConfig::string()),
        [first, ..] => Some((*first).clone()),
    }
}

fn backs(candidate: &ParseConfig, item_type: StackItemType) -> bool {
    if item_type == StackItemType::Struct && matches!(candidate, ParseConfig::Array { .. }) {
        return true;
    }
    candidate
        .internal_type()
        .map_or(false, |internal| internal.eq_ignore_ascii_case(item_type.name()))
}

fn decode_byte_string(value: &str, config: Option<&ParseConfig>) -> Result<Value, DecodeError> {
    match config {
        Some(ParseConfig::ByteArray) | Some(ParseConfig::PublicKey { .. }) => {
            Ok(Value::String(hex::encode(decode_base64(value)?)))
        }
        Some(ParseConfig::Hash160 { hint }) => {
            let mut bytes = decode_base64(value)?;
            if bytes.len() != HASH160_SIZE {
                return Err(DecodeError::InvalidHash160(hex::encode(&bytes)));
            }
            if *hint == Some(HintType::ScriptHashLittleEndian) {
                return Ok(Value::String(hex::encode(bytes)));
            }
            bytes.reverse();
            Ok(Value::String(format!("0x{}", hex::encode(bytes))))
        }
        Some(ParseConfig::Hash256 { .. }) => {
            let mut bytes = decode_base64(value)?;
            if bytes.len() != HASH256_SIZE {
                return Err(DecodeError::InvalidHash256(hex::encode(&bytes)));
            }
            bytes.reverse();
            Ok(Value::String(format!("0x{}", hex::encode(bytes))))
        }
        _ => {
            let wants_address = config.and_then(ParseConfig::hint) == Some(HintType::Address);
            let text = decode_base64(value)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok());

            match text {
                Some(text) if wants_address && !looks_like_address(&text) => {
                    Err(DecodeError::InvalidAddress(value.to_string()))
                }
                Some(text) => Ok(Value::String(text)),
                None if wants_address => Err(DecodeError::InvalidAddress(value.to_string())),
                None => Ok(Value::String(value.to_string())),
            }
        }
    }
}

fn decode_integer(value: &str) -> Result<Value, DecodeError> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return Ok(Value::from(number));
    }
    if let Ok(number) = trimmed.parse::<u64>() {
        return Ok(Value::from(number));
    }

    trimmed
        .parse::<BigInt>()
        .ok()
        .and_then(|big| big.to_f64())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| DecodeError::InvalidInteger(value.to_string()))
}

/// Raw values that hold JSON text are returned parsed, anything else as is.
fn parse_embedded(value: &Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    }
}

fn map_key(key: Value) -> String {
    match key {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

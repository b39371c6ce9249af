// Copyright (C) 2015-2025 The Neo Project.
//
// encode.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::convert::{decode_base64, is_single_case_hex, is_strict_base64};
use crate::account::{self, strip_hex_prefix};
use crate::error::{DappkitError, DappkitResult};
use neo_dappkit_types::{Arg, ArgMapEntry, ParseConfig, StackItem};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use serde_json::Value;

/// Encodes a plain JSON value as a contract argument.
///
/// The argument type comes from `config` unless it is absent or `Any`, in
/// which case it is inferred: numbers become `Integer`, strings `String`,
/// arrays `Array`, objects `Map` and `null` the empty `Any` argument.
pub fn encode(value: &Value, config: Option<&ParseConfig>) -> DappkitResult<Arg> {
    match config {
        None | Some(ParseConfig::Any { .. }) => infer(value),
        Some(ParseConfig::ByteArray) => encode_byte_array(value),
        Some(ParseConfig::Hash160 { .. }) => encode_hash160(value),
        Some(ParseConfig::Hash256 { .. }) => encode_hash256(value),
        Some(ParseConfig::PublicKey { .. }) => encode_public_key(value),
        Some(ParseConfig::String { .. }) => encode_string(value),
        Some(ParseConfig::Integer) => encode_integer(value),
        Some(ParseConfig::Boolean) => encode_boolean(value),
        Some(config @ (ParseConfig::Array { .. } | ParseConfig::Map { .. })) => {
            encode_container(value, Some(config))
        }
        Some(ParseConfig::InteropInterface { .. }) => Ok(Arg::null()),
    }
}

fn infer(value: &Value) -> DappkitResult<Arg> {
    match value {
        Value::Null => Ok(Arg::null()),
        Value::Bool(_) => encode_boolean(value),
        Value::Number(_) => encode_integer(value),
        Value::String(_) => encode_string(value),
        Value::Array(_) | Value::Object(_) => encode_container(value, None),
    }
}

/// Arrays and objects are told apart by the value itself, not the config.
fn encode_container(value: &Value, config: Option<&ParseConfig>) -> DappkitResult<Arg> {
    match value {
        Value::Array(items) => {
            let generic = match config {
                Some(ParseConfig::Array { generic }) => generic.as_deref(),
                _ => None,
            };
            let value = items
                .iter()
                .map(|item| encode(item, generic))
                .collect::<DappkitResult<Vec<_>>>()?;
            Ok(Arg::Array { value })
        }
        Value::Object(object) => {
            let (generic_key, generic_item) = match config {
                Some(ParseConfig::Map {
                    generic_key,
                    generic_item,
                }) => (generic_key.as_deref(), generic_item.as_deref()),
                _ => (None, None),
            };
            let value = object
                .iter()
                .map(|(key, item)| {
                    Ok(ArgMapEntry {
                        key: encode(&Value::String(key.clone()), generic_key)?,
                        value: encode(item, generic_item)?,
                    })
                })
                .collect::<DappkitResult<Vec<_>>>()?;
            Ok(Arg::Map { value })
        }
        Value::Null => Ok(Arg::null()),
        other => Err(invalid("Array or Map", other)),
    }
}

pub(crate) fn encode_string(value: &Value) -> DappkitResult<Arg> {
    let value = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => return Err(invalid("String", other)),
    };
    Ok(Arg::String { value })
}

/// `"true"` is the only string read as `true`.
pub(crate) fn encode_boolean(value: &Value) -> DappkitResult<Arg> {
    let value = match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true",
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        other => return Err(invalid("Boolean", other)),
    };
    Ok(Arg::Boolean { value })
}

/// Integers travel as decimal strings so no precision is lost in transit.
pub(crate) fn encode_integer(value: &Value) -> DappkitResult<Arg> {
    let integer = match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                BigInt::from(n)
            } else if let Some(n) = number.as_u64() {
                BigInt::from(n)
            } else {
                number
                    .as_f64()
                    .filter(|n| n.fract() == 0.0)
                    .and_then(BigInt::from_f64)
                    .ok_or_else(|| invalid("Integer", value))?
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<BigInt>()
            .map_err(|_| invalid("Integer", value))?,
        other => return Err(invalid("Integer", other)),
    };
    Ok(Arg::Integer {
        value: integer.to_string(),
    })
}

/// Accepts a script hash, with or without `0x`, or an address.
pub(crate) fn encode_hash160(value: &Value) -> DappkitResult<Arg> {
    let text = value.as_str().ok_or_else(|| invalid("Hash160", value))?;
    let hash = if account::is_script_hash(text) {
        strip_hex_prefix(text).to_ascii_lowercase()
    } else if account::looks_like_address(text) {
        account::script_hash_from_address(text)?
    } else {
        return Err(invalid("Hash160", value));
    };
    Ok(Arg::Hash160 { value: hash })
}

pub(crate) fn encode_hash256(value: &Value) -> DappkitResult<Arg> {
    let hex = value
        .as_str()
        .map(strip_hex_prefix)
        .filter(|hex| hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| invalid("Hash256", value))?;
    Ok(Arg::Hash256 {
        value: hex.to_ascii_lowercase(),
    })
}

pub(crate) fn encode_public_key(value: &Value) -> DappkitResult<Arg> {
    let key = value
        .as_str()
        .filter(|key| account::is_public_key(key))
        .ok_or_else(|| invalid("PublicKey", value))?;
    Ok(Arg::PublicKey {
        value: strip_hex_prefix(key).to_ascii_lowercase(),
    })
}

/// Hex is lowercased, base64 is kept.
fn encode_byte_array(value: &Value) -> DappkitResult<Arg> {
    let text = value.as_str().ok_or_else(|| invalid_byte_array(value))?;
    if is_single_case_hex(text) {
        Ok(Arg::ByteArray {
            value: text.to_ascii_lowercase(),
        })
    } else if is_strict_base64(text) {
        Ok(Arg::ByteArray {
            value: text.to_string(),
        })
    } else {
        Err(invalid_byte_array(value))
    }
}

/// The stack item a contract receives for `arg`, e.g. when echoed back.
///
/// Hashes are pushed little-endian, byte arrays as raw bytes.
pub fn arg_to_stack_item(arg: &Arg) -> DappkitResult<StackItem> {
    let item = match arg {
        Arg::Any { .. } => StackItem::null(),
        Arg::String { value } => StackItem::utf8(value),
        Arg::Boolean { value } => StackItem::boolean(*value),
        Arg::Integer { value } => StackItem::integer(value),
        Arg::PublicKey { value } => StackItem::byte_string(hex_bytes(value)?),
        Arg::Hash160 { value } | Arg::Hash256 { value } => {
            let mut bytes = hex_bytes(value)?;
            bytes.reverse();
            StackItem::byte_string(bytes)
        }
        Arg::ByteArray { value } => {
            let bytes = if is_single_case_hex(value) {
                hex_bytes(value)?
            } else {
                decode_base64(value)?
            };
            StackItem::byte_string(bytes)
        }
        Arg::Array { value } => StackItem::array(
            value
                .iter()
                .map(arg_to_stack_item)
                .collect::<DappkitResult<Vec<_>>>()?,
        ),
        Arg::Map { value } => StackItem::map(
            value
                .iter()
                .map(|entry| Ok((arg_to_stack_item(&entry.key)?, arg_to_stack_item(&entry.value)?)))
                .collect::<DappkitResult<Vec<_>>>()?,
        ),
    };
    Ok(item)
}

fn hex_bytes(value: &str) -> DappkitResult<Vec<u8>> {
    hex::decode(strip_hex_prefix(value))
        .map_err(|err| DappkitError::invalid_argument(format!("{value} is not hex: {err}")))
}

fn invalid(type_name: &str, value: &Value) -> DappkitError {
    DappkitError::invalid_argument(format!("Invalid {type_name} value: {value}"))
}

pub(crate) fn invalid_byte_array(value: &Value) -> DappkitError {
    let shown = value.as_str().map_or_else(|| value.to_string(), str::to_string);
    DappkitError::invalid_argument(format!(
        "Invalid ByteArray value, should be either a valid hex or base64, got: {shown}"
    ))
}

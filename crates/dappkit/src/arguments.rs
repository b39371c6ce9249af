// Copyright (C) 2015-2025 The Neo Project.
//
// arguments.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Validation of wire-shaped arguments before they are sent to a node.

use crate::account;
use crate::error::{DappkitError, DappkitResult};
use crate::parser::convert::{hex_to_base64, is_single_case_hex, is_strict_base64};
use crate::parser::{
    encode_boolean, encode_hash160, encode_hash256, encode_integer, encode_public_key,
    encode_string, invalid_byte_array,
};
use neo_dappkit_types::{Arg, ArgMapEntry};
use serde_json::Value;

/// Normalises `{ "type", "value" }` arguments into node-ready [`Arg`]s.
///
/// Besides the contract parameter types, `Address` and `ScriptHash` are
/// accepted and sent as `Hash160`. `ByteArray` values may be hex or base64
/// and are always sent as base64.
pub fn normalize_args(args: &[Value]) -> DappkitResult<Vec<Arg>> {
    args.iter().map(normalize_arg).collect()
}

pub fn normalize_arg(arg: &Value) -> DappkitResult<Arg> {
    let arg_type = arg
        .get("type")
        .ok_or_else(|| DappkitError::invalid_argument("Invalid argument type"))?;
    let value = arg
        .get("value")
        .ok_or_else(|| DappkitError::invalid_argument("Invalid argument value"))?;
    let arg_type = arg_type
        .as_str()
        .ok_or_else(|| DappkitError::invalid_argument("Invalid argument type"))?;

    match arg_type {
        "Any" => Ok(Arg::Any {
            value: (!value.is_null()).then(|| value.clone()),
        }),
        "String" => encode_string(value),
        "Boolean" => encode_boolean(value),
        "PublicKey" => encode_public_key(value),
        "ScriptHash" => {
            let hash = value
                .as_str()
                .filter(|hash| account::is_script_hash(hash))
                .ok_or_else(|| {
                    DappkitError::invalid_argument(format!("Invalid ScriptHash value: {value}"))
                })?;
            encode_hash160(&Value::String(hash.to_string()))
        }
        "Address" | "Hash160" => encode_hash160(value),
        "Hash256" => encode_hash256(value),
        "Integer" => encode_integer(value),
        "Array" => {
            let items = value.as_array().ok_or_else(|| {
                DappkitError::invalid_argument(format!("Invalid Array value: {value}"))
            })?;
            Ok(Arg::Array {
                value: normalize_args(items)?,
            })
        }
        "Map" => {
            let entries = value.as_array().ok_or_else(|| {
                DappkitError::invalid_argument(format!("Invalid Map value: {value}"))
            })?;
            let value = entries
                .iter()
                .map(|entry| {
                    let key = entry
                        .get("key")
                        .ok_or_else(|| DappkitError::invalid_argument("Invalid map entry key"))?;
                    let item = entry
                        .get("value")
                        .ok_or_else(|| DappkitError::invalid_argument("Invalid map entry value"))?;
                    Ok(ArgMapEntry {
                        key: normalize_arg(key)?,
                        value: normalize_arg(item)?,
                    })
                })
                .collect::<DappkitResult<Vec<_>>>()?;
            Ok(Arg::Map { value })
        }
        "ByteArray" => normalize_byte_array(value),
        other => Err(DappkitError::invalid_argument(format!(
            "Unsupported argument type: {other}"
        ))),
    }
}

/// Hex is checked first, so a string valid as both is read as hex.
fn normalize_byte_array(value: &Value) -> DappkitResult<Arg> {
    let text = value.as_str().ok_or_else(|| invalid_byte_array(value))?;
    let base64 = if is_single_case_hex(text) {
        hex_to_base64(text)?
    } else if is_strict_base64(text) {
        text.to_string()
    } else {
        return Err(invalid_byte_array(value));
    };
    Ok(Arg::ByteArray { value: base64 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requires_type_and_value() {
        let err = normalize_args(&[json!({ "value": 1 })]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument type");
        let err = normalize_args(&[json!({ "type": "Integer" })]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument value");
    }

    #[test]
    fn maps_account_types_to_hash160() {
        let args = normalize_args(&[
            json!({ "type": "Address", "value": "NhGomBpYnKXArr55nHRQ5rzy79TwKVXZbr" }),
            json!({ "type": "ScriptHash", "value": "0x857a247939db5c7cd3a7bb14791280c09e824bea" }),
        ])
        .unwrap();
        let expected = Arg::Hash160 {
            value: "857a247939db5c7cd3a7bb14791280c09e824bea".to_string(),
        };
        assert_eq!(args, vec![expected.clone(), expected]);

        assert!(normalize_arg(
            &json!({ "type": "ScriptHash", "value": "NhGomBpYnKXArr55nHRQ5rzy79TwKVXZbr" })
        )
        .is_err());
    }

    #[test]
    fn sends_byte_arrays_as_base64() {
        let args = normalize_args(&[
            json!({ "type": "ByteArray", "value": "61479ab68fd5c2c04b254f382d84ddf2f5c67ced" }),
            json!({ "type": "ByteArray", "value": "61479AB68FD5C2C04B254F382D84DDF2F5C67CED" }),
            json!({ "type": "ByteArray", "value": "YUeato/VwsBLJU84LYTd8vXGfO0=" }),
        ])
        .unwrap();
        for arg in args {
            assert_eq!(
                arg,
                Arg::ByteArray {
                    value: "YUeato/VwsBLJU84LYTd8vXGfO0=".to_string()
                }
            );
        }

        let err = normalize_arg(&json!({ "type": "ByteArray", "value": "Mixed Case!" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid ByteArray value, should be either a valid hex or base64, got: Mixed Case!"
        );
    }

    #[test]
    fn keeps_mixed_case_base64() {
        assert_eq!(
            normalize_arg(&json!({ "type": "ByteArray", "value": "aBcD" })).unwrap(),
            Arg::ByteArray {
                value: "aBcD".to_string()
            }
        );
    }

    #[test]
    fn recurses_into_containers() {
        let arg = normalize_arg(&json!({
            "type": "Map",
            "value": [{
                "key": { "type": "String", "value": "owners" },
                "value": { "type": "Array", "value": [
                    { "type": "Integer", "value": "7" },
                    { "type": "Any", "value": null }
                ] }
            }]
        }))
        .unwrap();

        assert_eq!(
            arg,
            Arg::Map {
                value: vec![ArgMapEntry {
                    key: Arg::String {
                        value: "owners".to_string()
                    },
                    value: Arg::Array {
                        value: vec![
                            Arg::Integer {
                                value: "7".to_string()
                            },
                            Arg::null()
                        ]
                    },
                }]
            }
        );
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(normalize_arg(&json!({ "type": "Float", "value": 1.5 })).is_err());
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// parser_decode_tests.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use neo_dappkit::types::{HintType, ParseConfig, StackItem, TypeChecker};
use neo_dappkit::{decode, decode_value, DecodeError};
use serde_json::{json, Value};

const ADDRESS: &str = "NNLi44dJNXtDNSBkofB48aTVYtb1zZrNEs";
const GAS_HASH: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";
const GAS_HASH_LE_BASE64: &str = "z3bii9AGLEpHjuNVYQETGfPPpNI=";
const TX_ID: &str = "0x7da6ae7ff9d0b7af3d32f3a2feb2aa96c2a27ef8b651f9a132cfaad6ef20724c";
const TX_ID_LE_BASE64: &str = "THIg79aqzzKh+VG2+H6iwpaqsv6i8zI9r7fQ+X+upn0=";

fn item(value: Value) -> StackItem {
    StackItem::from_value(&value).expect("fixture must be a stack item")
}

#[test]
fn test_decode_integer() {
    let decoded = decode(&item(json!({ "type": "Integer", "value": "18" })), None).unwrap();
    assert_eq!(decoded, json!(18));
}

#[test]
fn test_decode_address_hint() {
    let address = item(json!({
        "type": "ByteString",
        "value": "Tk5MaTQ0ZEpOWHRETlNCa29mQjQ4YVRWWXRiMXpack5Fcw=="
    }));
    let decoded = decode(&address, Some(&ParseConfig::address())).unwrap();
    assert_eq!(decoded, json!(ADDRESS));

    // first 16 characters of the same address
    let truncated = item(json!({ "type": "ByteString", "value": "Tk5MaTQ0ZEpOWHRETlNCaw==" }));
    let err = decode(&truncated, Some(&ParseConfig::address())).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidAddress(_)));
}

#[test]
fn test_decode_array_with_generic() {
    let array = item(json!({
        "type": "Array",
        "value": [{ "type": "Integer", "value": "10" }, { "type": "Integer", "value": "20" }]
    }));
    let config = ParseConfig::array(Some(ParseConfig::Integer));
    assert_eq!(decode(&array, Some(&config)).unwrap(), json!([10, 20]));
}

#[test]
fn test_decode_hashes() {
    let script_hash = item(json!({ "type": "ByteString", "value": GAS_HASH_LE_BASE64 }));
    assert_eq!(
        decode(&script_hash, Some(&ParseConfig::hash160(None))).unwrap(),
        json!(GAS_HASH)
    );
    assert_eq!(
        decode(
            &script_hash,
            Some(&ParseConfig::hash160(Some(HintType::ScriptHashLittleEndian)))
        )
        .unwrap(),
        json!("cf76e28bd0062c4a478ee35561011319f3cfa4d2")
    );

    let tx_id = item(json!({ "type": "ByteString", "value": TX_ID_LE_BASE64 }));
    assert_eq!(
        decode(&tx_id, Some(&ParseConfig::hash256(Some(HintType::TransactionId)))).unwrap(),
        json!(TX_ID)
    );

    // a 32 byte value is no script hash
    let err = decode(&tx_id, Some(&ParseConfig::hash160(None))).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidHash160(_)));
}

#[test]
fn test_decode_union_with_two_hash_hints_is_string() {
    let config = ParseConfig::union(vec![
        ParseConfig::hash160(Some(HintType::ScriptHash)),
        ParseConfig::hash160(Some(HintType::ScriptHashLittleEndian)),
    ]);
    let value = item(json!({ "type": "ByteString", "value": "c3RyaW5n" }));
    assert_eq!(decode(&value, Some(&config)).unwrap(), json!("string"));
}

#[test]
fn test_decode_union_picks_by_wire_type() {
    let config = ParseConfig::union(vec![
        ParseConfig::Integer,
        ParseConfig::hash160(None),
        ParseConfig::array(Some(ParseConfig::string())),
    ]);

    let integer = item(json!({ "type": "Integer", "value": "-7" }));
    assert_eq!(decode(&integer, Some(&config)).unwrap(), json!(-7));

    let hash = item(json!({ "type": "ByteString", "value": GAS_HASH_LE_BASE64 }));
    assert_eq!(decode(&hash, Some(&config)).unwrap(), json!(GAS_HASH));

    let words = item(json!({
        "type": "Struct",
        "value": [{ "type": "ByteString", "value": "bmVv" }]
    }));
    assert_eq!(decode(&words, Some(&config)).unwrap(), json!(["neo"]));

    // no candidate applies, decoded as if no config was given
    let flag = item(json!({ "type": "Boolean", "value": true }));
    assert_eq!(decode(&flag, Some(&config)).unwrap(), json!(true));
}

#[test]
fn test_decode_nested_map() {
    let balances = item(json!({
        "type": "Map",
        "value": [
            {
                "key": { "type": "ByteString", "value": GAS_HASH_LE_BASE64 },
                "value": {
                    "type": "Array",
                    "value": [{ "type": "Integer", "value": "100" }, { "type": "Boolean", "value": false }]
                }
            }
        ]
    }));
    let config = ParseConfig::map(Some(ParseConfig::hash160(None)), Some(ParseConfig::any()));
    assert_eq!(
        decode(&balances, Some(&config)).unwrap(),
        json!({ (GAS_HASH): [100, false] })
    );
}

#[test]
fn test_decode_config_from_json() {
    let config = ParseConfig::from_json_str(
        r#"{"type":"Map","genericKey":{"type":"String"},"genericItem":{"type":"PublicKey"}}"#,
    )
    .unwrap();
    let keys = item(json!({
        "type": "Map",
        "value": [{
            "key": { "type": "ByteString", "value": "b3duZXI=" },
            "value": { "type": "ByteString", "value": "A82wZ9kw/VrapsaFRQFgRKrd7GS6OeVIJQ6upVEXLlNc" }
        }]
    }));
    assert_eq!(
        decode(&keys, Some(&config)).unwrap(),
        json!({ "owner": "03cdb067d930fd5adaa6c68545016044aaddec64ba39e548250eaea551172e535c" })
    );
}

#[test]
fn test_decode_rejects_incompatible_config() {
    let flag = item(json!({ "type": "Boolean", "value": true }));
    let err = decode(&flag, Some(&ParseConfig::Integer)).unwrap_err();
    assert_eq!(
        err,
        DecodeError::IncompatibleConfig {
            config: "Integer".to_string(),
            item: "Boolean".to_string(),
        }
    );
}

#[test]
fn test_structural_check_matches_decoder() {
    let inputs = [
        json!({ "type": "Any" }),
        json!({ "type": "Boolean", "value": true }),
        json!({ "type": "Integer", "value": "1" }),
        json!({ "type": "ByteString", "value": "AA==" }),
        json!({ "type": "Array", "value": [] }),
        json!({ "type": "Struct", "value": [{ "type": "Any" }] }),
        json!({ "type": "Map", "value": [] }),
        json!({ "type": "InteropInterface", "interface": "IIterator", "id": "1" }),
        json!({ "type": "Pointer", "value": "12" }),
        json!({ "type": "Buffer", "value": "AA==" }),
        json!({ "type": "Integer" }),
        json!({ "type": "Integer", "value": 1 }),
        json!({ "type": "Boolean", "value": "true" }),
        json!({ "type": "Array", "value": [{ "type": "Integer", "value": 2 }] }),
        json!({ "type": "Unknown", "value": "1" }),
        json!({ "value": "1" }),
        json!("Integer"),
    ];

    for input in &inputs {
        let accepted = TypeChecker::is_stack_item(input);
        let result = decode_value(input, None);
        assert_eq!(
            accepted,
            !matches!(result, Err(DecodeError::NotAStackItem(_))),
            "classifier and decoder disagree on {input}"
        );
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// invocation.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Request and response shapes exchanged with a node.

use crate::application_log::{Notification, VMState};
use crate::stack_item::{deserialize_lenient_items, StackItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Witness scope granted by a signer, as sent to `invokefunction`.
///
/// The default signer (`CalledByEntry`) is enough for most invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signer {
    /// Script hash of the signing account.
    pub account: String,

    pub scopes: String,

    #[serde(
        default,
        rename = "allowedcontracts",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_contracts: Vec<String>,

    #[serde(default, rename = "allowedgroups", skip_serializing_if = "Vec::is_empty")]
    pub allowed_groups: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Value>,
}

impl Signer {
    /// A `CalledByEntry` signer for `account`.
    pub fn called_by_entry(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            scopes: "CalledByEntry".to_string(),
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }
}

/// A single contract method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInvocation {
    pub script_hash: String,
    pub operation: String,

    /// Wire-shaped arguments, `{ "type": ..., "value": ... }`. `Address` and
    /// `ScriptHash` are accepted besides the ContractParameter types.
    #[serde(default)]
    pub args: Vec<Value>,

    #[serde(default)]
    pub abort_on_fail: bool,
}

impl ContractInvocation {
    pub fn new(script_hash: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            script_hash: script_hash.into(),
            operation: operation.into(),
            args: Vec::new(),
            abort_on_fail: false,
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

/// A batch of invocations sharing the same signers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractInvocationMulti {
    #[serde(default)]
    pub signers: Vec<Signer>,
    pub invocations: Vec<ContractInvocation>,
}

impl ContractInvocationMulti {
    pub fn single(invocation: ContractInvocation) -> Self {
        Self {
            signers: Vec::new(),
            invocations: vec![invocation],
        }
    }

    pub fn with_signers(mut self, signers: Vec<Signer>) -> Self {
        self.signers = signers;
        self
    }
}

/// Result of `invokescript` / `invokefunction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeResult {
    /// The executed script, base64 encoded.
    #[serde(default)]
    pub script: String,

    pub state: VMState,

    /// Not representative of the on-chain cost when `state` is `FAULT`.
    pub gasconsumed: String,

    #[serde(default)]
    pub exception: Option<String>,

    #[serde(default, deserialize_with = "deserialize_lenient_items")]
    pub stack: Vec<StackItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx: Option<String>,

    /// Present when the stack holds iterators to traverse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// A transaction entry of a verbose `getblock` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTransaction {
    #[serde(default)]
    pub hash: Option<String>,
}

/// The parts of a verbose block the SDK reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub hash: String,
    pub index: u32,
    #[serde(default)]
    pub tx: Vec<BlockTransaction>,
}

impl Block {
    pub fn new(index: u32, tx_hashes: &[&str]) -> Self {
        Self {
            hash: String::new(),
            index,
            tx: tx_hashes
                .iter()
                .map(|hash| BlockTransaction {
                    hash: Some(hash.to_string()),
                })
                .collect(),
        }
    }
}

/// Protocol settings reported by `getversion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolInfo {
    pub network: u32,
    #[serde(default)]
    pub addressversion: u8,
    #[serde(default)]
    pub msperblock: u64,
}

/// The `getversion` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcVersion {
    #[serde(default)]
    pub useragent: String,
    pub protocol: ProtocolInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signer_uses_node_field_names() {
        let mut signer = Signer::called_by_entry("0x857a247939db5c7cd3a7bb14791280c09e824bea");
        signer.allowed_contracts.push("0xd2a4cff31913016155e38e474a2c06d08be276cf".to_string());
        assert_eq!(
            serde_json::to_value(&signer).unwrap(),
            json!({
                "account": "0x857a247939db5c7cd3a7bb14791280c09e824bea",
                "scopes": "CalledByEntry",
                "allowedcontracts": ["0xd2a4cff31913016155e38e474a2c06d08be276cf"]
            })
        );
    }

    #[test]
    fn reads_camel_case_invocations() {
        let multi: ContractInvocationMulti = serde_json::from_value(json!({
            "invocations": [{
                "scriptHash": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
                "operation": "balanceOf",
                "args": [{ "type": "Address", "value": "NhGomBpYnKXArr55nHRQ5rzy79TwKVXZbr" }]
            }]
        }))
        .unwrap();
        assert!(multi.signers.is_empty());
        assert_eq!(multi.invocations[0].operation, "balanceOf");
        assert!(!multi.invocations[0].abort_on_fail);
    }

    #[test]
    fn reads_verbose_block_with_missing_hashes() {
        let block: Block = serde_json::from_value(json!({
            "hash": "0x1234",
            "index": 99,
            "size": 1234,
            "tx": [{ "hash": "0xaa", "size": 250 }, { "size": 10 }]
        }))
        .unwrap();
        assert_eq!(block.index, 99);
        assert_eq!(block.tx[0].hash.as_deref(), Some("0xaa"));
        assert!(block.tx[1].hash.is_none());
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// mock.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::ChainClient;
use crate::error::{DappkitError, DappkitResult};
use async_trait::async_trait;
use neo_dappkit_types::{
    ApplicationLog, Arg, Block, InvokeResult, ProtocolInfo, RpcVersion, Signer, StackItem,
};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Error code nodes use for unknown blocks and transactions.
const UNKNOWN_ITEM: i64 = -100;

#[derive(Default)]
struct MockState {
    height: u32,
    blocks: HashMap<u32, Block>,
    logs: HashMap<String, ApplicationLog>,
    block_failures: HashMap<u32, u32>,
    log_failures: HashMap<String, u32>,
    invoke_results: HashMap<String, InvokeResult>,
    iterators: HashMap<(String, String), Vec<StackItem>>,
    network_fee: String,

    block_count_calls: usize,
    requested_blocks: Vec<u32>,
    requested_logs: Vec<String>,
    invoked_scripts: Vec<String>,
    invoked_functions: Vec<(String, String, Vec<Arg>)>,
    sent_transactions: Vec<String>,
}

/// In-memory chain for tests, with scripted responses and failures.
///
/// Blocks below the current height that were never added are empty.
#[derive(Default)]
pub struct MockChainClient {
    state: Mutex<MockState>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block count reported by `get_block_count`.
    pub fn set_height(&self, height: u32) {
        self.state.lock().height = height;
    }

    /// Adds a block, growing the chain to include it.
    pub fn add_block(&self, block: Block) {
        let mut state = self.state.lock();
        state.height = state.height.max(block.index + 1);
        state.blocks.insert(block.index, block);
    }

    pub fn set_application_log(&self, log: ApplicationLog) {
        self.state.lock().logs.insert(log.txid.clone(), log);
    }

    /// Makes the next `times` requests for block `index` fail.
    pub fn fail_block(&self, index: u32, times: u32) {
        self.state.lock().block_failures.insert(index, times);
    }

    /// Makes the next `times` requests for the log of `tx_id` fail.
    pub fn fail_application_log(&self, tx_id: &str, times: u32) {
        self.state
            .lock()
            .log_failures
            .insert(tx_id.to_string(), times);
    }

    /// Result returned by invocations of `operation`, by script or by name.
    pub fn set_invoke_result(&self, operation: &str, result: InvokeResult) {
        self.state
            .lock()
            .invoke_results
            .insert(operation.to_string(), result);
    }

    pub fn set_iterator(&self, session: &str, iterator_id: &str, items: Vec<StackItem>) {
        self.state
            .lock()
            .iterators
            .insert((session.to_string(), iterator_id.to_string()), items);
    }

    pub fn set_network_fee(&self, fee: &str) {
        self.state.lock().network_fee = fee.to_string();
    }

    pub fn block_count_calls(&self) -> usize {
        self.state.lock().block_count_calls
    }

    /// Indexes passed to `get_block`, in call order.
    pub fn requested_blocks(&self) -> Vec<u32> {
        self.state.lock().requested_blocks.clone()
    }

    pub fn requested_logs(&self) -> Vec<String> {
        self.state.lock().requested_logs.clone()
    }

    pub fn invoked_scripts(&self) -> Vec<String> {
        self.state.lock().invoked_scripts.clone()
    }

    pub fn invoked_functions(&self) -> Vec<(String, String, Vec<Arg>)> {
        self.state.lock().invoked_functions.clone()
    }

    pub fn sent_transactions(&self) -> Vec<String> {
        self.state.lock().sent_transactions.clone()
    }
}

fn take_failure<K: std::hash::Hash + Eq>(failures: &mut HashMap<K, u32>, key: &K) -> bool {
    match failures.get_mut(key) {
        Some(remaining) if *remaining > 0 => {
            *remaining -= 1;
            true
        }
        _ => false,
    }
}

fn unknown(message: impl Into<String>) -> DappkitError {
    DappkitError::Rpc {
        code: UNKNOWN_ITEM,
        message: message.into(),
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn get_block_count(&self) -> DappkitResult<u32> {
        let mut state = self.state.lock();
        state.block_count_calls += 1;
        Ok(state.height)
    }

    async fn get_block(&self, index: u32) -> DappkitResult<Block> {
        let mut state = self.state.lock();
        state.requested_blocks.push(index);

        if take_failure(&mut state.block_failures, &index) {
            return Err(DappkitError::Transport(format!(
                "connection reset while reading block {index}"
            )));
        }
        if index >= state.height {
            return Err(unknown("Unknown block"));
        }
        Ok(state
            .blocks
            .get(&index)
            .cloned()
            .unwrap_or_else(|| Block::new(index, &[])))
    }

    async fn get_application_log(&self, tx_id: &str) -> DappkitResult<ApplicationLog> {
        let mut state = self.state.lock();
        state.requested_logs.push(tx_id.to_string());

        if take_failure(&mut state.log_failures, &tx_id.to_string()) {
            return Err(DappkitError::Transport(format!(
                "connection reset while reading log {tx_id}"
            )));
        }
        state
            .logs
            .get(tx_id)
            .cloned()
            .ok_or_else(|| unknown("Unknown transaction/blockhash"))
    }

    async fn invoke_script(&self, script: &str, _signers: &[Signer]) -> DappkitResult<InvokeResult> {
        let mut state = self.state.lock();
        state.invoked_scripts.push(script.to_string());

        // scripts are matched by the operation name they embed
        let decoded = crate::parser::convert::decode_base64(script).unwrap_or_default();
        let found = state
            .invoke_results
            .iter()
            .find(|(operation, _)| {
                !operation.is_empty()
                    && decoded
                        .windows(operation.len())
                        .any(|window| window == operation.as_bytes())
            })
            .map(|(_, result)| result.clone());
        found.ok_or_else(|| DappkitError::Rpc {
            code: -32602,
            message: "Invalid params".to_string(),
        })
    }

    async fn invoke_function(
        &self,
        contract: &str,
        operation: &str,
        params: &[Arg],
        _signers: &[Signer],
    ) -> DappkitResult<InvokeResult> {
        let mut state = self.state.lock();
        state.invoked_functions.push((
            contract.to_string(),
            operation.to_string(),
            params.to_vec(),
        ));
        state.invoke_results.get(operation).cloned().ok_or_else(|| DappkitError::Rpc {
            code: -32601,
            message: format!("Method not found: {operation}"),
        })
    }

    async fn traverse_iterator(
        &self,
        session: &str,
        iterator_id: &str,
        count: u32,
    ) -> DappkitResult<Vec<StackItem>> {
        let mut state = self.state.lock();
        let items = state
            .iterators
            .get_mut(&(session.to_string(), iterator_id.to_string()))
            .ok_or_else(|| unknown("Unknown session"))?;
        let take = items.len().min(count as usize);
        Ok(items.drain(..take).collect())
    }

    async fn send_raw_transaction(&self, transaction: &str) -> DappkitResult<String> {
        let mut state = self.state.lock();
        state.sent_transactions.push(transaction.to_string());
        Ok(format!("0x{:064x}", state.sent_transactions.len()))
    }

    async fn calculate_network_fee(&self, _transaction: &str) -> DappkitResult<String> {
        Ok(self.state.lock().network_fee.clone())
    }

    async fn get_version(&self) -> DappkitResult<RpcVersion> {
        Ok(RpcVersion {
            useragent: "/Neo:3.6.0/".to_string(),
            protocol: ProtocolInfo {
                network: 860833102,
                addressversion: crate::account::ADDRESS_VERSION,
                msperblock: 15000,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_failures_are_consumed() {
        let client = MockChainClient::new();
        client.add_block(Block::new(4, &["0xaa"]));
        client.fail_block(4, 2);

        assert!(client.get_block(4).await.is_err());
        assert!(client.get_block(4).await.is_err());
        assert_eq!(client.get_block(4).await.unwrap().tx.len(), 1);
        assert_eq!(client.requested_blocks(), vec![4, 4, 4]);
    }

    #[tokio::test]
    async fn unknown_blocks_and_logs_fail() {
        let client = MockChainClient::new();
        client.set_height(3);

        assert!(client.get_block(2).await.unwrap().tx.is_empty());
        assert!(matches!(
            client.get_block(3).await,
            Err(DappkitError::Rpc { code: UNKNOWN_ITEM, .. })
        ));
        assert!(client.get_application_log("0xbb").await.is_err());
        assert_eq!(client.get_block_count().await.unwrap(), 3);
        assert_eq!(client.block_count_calls(), 1);
    }

    #[tokio::test]
    async fn iterators_are_read_in_pages() {
        let client = MockChainClient::new();
        client.set_iterator(
            "s1",
            "i1",
            vec![StackItem::integer(1), StackItem::integer(2), StackItem::integer(3)],
        );

        assert_eq!(client.traverse_iterator("s1", "i1", 2).await.unwrap().len(), 2);
        assert_eq!(client.traverse_iterator("s1", "i1", 2).await.unwrap().len(), 1);
        assert!(client.traverse_iterator("s1", "i1", 2).await.unwrap().is_empty());
        assert!(client.traverse_iterator("s2", "i1", 2).await.is_err());
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Access to a Neo N3 node.

mod mock;
mod rpc_client;

pub use mock::MockChainClient;
pub use rpc_client::RpcClient;

use crate::error::DappkitResult;
use async_trait::async_trait;
use neo_dappkit_types::{
    ApplicationLog, Arg, Block, InvokeResult, RpcVersion, Signer, StackItem,
};

/// The node operations the SDK relies on (object-safe).
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Number of blocks in the chain, i.e. the index of the latest block plus one.
    async fn get_block_count(&self) -> DappkitResult<u32>;

    /// The verbose block at `index`.
    async fn get_block(&self, index: u32) -> DappkitResult<Block>;

    async fn get_application_log(&self, tx_id: &str) -> DappkitResult<ApplicationLog>;

    /// Runs a base64 script without persisting anything.
    async fn invoke_script(&self, script: &str, signers: &[Signer]) -> DappkitResult<InvokeResult>;

    /// Runs a single contract method without persisting anything.
    async fn invoke_function(
        &self,
        contract: &str,
        operation: &str,
        params: &[Arg],
        signers: &[Signer],
    ) -> DappkitResult<InvokeResult>;

    /// Reads up to `count` items of an iterator kept in an RPC session.
    async fn traverse_iterator(
        &self,
        session: &str,
        iterator_id: &str,
        count: u32,
    ) -> DappkitResult<Vec<StackItem>>;

    /// Relays a signed, base64 encoded transaction and returns its hash.
    async fn send_raw_transaction(&self, transaction: &str) -> DappkitResult<String>;

    /// Network fee, in GAS fractions, a base64 encoded transaction requires.
    async fn calculate_network_fee(&self, transaction: &str) -> DappkitResult<String>;

    async fn get_version(&self) -> DappkitResult<RpcVersion>;
}

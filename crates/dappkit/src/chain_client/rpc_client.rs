// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::ChainClient;
use crate::config::RpcClientConfig;
use crate::error::{DappkitError, DappkitResult};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use neo_dappkit_types::{
    ApplicationLog, Arg, Block, InvokeResult, RpcVersion, Signer, StackItem,
};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// JSON-RPC 2.0 client of a Neo N3 node.
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    request_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct SentTransaction {
    hash: String,
}

#[derive(Deserialize)]
struct NetworkFee {
    networkfee: Value,
}

impl RpcClient {
    /// Creates a client, adding basic auth when both user and password are set.
    pub fn new(config: &RpcClientConfig) -> DappkitResult<Self> {
        let base_address = Url::parse(&config.url)
            .map_err(|err| DappkitError::Transport(format!("Invalid RPC url {}: {err}", config.url)))?;

        let mut builder = Client::builder().timeout(Duration::from_millis(config.timeout_ms));
        if let (Some(user), Some(pass)) = (&config.user, &config.password) {
            let encoded = general_purpose::STANDARD.encode(format!("{user}:{pass}"));
            let value = header::HeaderValue::from_str(&format!("Basic {encoded}"))
                .map_err(|err| DappkitError::Transport(err.to_string()))?;
            let mut headers = header::HeaderMap::new();
            headers.insert(header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http_client = builder
            .build()
            .map_err(|err| DappkitError::Transport(err.to_string()))?;
        Ok(Self::with_client(http_client, base_address))
    }

    /// Creates a client around an existing HTTP client.
    pub fn with_client(http_client: Client, base_address: Url) -> Self {
        Self {
            base_address,
            http_client,
            request_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &Url {
        &self.base_address
    }

    /// Sends a request and deserializes its `result`.
    pub async fn rpc_send<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> DappkitResult<T> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(target: "neo_dappkit::rpc", id, method, "sending request");

        let response = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await
            .map_err(|err| DappkitError::Transport(format!("HTTP error: {err}")))?;

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|err| DappkitError::Transport(format!("Failed to read response: {err}")))?;

        if let Some(error) = response.error {
            debug!(target: "neo_dappkit::rpc", id, method, code = error.code, "node returned an error");
            return Err(DappkitError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = response.result.ok_or_else(|| DappkitError::Rpc {
            code: -32603,
            message: "No result returned".to_string(),
        })?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn get_block_count(&self) -> DappkitResult<u32> {
        self.rpc_send("getblockcount", vec![]).await
    }

    async fn get_block(&self, index: u32) -> DappkitResult<Block> {
        self.rpc_send("getblock", vec![json!(index), json!(true)]).await
    }

    async fn get_application_log(&self, tx_id: &str) -> DappkitResult<ApplicationLog> {
        self.rpc_send("getapplicationlog", vec![json!(tx_id)]).await
    }

    async fn invoke_script(&self, script: &str, signers: &[Signer]) -> DappkitResult<InvokeResult> {
        self.rpc_send("invokescript", vec![json!(script), serde_json::to_value(signers)?])
            .await
    }

    async fn invoke_function(
        &self,
        contract: &str,
        operation: &str,
        params: &[Arg],
        signers: &[Signer],
    ) -> DappkitResult<InvokeResult> {
        let params: Vec<Value> = params.iter().map(Arg::to_value).collect();
        self.rpc_send(
            "invokefunction",
            vec![
                json!(contract),
                json!(operation),
                Value::Array(params),
                serde_json::to_value(signers)?,
            ],
        )
        .await
    }

    async fn traverse_iterator(
        &self,
        session: &str,
        iterator_id: &str,
        count: u32,
    ) -> DappkitResult<Vec<StackItem>> {
        self.rpc_send(
            "traverseiterator",
            vec![json!(session), json!(iterator_id), json!(count)],
        )
        .await
    }

    async fn send_raw_transaction(&self, transaction: &str) -> DappkitResult<String> {
        let sent: SentTransaction = self
            .rpc_send("sendrawtransaction", vec![json!(transaction)])
            .await?;
        Ok(sent.hash)
    }

    async fn calculate_network_fee(&self, transaction: &str) -> DappkitResult<String> {
        let fee: NetworkFee = self
            .rpc_send("calculatenetworkfee", vec![json!(transaction)])
            .await?;
        // nodes report the fee either as a string or a number
        Ok(match fee.networkfee {
            Value::String(text) => text,
            other => other.to_string(),
        })
    }

    async fn get_version(&self) -> DappkitResult<RpcVersion> {
        self.rpc_send("getversion", vec![]).await
    }
}

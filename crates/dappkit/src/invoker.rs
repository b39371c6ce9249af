// Copyright (C) 2015-2025 The Neo Project.
//
// invoker.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Read-only contract invocations.

use crate::arguments::normalize_args;
use crate::chain_client::{ChainClient, RpcClient};
use crate::config::RpcClientConfig;
use crate::error::{DappkitError, DappkitResult};
use crate::parser::decode;
use crate::script_builder::{OpCode, ScriptBuilder};
use neo_dappkit_types::{
    ContractInvocation, ContractInvocationMulti, InvokeResult, ParseConfig, Signer, StackItem,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const LOG_TARGET: &str = "neo_dappkit::invoker";

/// Runs contract methods against a node without persisting anything.
pub struct Invoker {
    client: Arc<dyn ChainClient>,
}

impl Invoker {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self { client }
    }

    pub fn connect(config: &RpcClientConfig) -> DappkitResult<Self> {
        Ok(Self::new(Arc::new(RpcClient::new(config)?)))
    }

    /// Network magic of the connected node.
    pub async fn network_magic(&self) -> DappkitResult<u32> {
        Ok(self.client.get_version().await?.protocol.network)
    }

    /// Builds the script executing every invocation in order, base64 encoded.
    ///
    /// Invocations flagged `abort_on_fail` are followed by an `ASSERT`.
    pub fn build_script(cim: &ContractInvocationMulti) -> DappkitResult<String> {
        let mut builder = ScriptBuilder::new();
        for invocation in &cim.invocations {
            let args = normalize_args(&invocation.args)?;
            builder.emit_contract_call(&invocation.script_hash, &invocation.operation, &args)?;
            if invocation.abort_on_fail {
                builder.emit(OpCode::ASSERT);
            }
        }
        Ok(builder.to_base64())
    }

    /// Test-invokes every invocation of `cim` as one script.
    pub async fn test_invoke(&self, cim: &ContractInvocationMulti) -> DappkitResult<InvokeResult> {
        let script = Self::build_script(cim)?;
        debug!(target: LOG_TARGET, invocations = cim.invocations.len(), "Test invoking script");

        let result = self.client.invoke_script(&script, &cim.signers).await?;
        ensure_not_faulted(result)
    }

    /// Test-invokes a single method through `invokefunction`.
    pub async fn invoke_function(
        &self,
        invocation: &ContractInvocation,
        signers: &[Signer],
    ) -> DappkitResult<InvokeResult> {
        let args = normalize_args(&invocation.args)?;
        debug!(
            target: LOG_TARGET,
            contract = %invocation.script_hash,
            operation = %invocation.operation,
            "Test invoking function"
        );

        let result = self
            .client
            .invoke_function(&invocation.script_hash, &invocation.operation, &args, signers)
            .await?;
        ensure_not_faulted(result)
    }

    /// Reads up to `count` items of an iterator returned by a test invocation.
    pub async fn traverse_iterator(
        &self,
        session: &str,
        iterator_id: &str,
        count: u32,
    ) -> DappkitResult<Vec<StackItem>> {
        self.client.traverse_iterator(session, iterator_id, count).await
    }
}

/// Decodes the result stack item at `index` with an optional type hint.
pub fn decode_result(
    result: &InvokeResult,
    index: usize,
    config: Option<&ParseConfig>,
) -> DappkitResult<Value> {
    let item = result.stack.get(index).ok_or_else(|| {
        DappkitError::invalid_argument(format!(
            "Result stack has {} items, no item at {index}",
            result.stack.len()
        ))
    })?;
    Ok(decode(item, config)?)
}

fn ensure_not_faulted(result: InvokeResult) -> DappkitResult<InvokeResult> {
    if result.state.is_fault() {
        return Err(DappkitError::ExecutionFault(
            result.exception.unwrap_or_else(|| "unknown".to_string()),
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_dappkit_types::VMState;
    use serde_json::json;

    const GAS: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";

    fn balance_of() -> ContractInvocation {
        ContractInvocation::new(GAS, "balanceOf").with_args(vec![json!({
            "type": "Hash160",
            "value": "0x857a247939db5c7cd3a7bb14791280c09e824bea"
        })])
    }

    #[test]
    fn builds_contract_call_script() {
        let script = Invoker::build_script(&ContractInvocationMulti::single(balance_of())).unwrap();
        assert_eq!(
            script,
            "DBTqS4KewIASeRS7p9N8XNs5eSR6hRHAHwwJYmFsYW5jZU9mDBTPduKL0AYsSkeO41VhARMZ88+k0kFifVtS"
        );
    }

    #[test]
    fn appends_assert_when_aborting_on_failure() {
        let mut invocation = balance_of();
        invocation.abort_on_fail = true;
        let script = Invoker::build_script(&ContractInvocationMulti::single(invocation)).unwrap();
        let bytes = crate::parser::convert::decode_base64(&script).unwrap();
        assert_eq!(bytes.last(), Some(&(OpCode::ASSERT as u8)));
    }

    #[test]
    fn rejects_malformed_arguments_before_building() {
        let invocation = ContractInvocation::new(GAS, "balanceOf").with_args(vec![json!({ "value": 1 })]);
        let err = Invoker::build_script(&ContractInvocationMulti::single(invocation)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument type");
    }

    #[test]
    fn fault_results_become_errors() {
        let result = InvokeResult {
            script: String::new(),
            state: VMState::FAULT,
            gasconsumed: "0".to_string(),
            exception: Some("ASSERT is executed with false result.".to_string()),
            stack: vec![],
            tx: None,
            session: None,
            notifications: vec![],
        };
        let err = ensure_not_faulted(result).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Execution state is FAULT. Exception: ASSERT is executed with false result."
        );
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// invoker_tests.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use neo_dappkit::types::{
    Arg, ContractInvocation, ContractInvocationMulti, InvokeResult, ParseConfig, Signer,
    StackItem, VMState,
};
use neo_dappkit::{decode_result, DappkitError, Invoker, MockChainClient};
use serde_json::json;
use std::sync::Arc;

const GAS: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";
const OWNER: &str = "NhGomBpYnKXArr55nHRQ5rzy79TwKVXZbr";

fn invoke_result(state: VMState, stack: Vec<StackItem>) -> InvokeResult {
    InvokeResult {
        script: String::new(),
        state,
        gasconsumed: "2028330".to_string(),
        exception: state.is_fault().then(|| "Method not found".to_string()),
        stack,
        tx: None,
        session: None,
        notifications: vec![],
    }
}

fn balance_of() -> ContractInvocation {
    ContractInvocation::new(GAS, "balanceOf")
        .with_args(vec![json!({ "type": "Address", "value": OWNER })])
}

#[tokio::test]
async fn test_test_invoke_sends_one_script() -> anyhow::Result<()> {
    let client = Arc::new(MockChainClient::new());
    client.set_invoke_result(
        "balanceOf",
        invoke_result(VMState::HALT, vec![StackItem::integer(150_000_000)]),
    );
    let invoker = Invoker::new(client.clone());

    let cim = ContractInvocationMulti::single(balance_of())
        .with_signers(vec![Signer::called_by_entry("0x857a247939db5c7cd3a7bb14791280c09e824bea")]);
    let result = invoker.test_invoke(&cim).await?;

    assert_eq!(decode_result(&result, 0, Some(&ParseConfig::Integer))?, json!(150_000_000));
    assert_eq!(
        client.invoked_scripts(),
        vec!["DBTqS4KewIASeRS7p9N8XNs5eSR6hRHAHwwJYmFsYW5jZU9mDBTPduKL0AYsSkeO41VhARMZ88+k0kFifVtS".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_test_invoke_fault_is_an_error() {
    let client = Arc::new(MockChainClient::new());
    client.set_invoke_result("balanceOf", invoke_result(VMState::FAULT, vec![]));
    let invoker = Invoker::new(client);

    let err = invoker
        .test_invoke(&ContractInvocationMulti::single(balance_of()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Execution state is FAULT. Exception: Method not found");
}

#[tokio::test]
async fn test_invoke_function_normalizes_arguments() {
    let client = Arc::new(MockChainClient::new());
    client.set_invoke_result(
        "balanceOf",
        invoke_result(VMState::HALT, vec![StackItem::integer(0)]),
    );
    let invoker = Invoker::new(client.clone());

    invoker.invoke_function(&balance_of(), &[]).await.unwrap();

    let (contract, operation, params) = client.invoked_functions().remove(0);
    assert_eq!(contract, GAS);
    assert_eq!(operation, "balanceOf");
    assert_eq!(
        params,
        vec![Arg::Hash160 {
            value: "857a247939db5c7cd3a7bb14791280c09e824bea".to_string()
        }]
    );
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_the_node() {
    let client = Arc::new(MockChainClient::new());
    let invoker = Invoker::new(client.clone());
    let invocation = ContractInvocation::new(GAS, "transfer")
        .with_args(vec![json!({ "type": "ByteArray", "value": "zz" })]);

    let err = invoker
        .test_invoke(&ContractInvocationMulti::single(invocation))
        .await
        .unwrap_err();
    assert!(matches!(err, DappkitError::InvalidArgument(_)));
    assert!(client.invoked_scripts().is_empty());
}

#[tokio::test]
async fn test_traverse_iterator_pages() -> anyhow::Result<()> {
    let client = Arc::new(MockChainClient::new());
    client.set_iterator(
        "session-1",
        "iterator-1",
        vec![StackItem::utf8("a"), StackItem::utf8("b"), StackItem::utf8("c")],
    );
    let invoker = Invoker::new(client);

    let first = invoker.traverse_iterator("session-1", "iterator-1", 2).await?;
    let second = invoker.traverse_iterator("session-1", "iterator-1", 2).await?;
    assert_eq!(first, vec![StackItem::utf8("a"), StackItem::utf8("b")]);
    assert_eq!(second, vec![StackItem::utf8("c")]);
    Ok(())
}

#[tokio::test]
async fn test_network_magic() {
    let invoker = Invoker::new(Arc::new(MockChainClient::new()));
    assert_eq!(invoker.network_magic().await.unwrap(), 860833102);
}

#[test]
fn test_decode_result_out_of_range() {
    let result = invoke_result(VMState::HALT, vec![]);
    assert!(decode_result(&result, 0, None).is_err());
}

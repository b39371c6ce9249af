// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Neo dApp Kit Types
//!
//! Wire-level data model shared by the dApp kit crates: the stack item
//! union returned by contract executions, the recursive type hints used to
//! decode them, contract call arguments, application logs and the
//! structural classifiers that guard untyped JSON at the SDK boundary.

pub mod application_log;
pub mod arg;
pub mod error;
pub mod invocation;
pub mod parse_config;
pub mod stack_item;
pub mod type_checker;

pub use application_log::{
    ApplicationExecution, ApplicationLog, Neo3Event, Notification, VMState,
};
pub use arg::{Arg, ArgMapEntry};
pub use error::{TypesError, TypesResult};
pub use invocation::{
    Block, BlockTransaction, ContractInvocation, ContractInvocationMulti, InvokeResult,
    ProtocolInfo, RpcVersion, Signer,
};
pub use parse_config::{AbiType, HintType, ParseConfig};
pub use stack_item::{StackItem, StackItemMapEntry, StackItemType};
pub use type_checker::TypeChecker;

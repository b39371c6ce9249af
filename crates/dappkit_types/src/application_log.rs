// Copyright (C) 2015-2025 The Neo Project.
//
// application_log.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::TypesError;
use crate::stack_item::{deserialize_lenient_item, deserialize_lenient_items, StackItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal state of a VM execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VMState {
    /// Indicates that the execution is in progress or has not yet begun.
    NONE,

    /// Indicates that the execution has been completed successfully.
    HALT,

    /// Indicates that the execution has ended with an uncaught exception.
    FAULT,

    /// Indicates that a breakpoint is currently being hit.
    BREAK,
}

impl VMState {
    #[inline]
    pub fn is_halt(self) -> bool {
        self == VMState::HALT
    }

    #[inline]
    pub fn is_fault(self) -> bool {
        self == VMState::FAULT
    }
}

impl fmt::Display for VMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            VMState::NONE => "NONE",
            VMState::HALT => "HALT",
            VMState::FAULT => "FAULT",
            VMState::BREAK => "BREAK",
        };
        f.write_str(text)
    }
}

impl FromStr for VMState {
    type Err = TypesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(VMState::NONE),
            "HALT" => Ok(VMState::HALT),
            "FAULT" => Ok(VMState::FAULT),
            "BREAK" => Ok(VMState::BREAK),
            _ => Err(TypesError::UnknownType(value.to_string())),
        }
    }
}

/// An event emitted by a contract during execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Script hash of the emitting contract, `0x` prefixed.
    pub contract: String,
    pub eventname: String,

    /// Payloads the model cannot read are kept as `Any` with the raw JSON.
    #[serde(deserialize_with = "deserialize_lenient_item")]
    pub state: StackItem,
}

/// Identifies an event by its emitting contract and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neo3Event {
    pub contract: String,
    pub eventname: String,
}

impl Neo3Event {
    pub fn new(contract: impl Into<String>, eventname: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            eventname: eventname.into(),
        }
    }

    /// True when `notification` was emitted by this contract under this name.
    pub fn matches(&self, notification: &Notification) -> bool {
        notification.contract == self.contract && notification.eventname == self.eventname
    }
}

/// One execution of a transaction script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationExecution {
    pub trigger: String,

    /// Nodes report this field as `vmstate`.
    #[serde(alias = "vmstate")]
    pub state: VMState,

    /// Decimal GAS fractions consumed.
    pub gasconsumed: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,

    #[serde(default, deserialize_with = "deserialize_lenient_items")]
    pub stack: Vec<StackItem>,

    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Execution record of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLog {
    pub txid: String,
    #[serde(default)]
    pub executions: Vec<ApplicationExecution>,
}

impl ApplicationLog {
    /// The execution every confirmation helper inspects.
    pub fn first_execution(&self) -> Option<&ApplicationExecution> {
        self.executions.first()
    }
}

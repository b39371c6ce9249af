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

//! Neo dApp Kit
//!
//! Client-side helpers for Neo N3 smart contracts:
//!
//! - [`parser`] turns stack items returned by a node into plain JSON values
//!   and values into contract call arguments, guided by ABI type hints.
//! - [`EventListener`] delivers contract notifications to callbacks by
//!   polling blocks, and waits for and checks transaction results.
//! - [`Invoker`] test-invokes contract methods.
//! - [`ChainClient`] abstracts the node; [`RpcClient`] speaks JSON-RPC.
//!
//! Wire types live in [`neo_dappkit_types`] and are re-exported as [`types`].

pub mod account;
pub mod arguments;
pub mod chain_client;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod event_listener;
pub mod invoker;
pub mod parser;
pub mod script_builder;

pub use neo_dappkit_types as types;

pub use arguments::{normalize_arg, normalize_args};
pub use chain_client::{ChainClient, MockChainClient, RpcClient};
pub use config::{EventListenerOptions, RpcClientConfig, WaitForApplicationLogOptions};
pub use error::{CallbackError, DappkitError, DappkitResult, DecodeError};
pub use event_listener::{EventCallback, EventListener, ListenerId, ListenerState};
pub use invoker::{decode_result, Invoker};
pub use parser::{arg_to_stack_item, decode, decode_big_integer, decode_value, encode};
pub use script_builder::ScriptBuilder;

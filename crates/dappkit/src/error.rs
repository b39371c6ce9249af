// Copyright (C) 2015-2025 The Neo Project.
//
// error.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use neo_dappkit_types::TypesError;
use thiserror::Error;

/// Result type alias for dApp kit operations.
pub type DappkitResult<T> = Result<T, DappkitError>;

/// Error returned by a listener callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// A type hint the wire data does not satisfy.
///
/// Kept apart from [`DappkitError`] so callers can tell a mismatch from a
/// transport failure. Ambiguous or missing hints never produce one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{0} is not a Hash160")]
    InvalidHash160(String),

    #[error("{0} is not a Hash256")]
    InvalidHash256(String),

    #[error("{0} is not an Address")]
    InvalidAddress(String),

    #[error("{0} is not valid base64")]
    InvalidBase64(String),

    #[error("{0} is not an Integer")]
    InvalidInteger(String),

    #[error("Value is not a stack item: {0}")]
    NotAStackItem(String),

    #[error("A {config} parse config cannot be applied to a {item} stack item")]
    IncompatibleConfig { config: String, item: String },
}

/// dApp kit errors.
#[derive(Error, Debug)]
pub enum DappkitError {
    /// Stack item decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An argument could not be encoded or normalised.
    #[error("{0}")]
    InvalidArgument(String),

    /// Address, script hash or public key input that is not well formed.
    #[error("Invalid account: {0}")]
    Account(String),

    /// RPC error from node.
    #[error("RPC error: {code} - {message}")]
    Rpc { code: i64, message: String },

    /// Transport/network error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A confirmation check rejected a transaction result.
    #[error("{0}")]
    Transaction(String),

    /// An invocation ended in `FAULT`.
    #[error("Execution state is FAULT. Exception: {0}")]
    ExecutionFault(String),

    /// A listener callback failed. Logged by the poller, never propagated.
    #[error("Listener callback failed: {0}")]
    Callback(String),

    /// No tokio runtime to spawn the polling loop on.
    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Wire type error.
    #[error(transparent)]
    Types(#[from] TypesError),
}

impl DappkitError {
    /// Helper for creating an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Helper for creating a confirmation failure.
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction(message.into())
    }

    /// Helper for creating an account format error.
    pub fn account(message: impl Into<String>) -> Self {
        Self::Account(message.into())
    }
}

impl From<TypesError> for DecodeError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::NotAStackItem(value) => DecodeError::NotAStackItem(value),
            other => DecodeError::NotAStackItem(other.to_string()),
        }
    }
}

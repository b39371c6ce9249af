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

use thiserror::Error;

/// Result type alias for wire type operations.
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors raised while reading wire-level values.
#[derive(Error, Debug)]
pub enum TypesError {
    /// The JSON value does not have the shape of any stack item variant.
    #[error("Value is not a stack item: {0}")]
    NotAStackItem(String),

    /// A `type` discriminator that is not part of the closed type set.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A ParseConfig that could not be read.
    #[error("Invalid parse config: {0}")]
    InvalidParseConfig(String),

    /// JSON serialisation/deserialisation error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TypesError {
    /// Helper for creating a shape error from the offending value.
    pub fn not_a_stack_item(value: &serde_json::Value) -> Self {
        Self::NotAStackItem(value.to_string())
    }
}

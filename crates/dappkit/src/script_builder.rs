// Copyright (C) 2015-2025 The Neo Project.
//
// script_builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Builds the invocation scripts sent to `invokescript`.

use crate::account::{self, strip_hex_prefix};
use crate::error::{DappkitError, DappkitResult};
use crate::parser::{arg_to_stack_item, convert::decode_base64};
use base64::{engine::general_purpose, Engine as _};
use neo_dappkit_types::{Arg, StackItem};
use num_bigint::{BigInt, Sign};
use sha2::{Digest, Sha256};

/// The NeoVM opcodes the builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    PUSHINT8 = 0x00,
    PUSHINT16 = 0x01,
    PUSHINT32 = 0x02,
    PUSHINT64 = 0x03,
    PUSHINT128 = 0x04,
    PUSHINT256 = 0x05,
    PUSHT = 0x08,
    PUSHF = 0x09,
    PUSHNULL = 0x0B,
    PUSHDATA1 = 0x0C,
    PUSHDATA2 = 0x0D,
    PUSHDATA4 = 0x0E,
    PUSHM1 = 0x0F,
    PUSH0 = 0x10,
    ASSERT = 0x39,
    SYSCALL = 0x41,
    PACKMAP = 0xBE,
    PACK = 0xC0,
    NEWARRAY0 = 0xC2,
}

/// Call flags passed to `System.Contract.Call`.
pub const CALL_FLAGS_ALL: i64 = 0x0f;

const CONTRACT_CALL: &str = "System.Contract.Call";

/// Helps construct VM scripts programmatically.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    /// Pushes raw data with the shortest PUSHDATA form.
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= 0xFF {
            self.emit(OpCode::PUSHDATA1);
            self.script.push(len as u8);
        } else if len <= 0xFFFF {
            self.emit(OpCode::PUSHDATA2);
            self.script.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.emit(OpCode::PUSHDATA4);
            self.script.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.script.extend_from_slice(data);
        self
    }

    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push_bytes(value.as_bytes())
    }

    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        self.emit(if value { OpCode::PUSHT } else { OpCode::PUSHF })
    }

    /// Pushes an integer with `PUSHM1`..`PUSH16` or the smallest `PUSHINT*`.
    pub fn emit_push_integer(&mut self, value: &BigInt) -> DappkitResult<&mut Self> {
        if let Ok(small) = i8::try_from(value) {
            if (-1..=16).contains(&small) {
                self.script.push((OpCode::PUSH0 as u8 as i16 + small as i16) as u8);
                return Ok(self);
            }
        }

        let bytes = value.to_signed_bytes_le();
        let (op, size) = match bytes.len() {
            1 => (OpCode::PUSHINT8, 1),
            2 => (OpCode::PUSHINT16, 2),
            3..=4 => (OpCode::PUSHINT32, 4),
            5..=8 => (OpCode::PUSHINT64, 8),
            9..=16 => (OpCode::PUSHINT128, 16),
            17..=32 => (OpCode::PUSHINT256, 32),
            _ => {
                return Err(DappkitError::invalid_argument(format!(
                    "{value} does not fit in 256 bits"
                )))
            }
        };
        Ok(self.emit_push_padded(op, bytes, size, value.sign() == Sign::Minus))
    }

    /// Pushes an `i64`, which always fits in `PUSHINT64`.
    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        if (-1..=16).contains(&value) {
            self.script.push((OpCode::PUSH0 as i64 + value) as u8);
            return self;
        }

        let bytes = BigInt::from(value).to_signed_bytes_le();
        let (op, size) = match bytes.len() {
            1 => (OpCode::PUSHINT8, 1),
            2 => (OpCode::PUSHINT16, 2),
            3..=4 => (OpCode::PUSHINT32, 4),
            _ => (OpCode::PUSHINT64, 8),
        };
        self.emit_push_padded(op, bytes, size, value < 0)
    }

    /// Sign-extends little-endian `bytes` to `size` and emits them after `op`.
    fn emit_push_padded(&mut self, op: OpCode, mut bytes: Vec<u8>, size: usize, negative: bool) -> &mut Self {
        bytes.resize(size, if negative { 0xFF } else { 0x00 });
        self.emit(op);
        self.script.extend_from_slice(&bytes);
        self
    }

    /// Emits a syscall by its interop name.
    pub fn emit_syscall(&mut self, api: &str) -> &mut Self {
        self.emit(OpCode::SYSCALL);
        self.script.extend_from_slice(&interop_hash(api));
        self
    }

    /// Pushes a stack item the way a contract would receive it.
    pub fn emit_push_stack_item(&mut self, item: &StackItem) -> DappkitResult<&mut Self> {
        match item {
            StackItem::Any { .. } => {
                self.emit(OpCode::PUSHNULL);
            }
            StackItem::Boolean { value } => {
                self.emit_push_bool(*value);
            }
            StackItem::Integer { value } => {
                let integer = value.trim().parse::<BigInt>().map_err(|_| {
                    DappkitError::invalid_argument(format!("Invalid Integer value: {value}"))
                })?;
                self.emit_push_integer(&integer)?;
            }
            StackItem::ByteString { value } | StackItem::Buffer { value } => {
                self.emit_push_bytes(&decode_base64(value)?);
            }
            StackItem::Array { value } | StackItem::Struct { value } => {
                self.emit_pack(value)?;
            }
            StackItem::Map { value } => {
                for entry in value.iter().rev() {
                    self.emit_push_stack_item(&entry.value)?;
                    self.emit_push_stack_item(&entry.key)?;
                }
                self.emit_push_int(value.len() as i64);
                self.emit(OpCode::PACKMAP);
            }
            other => {
                return Err(DappkitError::invalid_argument(format!(
                    "Cannot push a {} stack item",
                    other.item_type()
                )))
            }
        }
        Ok(self)
    }

    /// Pushes the items in reverse order and packs them into an array.
    fn emit_pack(&mut self, items: &[StackItem]) -> DappkitResult<&mut Self> {
        if items.is_empty() {
            return Ok(self.emit(OpCode::NEWARRAY0));
        }
        for item in items.iter().rev() {
            self.emit_push_stack_item(item)?;
        }
        self.emit_push_int(items.len() as i64);
        Ok(self.emit(OpCode::PACK))
    }

    /// Emits `System.Contract.Call` of `operation` with all call flags.
    ///
    /// `script_hash` is big-endian, with or without `0x`.
    pub fn emit_contract_call(
        &mut self,
        script_hash: &str,
        operation: &str,
        args: &[Arg],
    ) -> DappkitResult<&mut Self> {
        let items = args
            .iter()
            .map(arg_to_stack_item)
            .collect::<DappkitResult<Vec<_>>>()?;
        if !account::is_script_hash(script_hash) {
            return Err(DappkitError::invalid_argument(format!(
                "Invalid contract script hash: {script_hash}"
            )));
        }
        let mut hash = hex::decode(strip_hex_prefix(script_hash))
            .map_err(|err| DappkitError::invalid_argument(err.to_string()))?;
        hash.reverse();

        self.emit_pack(&items)?;
        self.emit_push_int(CALL_FLAGS_ALL);
        self.emit_push_string(operation);
        self.emit_push_bytes(&hash);
        Ok(self.emit_syscall(CONTRACT_CALL))
    }

    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }

    /// The script as `invokescript` expects it.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.script)
    }
}

/// First four bytes of the SHA-256 of the interop name.
fn interop_hash(api: &str) -> [u8; 4] {
    let digest = Sha256::digest(api.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_small_and_large_integers() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(-1).emit_push_int(0).emit_push_int(16);
        builder.emit_push_int(17).emit_push_int(-2).emit_push_int(1000);
        assert_eq!(hex::encode(builder.to_array()), "0f1020001100fe01e803");
    }

    #[test]
    fn pads_integers_to_their_push_width() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(100_000).emit_push_int(-100_000);
        assert_eq!(hex::encode(builder.to_array()), "02a0860100026079feff");

        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(i64::MAX).emit_push_int(i64::MIN);
        assert_eq!(
            hex::encode(builder.to_array()),
            "03ffffffffffffff7f030000000000000080"
        );

        let too_big = BigInt::from(1) << 256;
        assert!(ScriptBuilder::new().emit_push_integer(&too_big).is_err());
    }

    #[test]
    fn pushes_data_with_length_prefix() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_string("neo").emit_push_bool(true);
        assert_eq!(hex::encode(builder.to_array()), "0c036e656f08");

        let long = vec![0u8; 300];
        let script = ScriptBuilder::new().emit_push_bytes(&long).to_array();
        assert_eq!(&script[..3], &[OpCode::PUSHDATA2 as u8, 0x2c, 0x01]);
    }

    #[test]
    fn builds_contract_calls() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_contract_call(
                "0xd2a4cff31913016155e38e474a2c06d08be276cf",
                "balanceOf",
                &[Arg::Hash160 {
                    value: "857a247939db5c7cd3a7bb14791280c09e824bea".to_string(),
                }],
            )
            .unwrap();
        assert_eq!(
            builder.to_base64(),
            "DBTqS4KewIASeRS7p9N8XNs5eSR6hRHAHwwJYmFsYW5jZU9mDBTPduKL0AYsSkeO41VhARMZ88+k0kFifVtS"
        );
    }

    #[test]
    fn empty_argument_lists_use_newarray0() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_contract_call("d2a4cff31913016155e38e474a2c06d08be276cf", "symbol", &[])
            .unwrap();
        assert_eq!(builder.to_array()[0], OpCode::NEWARRAY0 as u8);
        assert!(ScriptBuilder::new()
            .emit_contract_call("0x1234", "symbol", &[])
            .is_err());
    }

    #[test]
    fn syscalls_use_interop_hashes() {
        let script = ScriptBuilder::new().emit_syscall("System.Crypto.CheckSig").to_array();
        assert_eq!(hex::encode(script), "4156e7b327");
    }
}

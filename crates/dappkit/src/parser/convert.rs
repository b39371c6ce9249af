// Copyright (C) 2015-2025 The Neo Project.
//
// convert.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Hex, base64 and text conversions used around stack items.

use crate::account::strip_hex_prefix;
use crate::error::{DappkitError, DappkitResult, DecodeError};
use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Nodes and wallets do not always pad; decoding accepts both forms.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub(crate) fn decode_base64(input: &str) -> Result<Vec<u8>, DecodeError> {
    LENIENT
        .decode(input)
        .map_err(|_| DecodeError::InvalidBase64(input.to_string()))
}

/// Canonical, padded base64 check used when classifying arguments.
pub(crate) fn is_strict_base64(input: &str) -> bool {
    general_purpose::STANDARD.decode(input).is_ok()
}

/// Even-length hex in a single letter case.
pub(crate) fn is_single_case_hex(input: &str) -> bool {
    if input.len() % 2 != 0 || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    let lower = input.bytes().all(|b| !b.is_ascii_uppercase());
    let upper = input.bytes().all(|b| !b.is_ascii_lowercase());
    lower || upper
}

fn decode_hex(input: &str) -> DappkitResult<Vec<u8>> {
    hex::decode(strip_hex_prefix(input))
        .map_err(|err| DappkitError::invalid_argument(format!("{input} is not hex: {err}")))
}

pub fn base64_to_hex(input: &str) -> DappkitResult<String> {
    Ok(hex::encode(decode_base64(input)?))
}

pub fn hex_to_base64(input: &str) -> DappkitResult<String> {
    Ok(general_purpose::STANDARD.encode(decode_hex(input)?))
}

/// Fails when the decoded bytes are not UTF-8.
pub fn base64_to_utf8(input: &str) -> DappkitResult<String> {
    String::from_utf8(decode_base64(input)?).map_err(|_| {
        DappkitError::invalid_argument(format!("{input} does not hold UTF-8 text"))
    })
}

pub fn utf8_to_base64(input: &str) -> String {
    general_purpose::STANDARD.encode(input.as_bytes())
}

pub fn str_to_hexstring(input: &str) -> String {
    hex::encode(input.as_bytes())
}

pub fn hexstring_to_str(input: &str) -> DappkitResult<String> {
    String::from_utf8(decode_hex(input)?)
        .map_err(|_| DappkitError::invalid_argument(format!("{input} does not hold UTF-8 text")))
}

/// Reverses the byte order of a hex string, e.g. `"0a0b0c"` to `"0c0b0a"`.
pub fn reverse_hex(input: &str) -> DappkitResult<String> {
    let mut bytes = decode_hex(input)?;
    bytes.reverse();
    Ok(hex::encode(bytes))
}

/// Minimal even-length hex of `num`.
pub fn int_to_hex(num: u64) -> String {
    let hex = format!("{num:x}");
    if hex.len() % 2 == 0 {
        hex
    } else {
        format!("0{hex}")
    }
}

/// Hex of `num` zero-padded to a whole number of `size`-byte words.
pub fn num_to_hexstring(num: u64, size: usize, little_endian: bool) -> DappkitResult<String> {
    if size == 0 {
        return Err(DappkitError::invalid_argument("size must be positive"));
    }

    let width = size * 2;
    let hex = format!("{num:x}");
    let padded_len = hex.len().div_ceil(width) * width;
    let padded = format!("{hex:0>padded_len$}");

    if little_endian {
        reverse_hex(&padded)
    } else {
        Ok(padded)
    }
}

/// Variable-length integer prefix used by Neo serialization.
pub fn num_to_var_int(num: u64) -> DappkitResult<String> {
    match num {
        0..=0xfc => num_to_hexstring(num, 1, false),
        0xfd..=0xffff => Ok(format!("fd{}", num_to_hexstring(num, 2, true)?)),
        0x1_0000..=0xffff_ffff => Ok(format!("fe{}", num_to_hexstring(num, 4, true)?)),
        _ => Ok(format!("ff{}", num_to_hexstring(num, 8, true)?)),
    }
}

// Copyright (C) 2015-2025 The Neo Project.
//
// account.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Address, script hash and public key conversions.
//!
//! Script hashes are exchanged as big-endian hex without a `0x` prefix,
//! the form Neo N3 contract parameters use.

use crate::error::{DappkitError, DappkitResult};
use once_cell::sync::Lazy;
use regex::Regex;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Address version byte of Neo N3 networks.
pub const ADDRESS_VERSION: u8 = 0x35;

const ADDRESS_LENGTH: usize = 34;
const SCRIPT_HASH_SIZE: usize = 20;
const COMPRESSED_KEY_SIZE: usize = 33;

/// `System.Crypto.CheckSig` interop hash, little-endian.
const CHECK_SIG: [u8; 4] = [0x56, 0xe7, 0xb3, 0x27];

static ADDRESS_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[AN][1-9A-HJ-NP-Za-km-z]{33}$").expect("address pattern is valid")
});

/// Cheap shape check: 34 base58 characters starting with `A` or `N`.
///
/// Does not verify the checksum, see [`is_valid_address`].
pub fn looks_like_address(value: &str) -> bool {
    value.len() == ADDRESS_LENGTH && ADDRESS_SHAPE.is_match(value)
}

/// True when `value` decodes to a script hash under [`ADDRESS_VERSION`].
pub fn is_valid_address(value: &str) -> bool {
    script_hash_from_address(value).is_ok()
}

/// True for a big-endian or little-endian script hash, with or without `0x`.
pub fn is_script_hash(value: &str) -> bool {
    let hex = strip_hex_prefix(value);
    hex.len() == SCRIPT_HASH_SIZE * 2 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// True for a compressed (`02`/`03`) or uncompressed (`04`) public key.
pub fn is_public_key(value: &str) -> bool {
    let hex = strip_hex_prefix(value);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    match hex.len() {
        66 => hex.starts_with("02") || hex.starts_with("03"),
        130 => hex.starts_with("04"),
        _ => false,
    }
}

/// Converts an address to its big-endian script hash.
pub fn script_hash_from_address(address: &str) -> DappkitResult<String> {
    let data = base58_check_decode(address)?;
    if data.len() != SCRIPT_HASH_SIZE + 1 {
        return Err(DappkitError::account(format!(
            "expected 21 bytes after Base58Check decoding {address}, got {}",
            data.len()
        )));
    }
    if data[0] != ADDRESS_VERSION {
        return Err(DappkitError::account(format!(
            "address version {:#04x} of {address} is not {ADDRESS_VERSION:#04x}",
            data[0]
        )));
    }

    let mut hash = data[1..].to_vec();
    hash.reverse();
    Ok(hex::encode(hash))
}

/// Converts a big-endian script hash, with or without `0x`, to an address.
pub fn address_from_script_hash(script_hash: &str) -> DappkitResult<String> {
    if !is_script_hash(script_hash) {
        return Err(DappkitError::account(format!(
            "{script_hash} is not a script hash"
        )));
    }
    let mut little_endian = hex::decode(strip_hex_prefix(script_hash))
        .map_err(|err| DappkitError::account(err.to_string()))?;
    little_endian.reverse();

    let mut data = Vec::with_capacity(SCRIPT_HASH_SIZE + 1);
    data.push(ADDRESS_VERSION);
    data.extend_from_slice(&little_endian);
    Ok(base58_check_encode(&data))
}

/// Big-endian script hash of the single-signature account of `public_key`.
///
/// Only compressed keys back a standard account.
pub fn script_hash_from_public_key(public_key: &str) -> DappkitResult<String> {
    let key = hex::decode(strip_hex_prefix(public_key))
        .map_err(|err| DappkitError::account(format!("{public_key}: {err}")))?;
    if key.len() != COMPRESSED_KEY_SIZE || !(key[0] == 0x02 || key[0] == 0x03) {
        return Err(DappkitError::account(format!(
            "{public_key} is not a compressed public key"
        )));
    }

    let mut hash = hash160(&signature_redeem_script(&key));
    hash.reverse();
    Ok(hex::encode(hash))
}

/// Resolves an address, script hash or public key to a big-endian script hash.
pub fn account_input_to_script_hash(input: &str) -> DappkitResult<String> {
    if is_script_hash(input) {
        return Ok(strip_hex_prefix(input).to_ascii_lowercase());
    }
    if is_public_key(input) {
        return script_hash_from_public_key(input);
    }
    if looks_like_address(input) {
        return script_hash_from_address(input);
    }
    Err(DappkitError::account(format!(
        "{input} is neither an address, a script hash nor a public key"
    )))
}

/// Resolves an address, script hash or public key to an address.
pub fn account_input_to_address(input: &str) -> DappkitResult<String> {
    if looks_like_address(input) {
        script_hash_from_address(input)?;
        return Ok(input.to_string());
    }
    address_from_script_hash(&account_input_to_script_hash(input)?)
}

pub(crate) fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// PUSHDATA1 33 <key> SYSCALL CheckSig
fn signature_redeem_script(key: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(40);
    script.push(0x0c);
    script.push(COMPRESSED_KEY_SIZE as u8);
    script.extend_from_slice(key);
    script.push(0x41);
    script.extend_from_slice(&CHECK_SIG);
    script
}

fn hash160(data: &[u8]) -> Vec<u8> {
    Ripemd160::digest(Sha256::digest(data)).to_vec()
}

fn hash256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(Sha256::digest(data)).to_vec()
}

fn base58_check_encode(data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + 4);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&hash256(data)[..4]);
    bs58::encode(payload).into_string()
}

fn base58_check_decode(value: &str) -> DappkitResult<Vec<u8>> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|err| DappkitError::account(format!("{value} is not base58: {err}")))?;
    if bytes.len() < 4 {
        return Err(DappkitError::account(format!(
            "{value} is too short for a Base58Check payload"
        )));
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    if checksum != &hash256(payload)[..4] {
        return Err(DappkitError::account(format!(
            "Base58Check checksum mismatch for {value}"
        )));
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "NhGomBpYnKXArr55nHRQ5rzy79TwKVXZbr";
    const SCRIPT_HASH: &str = "857a247939db5c7cd3a7bb14791280c09e824bea";
    const PUBLIC_KEY: &str = "03cdb067d930fd5adaa6c68545016044aaddec64ba39e548250eaea551172e535c";

    #[test]
    fn converts_between_address_and_script_hash() {
        assert_eq!(script_hash_from_address(ADDRESS).unwrap(), SCRIPT_HASH);
        assert_eq!(address_from_script_hash(SCRIPT_HASH).unwrap(), ADDRESS);
        assert_eq!(
            address_from_script_hash(&format!("0x{SCRIPT_HASH}")).unwrap(),
            ADDRESS
        );
    }

    #[test]
    fn derives_account_from_public_key() {
        assert_eq!(
            script_hash_from_public_key(PUBLIC_KEY).unwrap(),
            "a5de523ae9d99be784a536e9412b7a3cbe049e1a"
        );
        assert_eq!(
            account_input_to_address(PUBLIC_KEY).unwrap(),
            "NNLi44dJNXtDNSBkofB48aTVYtb1zZrNEs"
        );
    }

    #[test]
    fn resolves_any_account_input() {
        assert_eq!(account_input_to_script_hash(ADDRESS).unwrap(), SCRIPT_HASH);
        assert_eq!(
            account_input_to_script_hash("0x857A247939DB5C7CD3A7BB14791280C09E824BEA").unwrap(),
            SCRIPT_HASH
        );
        assert_eq!(account_input_to_address(ADDRESS).unwrap(), ADDRESS);
        assert!(account_input_to_script_hash("not an account").is_err());
    }

    #[test]
    fn rejects_corrupted_addresses() {
        assert!(looks_like_address(ADDRESS));
        assert!(!looks_like_address("NhGomBpYnKXArr55"));
        assert!(!looks_like_address("NhGomBpYnKXArr55nHRQ5rzy79TwKVXZ0r"));

        let corrupted = "NhGomBpYnKXArr55nHRQ5rzy79TwKVXZbs";
        assert!(looks_like_address(corrupted));
        assert!(!is_valid_address(corrupted));
    }

    #[test]
    fn classifies_public_keys() {
        assert!(is_public_key(PUBLIC_KEY));
        assert!(is_public_key(&format!("04{}", "ab".repeat(64))));
        assert!(!is_public_key(&format!("05{}", "ab".repeat(32))));
        assert!(!is_public_key(SCRIPT_HASH));
    }
}

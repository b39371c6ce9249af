// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Conversion between stack items, contract arguments and plain JSON values.
//!
//! Decoding and encoding are pure and stateless; a [`ParseConfig`] carries
//! everything the wire format cannot say about a value.
//!
//! [`ParseConfig`]: neo_dappkit_types::ParseConfig

pub mod convert;
mod decode;
mod encode;

pub use convert::{
    base64_to_hex, base64_to_utf8, hex_to_base64, hexstring_to_str, int_to_hex, num_to_hexstring,
    num_to_var_int, reverse_hex, str_to_hexstring, utf8_to_base64,
};
pub use decode::{decode, decode_big_integer, decode_value};
pub use encode::{arg_to_stack_item, encode};

pub(crate) use encode::{
    encode_boolean, encode_hash160, encode_hash256, encode_integer, encode_public_key,
    encode_string, invalid_byte_array,
};

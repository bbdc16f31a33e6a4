//! Canonical hex encoding for genesis values.
//!
//! Quantities (balances, nonces, storage slots and values) are written as `0x` followed by
//! lowercase hex digits with no leading zeros, the single exception being `0x0`. Byte strings
//! (bytecode) keep every byte and are always an even number of lowercase digits.

use alloy_primitives::{hex, Address, Bytes, U256};
use serde::Deserialize;

use crate::errors::EncodingError;

/// Bit width of every quantity this crate encodes.
const QUANTITY_BITS: usize = 256;

/// A numeric value as it appears in loosely typed input documents.
///
/// JSON numbers are tried as unsigned, then signed, then floating point. Strings are hex when
/// prefixed with `0x`/`0X` and decimal otherwise.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl RawQuantity {
    /// Converts the raw value into a [`U256`].
    pub fn to_u256(&self) -> Result<U256, EncodingError> {
        match self {
            Self::Unsigned(v) => Ok(U256::from(*v)),
            Self::Signed(v) if *v < 0 => Err(EncodingError::Negative(v.to_string())),
            Self::Signed(v) => Ok(U256::from(v.unsigned_abs())),
            Self::Float(v) => Err(EncodingError::NotInteger(v.to_string())),
            Self::Text(s) => parse_quantity(s),
        }
    }

    /// Converts the raw value into a [`u64`], failing if it does not fit.
    pub fn to_u64(&self) -> Result<u64, EncodingError> {
        let value = self.to_u256()?;
        u64::try_from(value).map_err(|_| EncodingError::Overflow {
            value: to_hex(value),
            bits: 64,
        })
    }
}

impl From<u64> for RawQuantity {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Encodes a quantity as `0x` + lowercase hex without leading zeros.
///
/// `to_hex(U256::ZERO)` is `"0x0"`.
pub fn to_hex(value: U256) -> String {
    let digits = hex::encode(value.to_be_bytes::<32>());
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_owned()
    } else {
        format!("0x{trimmed}")
    }
}

/// Encodes a `u64` quantity, see [`to_hex`].
pub fn u64_to_hex(value: u64) -> String {
    format!("{value:#x}")
}

/// Returns whether `s` is already a canonical quantity string.
pub fn is_canonical_quantity(s: &str) -> bool {
    let Some(digits) = s.strip_prefix("0x") else {
        return false;
    };
    if digits.is_empty() || digits.len() > QUANTITY_BITS / 4 {
        return false;
    }
    let lower_hex = digits
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    lower_hex && (digits == "0" || !digits.starts_with('0'))
}

/// Parses a hex (`0x`-prefixed, any case) or decimal quantity string.
pub fn parse_quantity(s: &str) -> Result<U256, EncodingError> {
    if s.is_empty() {
        return Err(EncodingError::Empty);
    }

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EncodingError::InvalidHex(s.to_owned()));
        }
        return U256::from_str_radix(digits, 16).map_err(|_| overflow(s));
    }

    if s.starts_with('-') {
        return Err(EncodingError::Negative(s.to_owned()));
    }

    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::NotNumeric(s.to_owned()));
    }

    U256::from_str_radix(s, 10).map_err(|_| overflow(s))
}

/// Returns the canonical form of a quantity string.
///
/// Strings that are already canonical pass through untouched, anything else is parsed and
/// re-encoded.
pub fn canonicalize_quantity(s: &str) -> Result<String, EncodingError> {
    if is_canonical_quantity(s) {
        return Ok(s.to_owned());
    }
    parse_quantity(s).map(to_hex)
}

/// Parses bytecode hex, with or without `0x`.
///
/// An odd number of digits is left-padded with a single `0` nibble.
pub fn parse_bytecode(s: &str) -> Result<Bytes, EncodingError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EncodingError::InvalidHex(s.to_owned()));
    }

    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };

    decoded
        .map(Bytes::from)
        .map_err(|_| EncodingError::InvalidHex(s.to_owned()))
}

/// Encodes bytecode as even-length lowercase `0x` hex.
pub fn encode_bytecode(code: &Bytes) -> String {
    hex::encode_prefixed(code)
}

/// Encodes an address in its canonical lowercase `0x` form.
pub fn encode_address(address: &Address) -> String {
    hex::encode_prefixed(address)
}

fn overflow(s: &str) -> EncodingError {
    EncodingError::Overflow {
        value: s.to_owned(),
        bits: QUANTITY_BITS,
    }
}

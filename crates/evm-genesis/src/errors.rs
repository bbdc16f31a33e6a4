//! Error types for genesis assembly.

use std::{io, path::PathBuf};

use alloy_primitives::Address;
use thiserror::Error;

use crate::codec::encode_address;

/// Result type for genesis assembly operations.
pub type GenesisResult<T> = Result<T, GenesisError>;

/// Errors raised while turning a raw value into canonical hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("negative value {0} cannot be hex-encoded")]
    Negative(String),

    #[error("non-integer number {0} (quote large integers as strings)")]
    NotInteger(String),

    #[error("invalid hex string {0:?}")]
    InvalidHex(String),

    #[error("{0:?} is neither a hex nor a decimal integer")]
    NotNumeric(String),

    #[error("value {value} does not fit in {bits} bits")]
    Overflow { value: String, bits: usize },

    #[error("empty value")]
    Empty,
}

/// Fatal errors of the genesis pipeline.
///
/// Every variant aborts the run; none of them is downgraded to a warning.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed input in {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("contracts without a matching account entry: {}", format_addresses(.addresses))]
    ReferentialIntegrity { addresses: Vec<Address> },

    #[error("cannot encode {location}: {source}")]
    Encoding {
        location: String,
        #[source]
        source: EncodingError,
    },

    #[error("genesis template is missing required field `{0}`")]
    MissingTemplateField(&'static str),

    #[error("serializing output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GenesisError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn encoding(location: impl Into<String>, source: EncodingError) -> Self {
        Self::Encoding {
            location: location.into(),
            source,
        }
    }
}

fn format_addresses(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(encode_address)
        .collect::<Vec<_>>()
        .join(", ")
}

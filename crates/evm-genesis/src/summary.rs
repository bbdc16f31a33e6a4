//! Read-only statistics over assembled output.

use serde::Serialize;
use serde_json::Value;

use crate::types::{EncodedAlloc, GenesisDocument};

/// Account and contract counts of an allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AllocSummary {
    pub total_accounts: usize,
    /// Accounts whose `code` is present.
    pub contracts: usize,
}

/// Counts of a genesis document plus the header values operators usually check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenesisSummary {
    #[serde(flatten)]
    pub alloc: AllocSummary,
    pub chain_id: Option<u64>,
    pub gas_limit: Option<String>,
    pub timestamp: Option<String>,
}

/// Summarizes an encoded allocation. An absent allocation counts as empty.
pub fn summarize_alloc(alloc: Option<&EncodedAlloc>) -> AllocSummary {
    let Some(alloc) = alloc else {
        return AllocSummary::default();
    };

    AllocSummary {
        total_accounts: alloc.len(),
        contracts: alloc.values().filter(|a| a.code.is_some()).count(),
    }
}

/// Summarizes a genesis document.
pub fn summarize_genesis(doc: &GenesisDocument) -> GenesisSummary {
    GenesisSummary {
        alloc: summarize_alloc(Some(&doc.alloc)),
        chain_id: doc.config.get("chainId").and_then(Value::as_u64),
        gas_limit: header_string(doc, "gasLimit"),
        timestamp: header_string(doc, "timestamp"),
    }
}

fn header_string(doc: &GenesisDocument, key: &str) -> Option<String> {
    match doc.header.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

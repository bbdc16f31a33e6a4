//! Typed records flowing through the genesis pipeline.

use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{encode_bytecode, to_hex, u64_to_hex};

/// Storage slot to value mapping of a single account.
pub type StorageMap = BTreeMap<U256, U256>;

/// Address-keyed account records, the central artifact of the pipeline.
pub type AllocationMap = BTreeMap<Address, AccountRecord>;

/// Address-keyed deployed contract bytecode.
pub type ContractMap = BTreeMap<Address, Bytes>;

/// Address-keyed account ledger as produced by the genesis state dump.
pub type AccountLedger = BTreeMap<Address, LedgerAccount>;

/// Wire form of an allocation, keyed by canonical lowercase address.
pub type EncodedAlloc = BTreeMap<String, GenesisAccount>;

/// Balance, nonce and code of an account.
///
/// `code` is `None` for accounts without bytecode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub balance: U256,
    pub nonce: u64,
    pub code: Option<Bytes>,
}

/// An account with its storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountRecord {
    pub info: AccountInfo,
    pub storage: StorageMap,
}

impl AccountRecord {
    /// Returns whether the account carries bytecode.
    pub fn has_code(&self) -> bool {
        self.info.code.is_some()
    }

    /// Encodes the record into its canonical wire form.
    pub fn to_genesis_account(&self) -> GenesisAccount {
        GenesisAccount {
            balance: to_hex(self.info.balance),
            nonce: u64_to_hex(self.info.nonce),
            code: self.info.code.as_ref().map(encode_bytecode),
            storage: self
                .storage
                .iter()
                .map(|(slot, value)| (to_hex(*slot), to_hex(*value)))
                .collect(),
        }
    }
}

/// Account info as found in the ledger, before contract code is attached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerAccountInfo {
    pub balance: U256,
    pub nonce: u64,
    /// Hash of the code the ledger refers to; never propagated downstream.
    pub code_hash: Option<B256>,
}

/// A ledger entry: account info plus storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerAccount {
    pub info: LedgerAccountInfo,
    pub storage: StorageMap,
}

/// A single `alloc` entry of a genesis document.
///
/// Every field holds canonical hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub balance: String,
    pub nonce: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub storage: BTreeMap<String, String>,
}

/// Genesis template: every top-level field plus its parsed allocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenesisTemplate {
    /// Top-level fields other than `alloc`, passed through verbatim.
    pub fields: Map<String, Value>,
    /// The template's own allocation, empty if it has none.
    pub alloc: AllocationMap,
}

/// The assembled genesis document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenesisDocument {
    pub config: Value,
    pub alloc: EncodedAlloc,
    #[serde(flatten)]
    pub header: Map<String, Value>,
}

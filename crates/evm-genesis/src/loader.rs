//! Loading of external JSON documents into typed records.
//!
//! Inputs are loosely typed, so every loader validates the document shape with serde first
//! (shape errors are [`GenesisError::MalformedInput`]) and then converts values into typed
//! records (value errors are [`GenesisError::Encoding`]). Nothing untyped leaves this module
//! except the pass-through template fields.

use std::{collections::BTreeMap, fs, io::ErrorKind, path::Path, str::FromStr};

use alloy_primitives::{Address, B256, U256};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    codec::{encode_address, parse_bytecode, parse_quantity, RawQuantity},
    errors::{GenesisError, GenesisResult},
    types::{
        AccountInfo, AccountLedger, AccountRecord, AllocationMap, ContractMap, GenesisTemplate,
        LedgerAccount, LedgerAccountInfo, StorageMap,
    },
};

/// Ledger entry shape: `{info: {balance, nonce, code_hash?}, storage?}`.
#[derive(Debug, Deserialize)]
struct RawLedgerAccount {
    info: RawLedgerInfo,
    #[serde(default)]
    storage: Option<BTreeMap<String, RawQuantity>>,
}

#[derive(Debug, Deserialize)]
struct RawLedgerInfo {
    balance: RawQuantity,
    nonce: RawQuantity,
    #[serde(default, alias = "codeHash")]
    code_hash: Option<String>,
}

/// Flat allocation entry shape: `{balance?, nonce?, code?, storage?}`.
#[derive(Debug, Deserialize)]
struct RawAllocAccount {
    #[serde(default)]
    balance: Option<RawQuantity>,
    #[serde(default)]
    nonce: Option<RawQuantity>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    storage: Option<BTreeMap<String, RawQuantity>>,
}

/// Reads `path` and parses it as JSON into `T`.
///
/// A missing file is [`GenesisError::FileNotFound`]; content that is not valid JSON for `T` is
/// [`GenesisError::MalformedInput`]. No fallback parse is attempted.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> GenesisResult<T> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GenesisError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => GenesisError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_str(&content).map_err(|e| GenesisError::malformed(path, e.to_string()))
}

/// Loads the account ledger (address -> `{info, storage}`).
pub fn load_account_ledger(path: &Path) -> GenesisResult<AccountLedger> {
    let raw: BTreeMap<String, RawLedgerAccount> = load_json(path)?;
    let mut ledger = AccountLedger::new();

    for (key, entry) in raw {
        let address = parse_address_key(path, &key)?;
        let loc = |field: &str| field_location(path, &address, field);

        let info = LedgerAccountInfo {
            balance: entry
                .info
                .balance
                .to_u256()
                .map_err(|e| GenesisError::encoding(loc("info.balance"), e))?,
            nonce: entry
                .info
                .nonce
                .to_u64()
                .map_err(|e| GenesisError::encoding(loc("info.nonce"), e))?,
            code_hash: entry
                .info
                .code_hash
                .as_deref()
                .map(B256::from_str)
                .transpose()
                .map_err(|e| {
                    GenesisError::malformed(path, format!("{}: {e}", loc("code_hash")))
                })?,
        };
        let storage =
            convert_storage(path, entry.storage.unwrap_or_default(), &loc("storage"))?;

        insert_unique(path, &mut ledger, address, LedgerAccount { info, storage })?;
    }

    debug!(path = %path.display(), accounts = ledger.len(), "loaded account ledger");
    Ok(ledger)
}

/// Loads the contract bytecode map (address -> bytecode hex).
pub fn load_contract_map(path: &Path) -> GenesisResult<ContractMap> {
    let raw: BTreeMap<String, String> = load_json(path)?;
    let mut contracts = ContractMap::new();

    for (key, code) in raw {
        let address = parse_address_key(path, &key)?;
        let code = parse_bytecode(&code)
            .map_err(|e| GenesisError::encoding(field_location(path, &address, "bytecode"), e))?;
        insert_unique(path, &mut contracts, address, code)?;
    }

    debug!(path = %path.display(), contracts = contracts.len(), "loaded contract map");
    Ok(contracts)
}

/// Loads a flat allocation file (address -> `{balance, nonce, code, storage}`).
pub fn load_alloc_file(path: &Path) -> GenesisResult<AllocationMap> {
    let raw: BTreeMap<String, RawAllocAccount> = load_json(path)?;
    let alloc = convert_alloc(path, raw)?;
    debug!(path = %path.display(), accounts = alloc.len(), "loaded allocation file");
    Ok(alloc)
}

/// Loads a genesis template.
///
/// The top level must be an object. Its `alloc` field, if present and not `null`, is parsed like
/// an allocation file; every other field is kept verbatim. Only `balance`, `nonce`, `code` and
/// `storage` of each `alloc` entry are kept, any other per-account field is dropped.
pub fn load_template(path: &Path) -> GenesisResult<GenesisTemplate> {
    let mut fields = read_template_object(path)?;

    let alloc = match fields.remove("alloc") {
        None | Some(Value::Null) => AllocationMap::new(),
        Some(raw) => {
            let raw: BTreeMap<String, RawAllocAccount> = serde_json::from_value(raw)
                .map_err(|e| GenesisError::malformed(path, format!("alloc: {e}")))?;
            convert_alloc(path, raw)?
        }
    };

    debug!(
        path = %path.display(),
        fields = fields.len(),
        alloc = alloc.len(),
        "loaded genesis template"
    );
    Ok(GenesisTemplate { fields, alloc })
}

/// Loads a genesis template without reading its `alloc`.
///
/// The `alloc` field is discarded unparsed, so its content is never validated. Used when the
/// allocation is built from computed records alone.
pub fn load_template_fields(path: &Path) -> GenesisResult<GenesisTemplate> {
    let mut fields = read_template_object(path)?;

    let ignored = match fields.remove("alloc") {
        Some(Value::Object(entries)) => entries.len(),
        Some(Value::Null) | None => 0,
        Some(_) => 1,
    };
    if ignored > 0 {
        warn!(
            path = %path.display(),
            ignored,
            "template alloc entries ignored by full-genesis assembly"
        );
    }

    debug!(path = %path.display(), fields = fields.len(), "loaded genesis template fields");
    Ok(GenesisTemplate {
        fields,
        alloc: AllocationMap::new(),
    })
}

fn read_template_object(path: &Path) -> GenesisResult<Map<String, Value>> {
    match load_json(path)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(GenesisError::malformed(
            path,
            "genesis template must be a JSON object",
        )),
    }
}

/// Builds a template from an in-memory JSON object, as [`load_template`] does for files.
pub(crate) fn template_from_fields(mut fields: Map<String, Value>) -> GenesisTemplate {
    fields.remove("alloc");
    GenesisTemplate {
        fields,
        alloc: AllocationMap::new(),
    }
}

fn convert_alloc(
    path: &Path,
    raw: BTreeMap<String, RawAllocAccount>,
) -> GenesisResult<AllocationMap> {
    let mut alloc = AllocationMap::new();

    for (key, entry) in raw {
        let address = parse_address_key(path, &key)?;
        let loc = |field: &str| field_location(path, &address, field);

        let balance = match entry.balance {
            Some(raw) => raw
                .to_u256()
                .map_err(|e| GenesisError::encoding(loc("balance"), e))?,
            None => U256::ZERO,
        };
        let nonce = match entry.nonce {
            Some(raw) => raw
                .to_u64()
                .map_err(|e| GenesisError::encoding(loc("nonce"), e))?,
            None => 0,
        };
        let code = entry
            .code
            .as_deref()
            .map(parse_bytecode)
            .transpose()
            .map_err(|e| GenesisError::encoding(loc("code"), e))?;
        let storage =
            convert_storage(path, entry.storage.unwrap_or_default(), &loc("storage"))?;

        let record = AccountRecord {
            info: AccountInfo {
                balance,
                nonce,
                code,
            },
            storage,
        };
        insert_unique(path, &mut alloc, address, record)?;
    }

    Ok(alloc)
}

fn convert_storage(
    path: &Path,
    raw: BTreeMap<String, RawQuantity>,
    loc: &str,
) -> GenesisResult<StorageMap> {
    let mut storage = StorageMap::new();
    for (slot, value) in raw {
        let key = parse_quantity(&slot)
            .map_err(|e| GenesisError::encoding(format!("{loc} slot {slot:?}"), e))?;
        let value = value
            .to_u256()
            .map_err(|e| GenesisError::encoding(format!("{loc}[{slot}]"), e))?;
        // "0x01" and "1" name the same slot.
        if storage.insert(key, value).is_some() {
            return Err(GenesisError::malformed(
                path,
                format!("{loc}: duplicate storage slot {slot:?}"),
            ));
        }
    }
    Ok(storage)
}

fn field_location(path: &Path, address: &Address, field: &str) -> String {
    format!("{}: {} {field}", path.display(), encode_address(address))
}

fn parse_address_key(path: &Path, key: &str) -> GenesisResult<Address> {
    Address::from_str(key)
        .map_err(|e| GenesisError::malformed(path, format!("invalid address key {key:?}: {e}")))
}

fn insert_unique<V>(
    path: &Path,
    map: &mut BTreeMap<Address, V>,
    address: Address,
    value: V,
) -> GenesisResult<()> {
    if map.insert(address, value).is_some() {
        return Err(GenesisError::malformed(
            path,
            format!("duplicate address {}", encode_address(&address)),
        ));
    }
    Ok(())
}

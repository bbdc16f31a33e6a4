//! Joins the account ledger with deployed contract bytecode.

use alloy_primitives::Address;
use tracing::debug;

use crate::{
    errors::{GenesisError, GenesisResult},
    types::{AccountInfo, AccountLedger, AccountRecord, AllocationMap, ContractMap},
};

/// Merges `accounts` with `contracts` into an [`AllocationMap`].
///
/// Every contract address must have a ledger entry; otherwise the merge fails with
/// [`GenesisError::ReferentialIntegrity`] naming all orphaned addresses in ascending order.
/// Ledger code hashes are dropped. The result has exactly the address set of `accounts`, with
/// `code` taken from `contracts` or left absent.
pub fn merge_allocation(
    accounts: AccountLedger,
    contracts: &ContractMap,
) -> GenesisResult<AllocationMap> {
    // BTreeMap keys iterate in order, so the list is already sorted.
    let orphans: Vec<Address> = contracts
        .keys()
        .filter(|addr| !accounts.contains_key(*addr))
        .copied()
        .collect();
    if !orphans.is_empty() {
        return Err(GenesisError::ReferentialIntegrity { addresses: orphans });
    }

    let mut stripped_hashes = 0usize;
    let alloc: AllocationMap = accounts
        .into_iter()
        .map(|(address, account)| {
            if account.info.code_hash.is_some() {
                stripped_hashes += 1;
            }
            let record = AccountRecord {
                info: AccountInfo {
                    balance: account.info.balance,
                    nonce: account.info.nonce,
                    code: contracts.get(&address).cloned(),
                },
                storage: account.storage,
            };
            (address, record)
        })
        .collect();

    debug!(
        accounts = alloc.len(),
        contracts = contracts.len(),
        stripped_hashes,
        "merged account ledger with contract bytecode"
    );
    Ok(alloc)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, B256, U256};

    use super::*;
    use crate::types::{LedgerAccount, LedgerAccountInfo, StorageMap};

    fn ledger_entry(balance: u64, nonce: u64) -> LedgerAccount {
        LedgerAccount {
            info: LedgerAccountInfo {
                balance: U256::from(balance),
                nonce,
                code_hash: Some(B256::repeat_byte(0x5a)),
            },
            storage: StorageMap::new(),
        }
    }

    #[test]
    fn test_accounts_without_contract_keep_values_and_get_no_code() {
        let a = Address::repeat_byte(0xaa);
        let accounts = AccountLedger::from([(a, ledger_entry(500, 3))]);

        let alloc = merge_allocation(accounts, &ContractMap::new()).unwrap();
        let record = &alloc[&a];
        assert_eq!(record.info.balance, U256::from(500));
        assert_eq!(record.info.nonce, 3);
        assert!(record.info.code.is_none());
    }

    #[test]
    fn test_contract_code_is_attached() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let accounts = AccountLedger::from([(a, ledger_entry(0, 0)), (b, ledger_entry(7, 1))]);
        let contracts = ContractMap::from([(a, Bytes::from_static(&[0x60, 0x01]))]);

        let alloc = merge_allocation(accounts, &contracts).unwrap();
        assert_eq!(alloc.len(), 2);
        assert_eq!(alloc[&a].info.code, Some(Bytes::from_static(&[0x60, 0x01])));
        assert!(alloc[&b].info.code.is_none());
    }

    #[test]
    fn test_storage_is_preserved() {
        let a = Address::repeat_byte(0xaa);
        let mut entry = ledger_entry(0, 0);
        entry.storage.insert(U256::from(1), U256::from(2));
        let accounts = AccountLedger::from([(a, entry)]);

        let alloc = merge_allocation(accounts, &ContractMap::new()).unwrap();
        assert_eq!(alloc[&a].storage.get(&U256::from(1)), Some(&U256::from(2)));
    }

    #[test]
    fn test_orphan_contracts_fail_with_every_address() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        let c = Address::repeat_byte(0xcc);
        let accounts = AccountLedger::from([(a, ledger_entry(0, 0))]);
        let contracts = ContractMap::from([
            (c, Bytes::from_static(&[0x00])),
            (a, Bytes::from_static(&[0x00])),
            (b, Bytes::from_static(&[0x00])),
        ]);

        let err = merge_allocation(accounts, &contracts).unwrap_err();
        let GenesisError::ReferentialIntegrity { addresses } = err else {
            panic!("expected referential integrity error, got {err:?}");
        };
        assert_eq!(addresses, vec![b, c]);
    }

    #[test]
    fn test_output_never_carries_code_hash() {
        let a = Address::repeat_byte(0xaa);
        let accounts = AccountLedger::from([(a, ledger_entry(0, 0))]);
        let alloc = merge_allocation(accounts, &ContractMap::new()).unwrap();

        let json = serde_json::to_string(&alloc[&a].to_genesis_account()).unwrap();
        assert!(!json.contains("code_hash"));
        assert!(!json.contains("codeHash"));
    }
}

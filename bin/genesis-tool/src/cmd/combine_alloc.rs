//! `combine-alloc` subcommand: attaches contract bytecode to the account ledger.

use std::{io::Write, path::PathBuf};

use anyhow::Context;
use strata_evm_genesis::{
    combine_account_alloc, encode_alloc, summarize_alloc, write_json_atomic,
};
use tracing::info;

use crate::{
    args::{SubcCombineAlloc, DEFAULT_ALLOC_OUTPUT},
    output::{output_to, AllocReport},
};

/// Executes the `combine-alloc` subcommand.
///
/// Loads both inputs, merges them and writes the encoded allocation. Nothing is written unless
/// every stage succeeds.
pub(super) fn exec(cmd: SubcCombineAlloc, out: &mut impl Write) -> anyhow::Result<()> {
    let out_path = cmd
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ALLOC_OUTPUT));

    let alloc = combine_account_alloc(&cmd.accounts, &cmd.contracts)
        .context("failed to combine account allocation")?;
    let encoded = encode_alloc(&alloc);
    write_json_atomic(&out_path, &encoded)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote account allocation");

    let report = AllocReport::new(&out_path, summarize_alloc(Some(&encoded)));
    output_to(&report, cmd.format, out)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use strata_evm_genesis::GenesisError;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        cmd::test_utils::{read_json, write_json, ADDR_AA, ADDR_BB},
        output::OutputFormat,
    };

    fn ledger() -> serde_json::Value {
        json!({
            ADDR_AA: {
                "info": {
                    "balance": "0x0",
                    "nonce": 0,
                    "code_hash": "0x5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a"
                }
            },
            ADDR_BB: { "info": { "balance": 1000, "nonce": 2 } }
        })
    }

    #[test]
    fn test_combine_alloc_writes_merged_allocation() {
        let dir = TempDir::new().unwrap();
        let accounts = write_json(&dir, "genesis_accounts.json", &ledger());
        let contracts = write_json(&dir, "genesis_contracts.json", &json!({ ADDR_AA: "0x6001" }));
        let out_path = dir.path().join("account_alloc.json");

        let cmd = SubcCombineAlloc {
            contracts,
            accounts,
            output: Some(out_path.clone()),
            format: OutputFormat::Porcelain,
        };
        let mut stdout = Vec::new();
        exec(cmd, &mut stdout).unwrap();

        assert_eq!(
            read_json(&out_path),
            json!({
                ADDR_AA: { "balance": "0x0", "nonce": "0x0", "code": "0x6001" },
                ADDR_BB: { "balance": "0x3e8", "nonce": "0x2" }
            })
        );
        let summary = String::from_utf8(stdout).unwrap();
        assert!(summary.contains("total_accounts: 2"));
        assert!(summary.contains("contracts: 1"));
    }

    #[test]
    fn test_orphan_contract_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let accounts = write_json(&dir, "genesis_accounts.json", &ledger());
        let contracts = write_json(
            &dir,
            "genesis_contracts.json",
            &json!({ "0x00000000000000000000000000000000000000cc": "0x6001" }),
        );
        let out_path = dir.path().join("account_alloc.json");

        let cmd = SubcCombineAlloc {
            contracts,
            accounts,
            output: Some(out_path.clone()),
            format: OutputFormat::Porcelain,
        };
        let mut stdout = Vec::new();
        let err = exec(cmd, &mut stdout).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenesisError>(),
            Some(GenesisError::ReferentialIntegrity { .. })
        ));
        assert!(!out_path.exists());
        assert!(stdout.is_empty());
    }
}

//! `build-genesis` subcommand: the full ledger-to-genesis pipeline.

use std::{io::Write, path::PathBuf};

use anyhow::Context;
use strata_evm_genesis::{generate_genesis, summarize_genesis, write_json_atomic};
use tracing::info;

use crate::{
    args::{
        SubcBuildGenesis, DEFAULT_ACCOUNTS_PATH, DEFAULT_CONTRACTS_PATH, DEFAULT_GENESIS_OUTPUT,
    },
    output::{output_to, GenesisReport},
};

/// Executes the `build-genesis` subcommand.
///
/// Uses the built-in dev template unless `--template` is given.
pub(super) fn exec(cmd: SubcBuildGenesis, out: &mut impl Write) -> anyhow::Result<()> {
    let accounts = cmd
        .accounts
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ACCOUNTS_PATH));
    let contracts = cmd
        .contracts
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTRACTS_PATH));
    let out_path = cmd
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GENESIS_OUTPUT));

    let doc = generate_genesis(&accounts, &contracts, cmd.template.as_deref(), cmd.policy)
        .context("failed to generate genesis")?;
    write_json_atomic(&out_path, &doc)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), policy = %cmd.policy, "wrote genesis document");

    let report = GenesisReport::new(&out_path, cmd.policy, summarize_genesis(&doc));
    output_to(&report, cmd.format, out)
}

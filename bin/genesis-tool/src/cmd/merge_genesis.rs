//! `merge-genesis` subcommand: folds an allocation file into a genesis template.

use std::{io::Write, path::PathBuf};

use anyhow::Context;
use strata_evm_genesis::{merge_into_template, summarize_genesis, write_json_atomic};
use tracing::info;

use crate::{
    args::{SubcMergeGenesis, DEFAULT_GENESIS_OUTPUT},
    output::{output_to, GenesisReport},
};

/// Executes the `merge-genesis` subcommand.
pub(super) fn exec(cmd: SubcMergeGenesis, out: &mut impl Write) -> anyhow::Result<()> {
    let out_path = cmd
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GENESIS_OUTPUT));

    let doc = merge_into_template(&cmd.alloc, &cmd.template, cmd.policy)
        .context("failed to merge allocation into template")?;
    write_json_atomic(&out_path, &doc)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), policy = %cmd.policy, "wrote genesis document");

    let report = GenesisReport::new(&out_path, cmd.policy, summarize_genesis(&doc));
    output_to(&report, cmd.format, out)
}

//! Subcommand implementations.

mod build_genesis;
mod combine_alloc;
mod merge_genesis;

use std::io::Write;

use crate::args::Subcommand;

/// Executes a subcommand, writing its summary to `out`.
pub(crate) fn exec_subc(cmd: Subcommand, out: &mut impl Write) -> anyhow::Result<()> {
    match cmd {
        Subcommand::CombineAlloc(subc) => combine_alloc::exec(subc, out),
        Subcommand::MergeGenesis(subc) => merge_genesis::exec(subc, out),
        Subcommand::BuildGenesis(subc) => build_genesis::exec(subc, out),
    }
}

//! Command line arguments for the `strata-genesis-tool` binary.

use std::{env, path::PathBuf};

use argh::FromArgs;
use strata_evm_genesis::MergePolicy;

use crate::output::OutputFormat;

/// Log directory environment variable.
pub(crate) const LOG_DIR_ENVVAR: &str = "STRATA_GENESIS_LOG_DIR";

/// Default output of `combine-alloc`.
pub(crate) const DEFAULT_ALLOC_OUTPUT: &str = "account_alloc.json";

/// Default output of `merge-genesis` and `build-genesis`.
pub(crate) const DEFAULT_GENESIS_OUTPUT: &str = "genesis.json";

/// Default account ledger read by `build-genesis`.
pub(crate) const DEFAULT_ACCOUNTS_PATH: &str = "output/genesis_accounts.json";

/// Default contract map read by `build-genesis`.
pub(crate) const DEFAULT_CONTRACTS_PATH: &str = "output/genesis_contracts.json";

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(
        option,
        description = "directory for log files (default: $STRATA_GENESIS_LOG_DIR, else no file logging)"
    )]
    pub(crate) log_dir: Option<PathBuf>,

    #[argh(switch, description = "emit logs as JSON")]
    pub(crate) json_logs: bool,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    CombineAlloc(SubcCombineAlloc),
    MergeGenesis(SubcMergeGenesis),
    BuildGenesis(SubcBuildGenesis),
}

/// Merge an account ledger with contract bytecode into an allocation file.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "combine-alloc",
    description = "merges contract bytecode into the account ledger"
)]
pub(crate) struct SubcCombineAlloc {
    #[argh(positional, description = "contract bytecode map .json")]
    pub(crate) contracts: PathBuf,

    #[argh(positional, description = "account ledger .json")]
    pub(crate) accounts: PathBuf,

    #[argh(
        option,
        description = "output file path .json (default account_alloc.json)",
        short = 'o'
    )]
    pub(crate) output: Option<PathBuf>,

    #[argh(
        option,
        description = "summary format: porcelain (default) or json",
        default = "OutputFormat::Porcelain"
    )]
    pub(crate) format: OutputFormat,
}

/// Merge an allocation file into a genesis template.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "merge-genesis",
    description = "merges an allocation file into a genesis template"
)]
pub(crate) struct SubcMergeGenesis {
    #[argh(positional, description = "allocation file .json")]
    pub(crate) alloc: PathBuf,

    #[argh(positional, description = "genesis template .json")]
    pub(crate) template: PathBuf,

    #[argh(
        option,
        description = "output file path .json (default genesis.json)",
        short = 'o'
    )]
    pub(crate) output: Option<PathBuf>,

    #[argh(
        option,
        description = "alloc-authoritative (default), template-preferred or full-genesis",
        default = "MergePolicy::AllocAuthoritative"
    )]
    pub(crate) policy: MergePolicy,

    #[argh(
        option,
        description = "summary format: porcelain (default) or json",
        default = "OutputFormat::Porcelain"
    )]
    pub(crate) format: OutputFormat,
}

/// Run the whole pipeline from ledger and contracts to a genesis document.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "build-genesis",
    description = "builds a genesis document from the account ledger and contracts"
)]
pub(crate) struct SubcBuildGenesis {
    #[argh(
        option,
        description = "account ledger .json (default output/genesis_accounts.json)"
    )]
    pub(crate) accounts: Option<PathBuf>,

    #[argh(
        option,
        description = "contract bytecode map .json (default output/genesis_contracts.json)"
    )]
    pub(crate) contracts: Option<PathBuf>,

    #[argh(
        option,
        description = "genesis template .json (default built-in dev template)",
        short = 't'
    )]
    pub(crate) template: Option<PathBuf>,

    #[argh(
        option,
        description = "output file path .json (default genesis.json)",
        short = 'o'
    )]
    pub(crate) output: Option<PathBuf>,

    #[argh(
        option,
        description = "full-genesis (default), alloc-authoritative or template-preferred",
        default = "MergePolicy::FullGenesis"
    )]
    pub(crate) policy: MergePolicy,

    #[argh(
        option,
        description = "summary format: porcelain (default) or json",
        default = "OutputFormat::Porcelain"
    )]
    pub(crate) format: OutputFormat,
}

#[derive(Debug)]
pub(crate) struct CmdContext {
    /// Directory for log files, if file logging is enabled.
    pub(crate) log_dir: Option<PathBuf>,

    /// Emit logs as JSON.
    pub(crate) json_logs: bool,
}

/// Resolves the command context and subcommand from the parsed command line arguments.
pub(crate) fn resolve_context_and_subcommand(
    args: Args,
) -> anyhow::Result<(CmdContext, Subcommand)> {
    let ctx = CmdContext {
        log_dir: resolve_log_dir(args.log_dir),
        json_logs: args.json_logs,
    };

    Ok((ctx, args.subc))
}

/// Resolves the log directory.
///
/// Priority:
///
/// 1. Command-line argument (if provided)
/// 2. `STRATA_GENESIS_LOG_DIR` environment variable (if set and non-empty)
/// 3. No file logging
fn resolve_log_dir(arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| {
        env::var_os(LOG_DIR_ENVVAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

//! Command line tool for assembling EVM genesis documents.
//!
//! Merges the account ledger and contract bytecode produced by the genesis state dump into an
//! allocation, and folds that allocation into a genesis template.

mod args;
mod cmd;
mod output;

use std::{io, process};

use args::{resolve_context_and_subcommand, CmdContext};
use cmd::exec_subc;
use strata_common::logging::{init_logging_from_config, LoggingInitConfig};
use tracing::error;

/// Service name used in logs and as the log file prefix.
const SERVICE_NAME: &str = "strata-genesis-tool";

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        let (ctx, subc) = resolve_context_and_subcommand(args)?;
        init_logging(&ctx)?;
        exec_subc(subc, &mut io::stdout().lock())?;
        Ok(())
    };
    if let Err(e) = inner() {
        error!(%e, "genesis tool failed");
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}

fn init_logging(ctx: &CmdContext) -> anyhow::Result<()> {
    init_logging_from_config(LoggingInitConfig {
        service_base_name: SERVICE_NAME,
        service_label: None,
        log_dir: ctx.log_dir.as_ref(),
        log_file_prefix: None,
        json_format: Some(ctx.json_logs),
        default_log_prefix: SERVICE_NAME,
    })?;
    Ok(())
}

//! Operator-facing command output.

use std::{
    fmt::Display,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Serialize;
use strata_evm_genesis::{AllocSummary, GenesisSummary, MergePolicy};

/// Output format for command summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// `key: value` lines, stable for scripts.
    #[default]
    Porcelain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "porcelain" => Ok(Self::Porcelain),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {s}")),
        }
    }
}

/// Trait for objects that can be formatted for porcelain output
pub(crate) trait Formattable {
    /// Format for machine-readable output (parseable, stable, human-readable)
    fn format_porcelain(&self) -> String;
}

/// Formats a single porcelain field.
pub(crate) fn porcelain_field(key: &str, value: impl Display) -> String {
    format!("{key}: {value}")
}

/// Writes `data` to `writer` in the requested format.
pub(crate) fn output_to<T, W>(data: &T, format: OutputFormat, writer: &mut W) -> anyhow::Result<()>
where
    T: Formattable + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Porcelain => writeln!(writer, "{}", data.format_porcelain())?,
        OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string_pretty(data)?)?,
    }
    Ok(())
}

/// Result of `combine-alloc`.
#[derive(Debug, Serialize)]
pub(crate) struct AllocReport {
    pub(crate) output: PathBuf,
    #[serde(flatten)]
    pub(crate) summary: AllocSummary,
}

impl AllocReport {
    pub(crate) fn new(output: &Path, summary: AllocSummary) -> Self {
        Self {
            output: output.to_path_buf(),
            summary,
        }
    }
}

impl Formattable for AllocReport {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("output", self.output.display()),
            porcelain_field("total_accounts", self.summary.total_accounts),
            porcelain_field("contracts", self.summary.contracts),
        ]
        .join("\n")
    }
}

/// Result of `merge-genesis` and `build-genesis`.
#[derive(Debug, Serialize)]
pub(crate) struct GenesisReport {
    pub(crate) output: PathBuf,
    pub(crate) policy: String,
    #[serde(flatten)]
    pub(crate) summary: GenesisSummary,
}

impl GenesisReport {
    pub(crate) fn new(output: &Path, policy: MergePolicy, summary: GenesisSummary) -> Self {
        Self {
            output: output.to_path_buf(),
            policy: policy.to_string(),
            summary,
        }
    }
}

impl Formattable for GenesisReport {
    fn format_porcelain(&self) -> String {
        let mut output = vec![
            porcelain_field("output", self.output.display()),
            porcelain_field("policy", &self.policy),
            porcelain_field("total_accounts", self.summary.alloc.total_accounts),
            porcelain_field("contracts", self.summary.alloc.contracts),
        ];

        // Header values are only reported when the template carries them.
        if let Some(chain_id) = self.summary.chain_id {
            output.push(porcelain_field("chain_id", chain_id));
        }
        if let Some(gas_limit) = &self.summary.gas_limit {
            output.push(porcelain_field("gas_limit", gas_limit));
        }
        if let Some(timestamp) = &self.summary.timestamp {
            output.push(porcelain_field("timestamp", timestamp));
        }

        output.join("\n")
    }
}

//! End-to-end pipeline runs: load, merge, assemble.
//!
//! These functions never write output; callers persist the result with
//! [`write_json_atomic`](crate::writer::write_json_atomic) only once a run has succeeded.

use std::path::Path;

use tracing::info;

use crate::{
    assemble::{assemble, MergePolicy},
    errors::GenesisResult,
    loader::{
        load_account_ledger, load_alloc_file, load_contract_map, load_template,
        load_template_fields,
    },
    merge::merge_allocation,
    template::default_genesis_template,
    types::{AllocationMap, GenesisDocument, GenesisTemplate},
};

/// Loads the account ledger and contract map and merges them.
pub fn combine_account_alloc(
    accounts_path: &Path,
    contracts_path: &Path,
) -> GenesisResult<AllocationMap> {
    let contracts = load_contract_map(contracts_path)?;
    let accounts = load_account_ledger(accounts_path)?;
    let alloc = merge_allocation(accounts, &contracts)?;

    info!(
        accounts = alloc.len(),
        contracts = contracts.len(),
        "combined account allocation"
    );
    Ok(alloc)
}

/// Merges a flat allocation file into a genesis template file.
pub fn merge_into_template(
    alloc_path: &Path,
    template_path: &Path,
    policy: MergePolicy,
) -> GenesisResult<GenesisDocument> {
    let alloc = load_alloc_file(alloc_path)?;
    let template = load_template_for(template_path, policy)?;
    let doc = assemble(template, &alloc, policy)?;

    info!(%policy, accounts = doc.alloc.len(), "merged allocation into template");
    Ok(doc)
}

/// Runs the full pipeline from ledger and contract map to a genesis document.
///
/// The built-in template is used when `template_path` is `None`.
pub fn generate_genesis(
    accounts_path: &Path,
    contracts_path: &Path,
    template_path: Option<&Path>,
    policy: MergePolicy,
) -> GenesisResult<GenesisDocument> {
    let alloc = combine_account_alloc(accounts_path, contracts_path)?;
    let template = match template_path {
        Some(path) => load_template_for(path, policy)?,
        None => default_genesis_template(),
    };
    let doc = assemble(template, &alloc, policy)?;

    info!(%policy, accounts = doc.alloc.len(), "generated genesis document");
    Ok(doc)
}

/// Loads a template, skipping its `alloc` when `policy` never consults it.
fn load_template_for(path: &Path, policy: MergePolicy) -> GenesisResult<GenesisTemplate> {
    match policy {
        MergePolicy::FullGenesis => load_template_fields(path),
        MergePolicy::AllocAuthoritative | MergePolicy::TemplatePreferred => load_template(path),
    }
}

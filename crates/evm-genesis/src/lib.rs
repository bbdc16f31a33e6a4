//! Builds EVM genesis documents from an account ledger and deployed contract bytecode.
//!
//! The pipeline runs in four stages, each consuming only the output of the previous one:
//!
//! 1. [`loader`] reads JSON inputs into typed records.
//! 2. [`merge`] joins accounts with contract code, enforcing that every contract has an account.
//! 3. [`assemble`](mod@assemble) combines the merged allocation with a genesis template under a
//!    [`MergePolicy`].
//! 4. [`summary`] computes operator-facing counts.
//!
//! [`pipeline`] strings the stages together and [`writer`] persists results atomically.

pub mod assemble;
pub mod codec;
pub mod errors;
pub mod loader;
pub mod merge;
pub mod pipeline;
pub mod summary;
pub mod template;
pub mod types;
pub mod writer;

pub use assemble::{
    assemble, assemble_alloc_authoritative, assemble_full_genesis, assemble_template_preferred,
    encode_alloc, MergePolicy,
};
pub use errors::{EncodingError, GenesisError, GenesisResult};
pub use merge::merge_allocation;
pub use pipeline::{combine_account_alloc, generate_genesis, merge_into_template};
pub use summary::{summarize_alloc, summarize_genesis, AllocSummary, GenesisSummary};
pub use template::default_genesis_template;
pub use types::{AllocationMap, EncodedAlloc, GenesisDocument, GenesisTemplate};
pub use writer::write_json_atomic;

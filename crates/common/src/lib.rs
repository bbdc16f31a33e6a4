//! Functionality shared by the strata tooling binaries.

pub mod logging;

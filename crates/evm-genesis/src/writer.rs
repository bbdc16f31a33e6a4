//! Atomic JSON output.

#[cfg(unix)]
use std::{fs, os::unix::fs::PermissionsExt};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{GenesisError, GenesisResult};

/// File mode of newly created outputs on unix.
#[cfg(unix)]
const DEFAULT_OUTPUT_MODE: u32 = 0o644;

/// Serializes `value` as pretty JSON and atomically replaces `path` with it.
///
/// The document is rendered in memory and written to a temporary file next to `path`, which is
/// then renamed over the destination. If anything fails, `path` is left as it was. On unix a
/// replaced file keeps its mode and a new file gets `0644`.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> GenesisResult<()> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');

    let dir = parent_dir(path);
    let io_err = |source| GenesisError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(rendered.as_bytes()).map_err(io_err)?;
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(output_mode(path)))
        .map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    debug!(path = %path.display(), bytes = rendered.len(), "wrote json output");
    Ok(())
}

/// Mode of the existing destination, or the default for new files.
#[cfg(unix)]
fn output_mode(path: &Path) -> u32 {
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o7777)
        .unwrap_or(DEFAULT_OUTPUT_MODE)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

//! Offset file persistence
//!
//! The offset file holds a single decimal `u64`. Reads tolerate a trailing
//! newline; writes never emit one and replace the file via rename so a
//! concurrent reader never observes a partial value.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::models::{RelayError, RelayResult};

/// Read the persisted offset from `path`
pub fn read_offset<P: AsRef<Path>>(path: P) -> RelayResult<u64> {
    let path = path.as_ref();
    debug!("reading offset from {}", path.display());

    let data = fs::read_to_string(path).map_err(|e| RelayError::io(path, e))?;
    parse_offset(path, &data)
}

/// Persist `offset` to `path`, replacing any previous value
pub fn write_offset<P: AsRef<Path>>(path: P, offset: u64) -> RelayResult<()> {
    let path = path.as_ref();
    debug!("writing offset {} to {}", offset, path.display());

    write_atomic(path, offset.to_string().as_bytes(), |_| {})
}

fn parse_offset(path: &Path, data: &str) -> RelayResult<u64> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Err(RelayError::invalid_offset(path, "file is empty"));
    }

    trimmed
        .parse::<u64>()
        .map_err(|e| RelayError::invalid_offset(path, format!("{:?}: {}", trimmed, e)))
}

/// Write `contents` to a uniquely named temp file next to `path`, sync it,
/// then rename it into place. `before_commit` receives the staged file's path
/// after it is durable and before the rename.
pub(crate) fn write_atomic<F>(path: &Path, contents: &[u8], before_commit: F) -> RelayResult<()>
where
    F: FnOnce(&Path),
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the temp file on any error removes it.
    let result = (|| {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        set_file_mode(tmp.path())?;

        before_commit(tmp.path());

        tmp.persist(path)?;
        Ok::<(), std::io::Error>(())
    })();

    result.map_err(|e| RelayError::io(path, e))
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

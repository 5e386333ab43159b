//! Crash-safe file replacement.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// What to do when the destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overwrite {
    Replace,
    /// Fail with `AlreadyExists`; used for key material.
    Never,
}

/// Write `bytes` to a temp file beside `path`, fsync it, then rename it over
/// `path`. Readers see either the old file or the new one, never a torn write.
pub(crate) fn write_atomic(
    path: &Path,
    bytes: &[u8],
    overwrite: Overwrite,
    owner_only: bool,
) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    if owner_only {
        restrict_permissions(tmp.as_file())?;
    } else {
        share_permissions(tmp.as_file(), path)?;
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    match overwrite {
        Overwrite::Replace => tmp.persist(path).map_err(|e| e.error)?,
        Overwrite::Never => tmp.persist_noclobber(path).map_err(|e| e.error)?,
    };
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))
}

/// Temp files start out 0600. Keep the mode of the file being replaced, or
/// 0644 for a new one.
#[cfg(unix)]
fn share_permissions(file: &std::fs::File, path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = match std::fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => std::fs::Permissions::from_mode(0o644),
        Err(e) => return Err(e),
    };
    file.set_permissions(permissions)
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn share_permissions(_file: &std::fs::File, _path: &Path) -> io::Result<()> {
    Ok(())
}

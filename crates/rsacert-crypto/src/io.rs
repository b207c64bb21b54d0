//! File and stream helpers for key files and payloads.
//!
//! Every handle is scoped to the call that opens it, so files are closed on
//! both the success and the error path.

use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use rsacert_core::CertResult;

/// Read an entire file into memory.
pub fn read_all(path: &Path) -> CertResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Drain a reader into memory.
pub fn read_all_from<R: Read>(mut reader: R) -> CertResult<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Create or truncate `path` and write `bytes` to it.
pub fn write_all(path: &Path, bytes: &[u8]) -> CertResult<()> {
    Ok(fs::write(path, bytes)?)
}

/// Like [`write_all`], but the file is readable by its owner only (Unix).
pub fn write_secret(path: &Path, bytes: &[u8]) -> CertResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // `mode` only applies to newly created files; tighten an existing one too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

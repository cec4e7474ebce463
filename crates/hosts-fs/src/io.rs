//! Locked file I/O

use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{Seek, Write};

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// The content goes to a temp file in the same directory, which is locked,
/// synced and then renamed over the target.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Overwrite a file in place under an exclusive lock.
///
/// Keeps the file's inode, owner and permissions, which matters for hosts
/// files that are bind-mounted or managed by another tool.
pub fn write_in_place(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    file.set_len(0)
        .and_then(|()| file.rewind())
        .and_then(|()| file.write_all(content))
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(&native_path, e))?;

    file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    tracing::debug!(path = %path, bytes = content.len(), "Wrote file in place");
    Ok(())
}

/// Read a file's raw bytes.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

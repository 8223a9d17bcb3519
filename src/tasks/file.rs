//! Exclusive access to the store file.
//!
//! [`StoreFile::open`] creates the file if needed, then takes a blocking, host-local,
//! advisory `flock` on it. The lock is held until the handle is closed or dropped, so
//! a whole read-modify-write cycle runs without interleaving with other callers that
//! go through this module. Nothing stops a process that ignores the lock.

use crate::error::{Error, Result};
use crate::tasks::codec::HEADER_LINE;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

fn unavailable(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::StoreUnavailable { path: path.to_path_buf(), source }
}

/// Create the store file with its header line if it does not exist yet.
///
/// Missing parent directories are created. Existing files are left alone, whatever
/// they contain.
///
/// Returns `true` if the file was created by this call.
///
/// # Errors
///
/// Returns `StoreUnavailable` if the file or its parent directory cannot be created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(unavailable(path))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(unavailable(path)(e)),
    };

    // A reader that wins the race to the lock sees a zero-length file, which decodes
    // as an empty store.
    fs2::FileExt::lock_exclusive(&file).map_err(unavailable(path))?;
    let written = file.write_all(HEADER_LINE.as_bytes()).and_then(|()| file.sync_all());
    let _ = fs2::FileExt::unlock(&file);
    written.map_err(unavailable(path))?;

    log::debug!("created task store at {}", path.display());
    Ok(true)
}

/// An open store file holding the exclusive lock.
///
/// The lock is released by [`StoreFile::close`], or on drop if the handle goes out of
/// scope on an error path.
#[derive(Debug)]
pub struct StoreFile {
    path: PathBuf,
    file: File,
}

impl StoreFile {
    /// Ensure the store exists, open it for reading and writing, and lock it.
    ///
    /// Blocks until no other handle holds the lock. There is no timeout.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the file cannot be created, opened, or locked.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_exists(path)?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(unavailable(path))?;

        log::trace!("waiting for lock on {}", path.display());
        fs2::FileExt::lock_exclusive(&file).map_err(unavailable(path))?;
        log::debug!("acquired lock on {}", path.display());

        Ok(Self { path: path.to_path_buf(), file })
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the entire file from the start.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the read fails.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.read_to_end(&mut data))
            .map_err(unavailable(&self.path))?;
        Ok(data)
    }

    /// Replace the entire contents of the file with `data` and flush it to disk.
    ///
    /// The file is truncated and rewritten in place so the lock, which belongs to this
    /// inode, keeps protecting it.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if truncating, writing, or syncing fails.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .set_len(0)
            .and_then(|()| self.file.seek(SeekFrom::Start(0)))
            .and_then(|_| self.file.write_all(data))
            .and_then(|()| self.file.sync_all())
            .map_err(unavailable(&self.path))
    }

    /// Release the lock and close the file, reporting an unlock failure.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the lock cannot be released.
    pub fn close(self) -> Result<()> {
        let result = fs2::FileExt::unlock(&self.file).map_err(unavailable(&self.path));
        log::debug!("released lock on {}", self.path.display());
        // Drop unlocks again; flock(LOCK_UN) on an unlocked file is a no-op.
        result
    }
}

impl Drop for StoreFile {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

//! Disk I/O for saved images.
//!
//! The target is opened with exclusive create, so an existing file is never
//! truncated and the duplicate check cannot race the write. A transfer that
//! fails after the file was created removes it again.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// An image file being written. Created empty; filled chunk by chunk.
#[derive(Debug)]
pub struct ImageFile {
    file: File,
    path: PathBuf,
    bytes_written: u64,
}

impl ImageFile {
    /// Create `path` exclusively. Fails with `ErrorKind::AlreadyExists` if it exists.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options().write(true).create_new(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            bytes_written: 0,
        })
    }

    /// Append one chunk of the body.
    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync to disk, closing the file. Returns the saved path.
    /// On failure the file is removed, like `discard`.
    pub fn finish(self) -> io::Result<PathBuf> {
        self.finish_with(|file| {
            file.flush()?;
            file.sync_all()
        })
    }

    fn finish_with<F>(mut self, persist: F) -> io::Result<PathBuf>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        match persist(&mut self.file) {
            Ok(()) => Ok(self.path),
            Err(e) => {
                self.discard();
                Err(e)
            }
        }
    }

    /// Close and remove the partially written file.
    pub fn discard(self) {
        let path = self.path;
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), "failed to remove partial file: {}", e);
        }
    }
}

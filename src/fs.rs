use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Read-only file access used by the local rolodex and configuration loading
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or contains invalid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns the last modification time of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Returns `true` if the path exists and is pointing at a regular file.
    fn is_file(&self, path: &Path) -> bool;
}

pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

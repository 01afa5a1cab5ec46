use super::{Rolodex, RolodexFile};
use crate::error::Error;
use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

/// Serves documents from the local file system
pub struct LocalFs<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> LocalFs<F> {
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> Rolodex for LocalFs<F> {
    fn open(&self, location: &str) -> Result<RolodexFile, Error> {
        let path = Path::new(location);
        if !self.fs.is_file(path) {
            return Err(Error::rolodex(location, "no such file"));
        }
        debug!(target: "strata::rolodex", "reading {}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| Error::rolodex(location, e))?;
        Ok(RolodexFile {
            location: location.to_string(),
            content,
            last_modified: self.fs.modified(path).ok(),
        })
    }
}

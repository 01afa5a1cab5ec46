//! Access to documents referenced from outside the root document
//!
//! The index asks a [`Rolodex`] for every external document location it meets
//! while following `$ref`s. Local paths and http(s) URLs are served by separate
//! implementations, each disabled unless the build configuration allows it.

mod local;
mod remote;

pub use local::LocalFs;
pub use remote::RemoteFs;

use crate::config::BuildConfig;
use crate::error::Error;
use crate::fs::OsFileSystem;
use std::time::SystemTime;

/// Contents of an external document
#[derive(Debug, Clone)]
pub struct RolodexFile {
    pub location: String,
    pub content: String,
    pub last_modified: Option<SystemTime>,
}

pub trait Rolodex: Send + Sync {
    /// Opens the document at `location`, a file path or an http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or fetched.
    fn open(&self, location: &str) -> Result<RolodexFile, Error>;
}

/// Whether a reference location points at a remote document
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Dispatches remote locations to [`RemoteFs`] and everything else to [`LocalFs`]
pub struct DefaultRolodex {
    local: Option<LocalFs<OsFileSystem>>,
    remote: Option<RemoteFs>,
}

impl DefaultRolodex {
    /// Creates a rolodex with the capabilities the configuration allows.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &BuildConfig) -> Result<Self, Error> {
        let local = config
            .allow_file_references
            .then(|| LocalFs::new(OsFileSystem));
        let remote = if config.allow_remote_references {
            Some(RemoteFs::new(std::time::Duration::from_secs(
                config.remote_timeout_secs,
            ))?)
        } else {
            None
        };
        Ok(Self { local, remote })
    }
}

impl Rolodex for DefaultRolodex {
    fn open(&self, location: &str) -> Result<RolodexFile, Error> {
        if is_remote(location) {
            return self
                .remote
                .as_ref()
                .ok_or_else(|| Error::rolodex_disabled(location, "remote"))?
                .open(location);
        }
        self.local
            .as_ref()
            .ok_or_else(|| Error::rolodex_disabled(location, "file"))?
            .open(location)
    }
}

//! CLI command handlers extracted from main.rs.
//!
//! Each submodule handles a top-level command variant from [`Commands`](super::Commands).

#[allow(clippy::missing_errors_doc)]
pub mod inspect;
#[allow(clippy::missing_errors_doc)]
pub mod locate;
#[allow(clippy::missing_errors_doc)]
pub mod refs;

use super::SourceArgs;
use crate::config::BuildConfig;
use crate::error::Error;
use crate::fs::{FileSystem, OsFileSystem};

/// Reads the document named on the command line
pub fn read_document<F: FileSystem>(fs: &F, source: &SourceArgs) -> Result<String, Error> {
    Ok(fs.read_to_string(&source.file)?)
}

/// The build configuration for `source`: the `--config` file if given, with
/// the reference flags applied on top. File references resolve against the
/// document's directory unless the configuration names a base path.
pub fn load_config<F: FileSystem>(fs: &F, source: &SourceArgs) -> Result<BuildConfig, Error> {
    let mut config = match &source.config {
        Some(path) => BuildConfig::load(fs, path)?,
        None => BuildConfig::default(),
    };
    if source.allow_files {
        config.allow_file_references = true;
    }
    if source.allow_remote {
        config.allow_remote_references = true;
    }
    if config.allow_file_references && config.base_path.is_none() {
        config.base_path = source.file.parent().map(std::path::Path::to_path_buf);
    }
    Ok(config)
}

/// Shorthand for the commands, which always read from the real filesystem
pub(crate) fn os_source(source: &SourceArgs) -> Result<(String, BuildConfig), Error> {
    Ok((read_document(&OsFileSystem, source)?, load_config(&OsFileSystem, source)?))
}

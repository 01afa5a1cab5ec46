//! Normalization of `$ref` strings into index keys.
//!
//! A key is `<document-location>#<fragment>`. The root document's location is
//! the empty string, so local references keep their literal `#/...` form.

use crate::config::BuildConfig;
use crate::rolodex::is_remote;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Where root-relative document references resolve from
#[derive(Debug, Clone, Default)]
pub struct ReferenceBase {
    path: Option<PathBuf>,
    url: Option<Url>,
}

impl ReferenceBase {
    #[must_use]
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            path: config.base_path.clone(),
            url: config.base_url.as_deref().and_then(|u| Url::parse(u).ok()),
        }
    }

    /// Location of the document named by `document`, as written inside `origin`
    #[must_use]
    pub fn document_location(&self, origin: &str, document: &str) -> String {
        if document.is_empty() {
            return origin.to_string();
        }
        if is_remote(document) {
            return document.to_string();
        }
        if is_remote(origin) {
            return join_url(origin, document);
        }
        if origin.is_empty() {
            if let Some(url) = &self.url {
                return url
                    .join(document)
                    .map_or_else(|_| document.to_string(), String::from);
            }
            let path = self
                .path
                .as_ref()
                .map_or_else(|| PathBuf::from(document), |base| base.join(document));
            return normalize_path(&path);
        }
        let parent = Path::new(origin).parent().unwrap_or_else(|| Path::new(""));
        normalize_path(&parent.join(document))
    }

    /// Index key for `reference` written inside the document at `origin`
    #[must_use]
    pub fn key(&self, origin: &str, reference: &str) -> String {
        let (document, fragment) = split_reference(reference);
        format!("{}#{fragment}", self.document_location(origin, document))
    }
}

/// Splits a reference into its document part and its fragment (without `#`)
#[must_use]
pub fn split_reference(reference: &str) -> (&str, &str) {
    reference.split_once('#').unwrap_or((reference, ""))
}

fn join_url(origin: &str, document: &str) -> String {
    Url::parse(origin)
        .and_then(|base| base.join(document))
        .map_or_else(|_| document.to_string(), String::from)
}

/// Lexically removes `.` and `..` segments
fn normalize_path(path: &Path) -> String {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized.to_string_lossy().into_owned()
}

use super::base::{Extensions, Positioned};
use super::fields::decode_any;
use crate::constants::EXTENSION_PREFIX;
use crate::yaml::Node;
use tracing::debug;

/// Whether a mapping key names a specification extension
#[must_use]
pub fn is_extension(key: &str) -> bool {
    key.get(..EXTENSION_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(EXTENSION_PREFIX))
}

/// Collects the `x-` entries of a mapping. Values that cannot be decoded are left out.
#[must_use]
pub fn extract_extensions(root: &Node) -> Extensions {
    let mut extensions = Extensions::new();
    for (key, value) in root.entries() {
        let Some(name) = key.as_str().filter(|k| is_extension(k)) else {
            continue;
        };
        match decode_any(value) {
            Some(decoded) => {
                extensions.insert(
                    name.to_string(),
                    Positioned::new(decoded, Some(key.clone()), value.clone()),
                );
            }
            None => {
                debug!(target: "strata::extensions", "dropping undecodable extension '{name}' at {}", value.position());
            }
        }
    }
    extensions
}

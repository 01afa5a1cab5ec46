use super::components::Components;
use super::info::{servers, ExternalDoc, Info, Server, Tag};
use super::path::Paths;
use super::security::SecurityRequirement;
use super::{extensions, list, object, value, Low};
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub version: Option<String>,
    pub info: Option<Info>,
    pub servers: Vec<Server>,
    pub paths: Option<Paths<'a>>,
    pub components: Option<Components<'a>>,
    pub security: Vec<SecurityRequirement>,
    pub tags: Vec<Tag>,
    pub external_docs: Option<ExternalDoc>,
    pub extensions: IndexMap<String, Value>,
    low: Low<&'a low::Document>,
}

impl<'a> Document<'a> {
    /// Number of operations across all paths
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths
            .iter()
            .flat_map(|paths| paths.items.values())
            .map(|item| item.operations().count())
            .sum()
    }

    #[must_use]
    pub const fn go_low(&self) -> &'a low::Document {
        self.low.0
    }
}

impl<'a> From<&'a low::Document> for Document<'a> {
    fn from(low: &'a low::Document) -> Self {
        Self {
            version: value(&low.version),
            info: object(&low.info, Info::from),
            servers: servers(&low.servers),
            paths: object(&low.paths, Paths::from),
            components: object(&low.components, Components::from),
            security: list(&low.security, SecurityRequirement::from),
            tags: list(&low.tags, Tag::from),
            external_docs: object(&low.external_docs, ExternalDoc::from),
            extensions: extensions(&low.extensions),
            low: Low::new(low),
        }
    }
}

//! Reference index over the root document and everything it refers to
//!
//! The index is built once, before any model is built, and is read-only
//! afterwards. It maps every normalized `$ref` key to its target node and keeps
//! the documents it had to load along the way.

mod circular;
mod reference;

pub use circular::CircularReference;
pub use reference::{split_reference, ReferenceBase};

use crate::config::BuildConfig;
use crate::constants::REF_KEY;
use crate::error::Error;
use crate::rolodex::Rolodex;
use crate::yaml::{parse_document, Node};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// One `$ref` occurrence in a document
#[derive(Debug, Clone)]
pub struct ReferenceSite {
    /// The reference as written
    pub definition: String,
    /// The normalized index key
    pub key: String,
    /// The mapping holding the `$ref`
    pub node: Node,
}

#[derive(Debug)]
pub struct SpecIndex {
    root: Node,
    base: ReferenceBase,
    documents: IndexMap<String, Node>,
    references: IndexMap<String, Node>,
    sites: Vec<ReferenceSite>,
    errors: Vec<Error>,
}

impl SpecIndex {
    /// Indexes a single document. References to other documents stay unresolved.
    #[must_use]
    pub fn new(root: Node) -> Self {
        Self::build(root, &BuildConfig::default(), None)
    }

    /// Indexes `root` and, through `rolodex`, every document it transitively refers to
    #[must_use]
    pub fn build(root: Node, config: &BuildConfig, rolodex: Option<&dyn Rolodex>) -> Self {
        let mut documents = IndexMap::new();
        documents.insert(root.origin().to_string(), root.clone());

        let mut index = Self {
            root: root.clone(),
            base: ReferenceBase::from_config(config),
            documents,
            references: IndexMap::new(),
            sites: Vec::new(),
            errors: Vec::new(),
        };

        let mut failed_documents = HashSet::new();
        let mut pending = vec![root];
        while let Some(document) = pending.pop() {
            for node in reference_nodes(&document) {
                let Some(definition) = node.reference().map(str::to_string) else {
                    continue;
                };
                let key = index.reference_key(node.origin(), &definition);
                index.sites.push(ReferenceSite {
                    definition: definition.clone(),
                    key: key.clone(),
                    node: node.clone(),
                });
                if index.references.contains_key(&key) {
                    continue;
                }

                let (location, fragment) = split_reference(&key);
                let target_document = if let Some(loaded) = index.documents.get(location) {
                    loaded.clone()
                } else {
                    if failed_documents.contains(location) {
                        continue;
                    }
                    match load_document(location, rolodex) {
                        Ok(loaded) => {
                            index.documents.insert(location.to_string(), loaded.clone());
                            pending.push(loaded.clone());
                            loaded
                        }
                        Err(e) => {
                            warn!(target: "strata::index", "{e}");
                            failed_documents.insert(location.to_string());
                            index.errors.push(e);
                            continue;
                        }
                    }
                };

                if let Some(target) = target_document.pointer(fragment) {
                    trace!(target: "strata::index", "mapped {key} -> {}", target.position());
                    index.references.insert(key, target);
                } else {
                    let site = node.get(REF_KEY).unwrap_or(&node);
                    index.errors.push(Error::reference_not_found(&definition, site));
                }
            }
        }

        debug!(
            target: "strata::index",
            "indexed {} documents, {} references ({} sites), {} errors",
            index.documents.len(),
            index.references.len(),
            index.sites.len(),
            index.errors.len()
        );
        index
    }

    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Normalized key for `reference` written inside the document at `origin`
    #[must_use]
    pub fn reference_key(&self, origin: &str, reference: &str) -> String {
        self.base.key(origin, reference)
    }

    /// Target of an already-normalized reference key
    #[must_use]
    pub fn locate_reference(&self, key: &str) -> Option<Node> {
        self.references.get(key).cloned()
    }

    /// Target of `reference` as written inside the document at `origin`
    #[must_use]
    pub fn locate_from(&self, origin: &str, reference: &str) -> Option<Node> {
        self.locate_reference(&self.reference_key(origin, reference))
    }

    #[must_use]
    pub const fn mapped_references(&self) -> &IndexMap<String, Node> {
        &self.references
    }

    #[must_use]
    pub fn reference_sites(&self) -> &[ReferenceSite] {
        &self.sites
    }

    /// Loaded documents by location; the root document is at `""`
    #[must_use]
    pub const fn documents(&self) -> &IndexMap<String, Node> {
        &self.documents
    }

    /// Unresolvable references and documents that failed to load
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Moves the recorded errors out of the index
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    #[must_use]
    pub fn find_circular_references(&self) -> Vec<CircularReference> {
        circular::find(self)
    }
}

fn load_document(location: &str, rolodex: Option<&dyn Rolodex>) -> Result<Node, Error> {
    let rolodex =
        rolodex.ok_or_else(|| Error::rolodex(location, "no rolodex available for external documents"))?;
    let file = rolodex.open(location)?;
    debug!(target: "strata::index", "loaded {location} ({} bytes)", file.content.len());
    parse_document(&file.content, &file.location)
}

/// Every reference object at or below `node`, in document order
pub(crate) fn reference_nodes(node: &Node) -> Vec<Node> {
    let mut found = Vec::new();
    collect_references(node, &mut found);
    found
}

fn collect_references(node: &Node, found: &mut Vec<Node>) {
    if node.is_reference() {
        found.push(node.clone());
    }
    for (key, value) in node.entries() {
        if key.as_str() != Some(REF_KEY) {
            collect_references(value, found);
        }
    }
    for item in node.items() {
        collect_references(item, found);
    }
}

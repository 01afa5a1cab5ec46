//! Document build orchestration
//!
//! `Init -> IndexBuilt -> CircularCheckRun -> sections -> Joined -> Done`.
//! The top-level sections are built concurrently; a failing section is left
//! empty and its error joins the outcome's error list.

use super::base::{Extensions, Positioned};
use super::components::Components;
use super::context::{BuildContext, CancellationToken};
use super::extensions::extract_extensions;
use super::extract::{extract_array, extract_object};
use super::fields::scalar;
use super::info::Info;
use super::path::Paths;
use super::security::SecurityRequirement;
use super::server::Server;
use super::tag::{ExternalDoc, Tag};
use crate::config::BuildConfig;
use crate::constants::{
    FIELD_COMPONENTS, FIELD_EXTERNAL_DOCS, FIELD_INFO, FIELD_OPENAPI, FIELD_PATHS, FIELD_SECURITY,
    FIELD_SERVERS, FIELD_TAGS,
};
use crate::error::Error;
use crate::index::{CircularReference, SpecIndex};
use crate::rolodex::{DefaultRolodex, Rolodex};
use crate::yaml::{parse_document, Node};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stages of a document build, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Init,
    IndexBuilt,
    CircularCheckRun,
    Sections,
    Joined,
    Done,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::IndexBuilt => "index built",
            Self::CircularCheckRun => "circular check run",
            Self::Sections => "building sections",
            Self::Joined => "joined",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

type Section<T> = Option<Positioned<T>>;
type SectionList<T> = Option<Positioned<Vec<Positioned<T>>>>;

#[derive(Debug)]
pub struct Document {
    pub version: Section<String>,
    pub info: Section<Info>,
    pub servers: SectionList<Server>,
    pub paths: Section<Paths>,
    pub components: Section<Components>,
    pub security: SectionList<SecurityRequirement>,
    pub tags: SectionList<Tag>,
    pub external_docs: Section<ExternalDoc>,
    pub extensions: Extensions,
    pub root: Node,
    context: BuildContext,
}

impl Document {
    /// Builds every section of the document at `root`, recording section errors in `ctx`
    #[must_use]
    pub fn build(root: &Node, ctx: &BuildContext) -> Self {
        let mut info = None;
        let mut servers = None;
        let mut tags = None;
        let mut components = None;
        let mut security = None;
        let mut external_docs = None;
        let mut paths = None;

        ctx.install(|| {
            rayon::scope(|s| {
                s.spawn(|_| info = section(FIELD_INFO, ctx, || extract_object(FIELD_INFO, root, ctx)));
                s.spawn(|_| servers = section(FIELD_SERVERS, ctx, || extract_array(FIELD_SERVERS, root, ctx)));
                s.spawn(|_| tags = section(FIELD_TAGS, ctx, || extract_array(FIELD_TAGS, root, ctx)));
                s.spawn(|_| {
                    components = section(FIELD_COMPONENTS, ctx, || extract_object(FIELD_COMPONENTS, root, ctx));
                });
                s.spawn(|_| security = section(FIELD_SECURITY, ctx, || extract_array(FIELD_SECURITY, root, ctx)));
                s.spawn(|_| {
                    external_docs =
                        section(FIELD_EXTERNAL_DOCS, ctx, || extract_object(FIELD_EXTERNAL_DOCS, root, ctx));
                });
                s.spawn(|_| paths = section(FIELD_PATHS, ctx, || extract_object(FIELD_PATHS, root, ctx)));
            });
        });

        let version = ctx.settle(FIELD_OPENAPI, scalar::<String>(root, FIELD_OPENAPI, ctx)).flatten();
        match &version {
            None => ctx.record(Error::invalid_document_at(
                "document has no 'openapi' version",
                root,
            )),
            Some(v) if !v.value.starts_with("3.0") => warn!(
                target: "strata::document",
                "building version {} with the OpenAPI 3.0 model",
                v.value
            ),
            Some(_) => {}
        }

        Self {
            version,
            info,
            servers,
            paths,
            components,
            security,
            tags,
            external_docs,
            extensions: extract_extensions(root),
            root: root.clone(),
            context: ctx.clone(),
        }
    }

    /// The session the document was built in
    #[must_use]
    pub const fn context(&self) -> &BuildContext {
        &self.context
    }

    #[must_use]
    pub fn index(&self) -> &SpecIndex {
        self.context.index()
    }
}

fn section<T>(
    label: &str,
    ctx: &BuildContext,
    build: impl FnOnce() -> Result<Option<T>, Error>,
) -> Option<T> {
    if ctx.is_cancelled() {
        return None;
    }
    ctx.settle(label, build()).flatten()
}

/// A built document with everything that went wrong while building it
#[derive(Debug)]
pub struct BuildOutcome {
    pub document: Document,
    /// Sorted by source position; errors without one come last
    pub errors: Vec<Error>,
    pub circular_references: Vec<CircularReference>,
}

impl BuildOutcome {
    /// Whether every section built without error
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Builds low-level documents from source text or parsed nodes
pub struct DocumentBuilder {
    config: BuildConfig,
    rolodex: Option<Arc<dyn Rolodex>>,
    cancel: CancellationToken,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            rolodex: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Serves external documents from `rolodex`
    #[must_use]
    pub fn with_rolodex(mut self, rolodex: Arc<dyn Rolodex>) -> Self {
        self.rolodex = Some(rolodex);
        self
    }

    /// Serves external documents with the capabilities the configuration allows.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote client cannot be created.
    pub fn with_default_rolodex(self) -> Result<Self, Error> {
        let rolodex = DefaultRolodex::from_config(&self.config)?;
        Ok(self.with_rolodex(Arc::new(rolodex)))
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Parses and builds a document. The root document's location is `""`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the text is not YAML or
    /// JSON, or the root is not a mapping. Problems inside the document are
    /// reported in the outcome instead.
    pub fn build_from_str(&self, content: &str) -> Result<BuildOutcome, Error> {
        let root = parse_document(content, "")?;
        self.build_from_node(root)
    }

    /// Builds a document from an already parsed root node.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the root is not a mapping.
    pub fn build_from_node(&self, root: Node) -> Result<BuildOutcome, Error> {
        let phase = |phase: BuildPhase| debug!(target: "strata::document", "phase: {phase}");

        phase(BuildPhase::Init);
        self.config.validate()?;
        if !root.is_mapping() {
            return Err(Error::invalid_document_at(
                format!("document root must be a mapping, found {}", root.kind_name()),
                &root,
            ));
        }

        let mut index = SpecIndex::build(root.clone(), &self.config, self.rolodex.as_deref());
        let mut errors = index.take_errors();
        phase(BuildPhase::IndexBuilt);

        let circular_references = if self.config.skip_circular_check {
            Vec::new()
        } else {
            index.find_circular_references()
        };
        for circular in &circular_references {
            debug!(target: "strata::document", "circular reference: {}", circular.journey.join(" -> "));
        }
        phase(BuildPhase::CircularCheckRun);

        let ctx = BuildContext::new(index, self.config.clone(), self.cancel.clone())?;
        phase(BuildPhase::Sections);
        let document = Document::build(&root, &ctx);
        phase(BuildPhase::Joined);

        errors.extend(ctx.take_diagnostics());
        if ctx.is_cancelled() {
            errors.push(Error::cancelled("building the document"));
        }
        sort_errors(&mut errors);
        phase(BuildPhase::Done);

        info!(
            target: "strata::document",
            "built document: {} errors, {} circular references, {} references",
            errors.len(),
            circular_references.len(),
            ctx.index().mapped_references().len()
        );
        Ok(BuildOutcome {
            document,
            errors,
            circular_references,
        })
    }
}

/// Orders errors by position and drops exact duplicates
fn sort_errors(errors: &mut Vec<Error>) {
    let mut keyed: Vec<_> = errors
        .drain(..)
        .map(|e| ((e.position().is_none(), e.position(), e.to_string()), e))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    errors.extend(keyed.into_iter().map(|(_, e)| e));
}

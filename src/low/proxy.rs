//! Lazy schema handles
//!
//! A [`SchemaProxy`] only records where a schema is written. The schema is
//! built the first time it is asked for, through the session's seen-schema
//! cache, and the outcome is remembered on the proxy. Nested schemas are
//! themselves proxies, so a circular reference graph is only walked as far as
//! callers dereference it.

use super::base::Buildable;
use super::cache::SchemaResult;
use super::context::{BuildContext, BuildSession};
use super::locator;
use super::schema::Schema;
use crate::config::DepthPolicy;
use crate::error::Error;
use crate::yaml::{Node, NodeId, Position};
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, trace};

enum Resolution {
    /// Built through the cache. The proxy keeps a weak handle so circular
    /// schemas do not keep each other alive; the cache and callers own it.
    Shared {
        key: NodeId,
        target: Node,
        schema: Weak<Schema>,
    },
    /// Built outside the cache, past the depth ceiling
    Detached(Arc<Schema>),
}

pub struct SchemaProxy {
    key_node: Option<Node>,
    value_node: Node,
    session: Weak<BuildSession>,
    depth: usize,
    resolution: OnceLock<Result<Resolution, Arc<Error>>>,
}

impl SchemaProxy {
    /// A proxy for the schema written at `value_node`, `depth` levels below
    /// the proxy that started the walk
    #[must_use]
    pub fn new(
        key_node: Option<&Node>,
        value_node: &Node,
        ctx: &BuildContext,
        depth: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            key_node: key_node.cloned(),
            value_node: value_node.clone(),
            session: ctx.downgrade(),
            depth,
            resolution: OnceLock::new(),
        })
    }

    /// The built schema, or `None` when it could not be built (see [`Self::build_error`])
    #[must_use]
    pub fn schema(&self) -> Option<Arc<Schema>> {
        self.resolve().ok()
    }

    /// Why the schema could not be built
    #[must_use]
    pub fn build_error(&self) -> Option<Arc<Error>> {
        self.resolve().err()
    }

    /// Builds the schema on first use; later calls return the same schema or the same error.
    ///
    /// # Errors
    ///
    /// Returns the cached error when the reference cannot be resolved, the schema
    /// fails to build, or it lies past the depth ceiling under the error policy.
    pub fn resolve(&self) -> SchemaResult {
        let Some(ctx) = BuildContext::upgrade(&self.session) else {
            return Err(Arc::new(Error::invalid_document_at(
                "the document this schema belongs to has been dropped",
                &self.value_node,
            )));
        };

        match self.resolution.get_or_init(|| self.resolve_uncached(&ctx)) {
            Ok(Resolution::Shared { key, target, schema }) => match schema.upgrade() {
                Some(schema) => Ok(schema),
                None => ctx
                    .cache()
                    .get_or_build(*key, || Schema::build(target, &ctx, self.depth)),
            },
            Ok(Resolution::Detached(schema)) => Ok(Arc::clone(schema)),
            Err(e) => Err(Arc::clone(e)),
        }
    }

    fn resolve_uncached(&self, ctx: &BuildContext) -> Result<Resolution, Arc<Error>> {
        let (target, _) = locator::resolve(&self.value_node, ctx).map_err(Arc::new)?;
        let key = target.id();
        let config = ctx.config();

        if self.depth > config.max_depth && ctx.cache().get(key).is_none() {
            return match config.depth_policy {
                DepthPolicy::Error => {
                    debug!(target: "strata::proxy", "depth {} past ceiling at {}", self.depth, target.position());
                    Err(Arc::new(Error::too_deep(self.depth, config.max_depth, &target)))
                }
                DepthPolicy::Truncate => {
                    debug!(target: "strata::proxy", "truncating schema at {} (depth {})", target.position(), self.depth);
                    Schema::build_truncated(&target, ctx, self.depth)
                        .map(|schema| Resolution::Detached(Arc::new(schema)))
                        .map_err(Arc::new)
                }
            };
        }

        trace!(target: "strata::proxy", "resolving {} at depth {}", target.position(), self.depth);
        let schema = ctx
            .cache()
            .get_or_build(key, || Schema::build(&target, ctx, self.depth))?;
        Ok(Resolution::Shared {
            key,
            target,
            schema: Arc::downgrade(&schema),
        })
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.value_node.is_reference()
    }

    /// The `$ref` this proxy stands for, if it is one
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.value_node.reference()
    }

    #[must_use]
    pub fn key_node(&self) -> Option<&Node> {
        self.key_node.as_ref()
    }

    /// The node the schema is written at; the `$ref` mapping for references
    #[must_use]
    pub const fn value_node(&self) -> &Node {
        &self.value_node
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.value_node.position()
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Whether resolution has already run
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolution.get().is_some()
    }
}

impl Buildable for Arc<SchemaProxy> {
    const RESOLVE_REFERENCES: bool = false;

    fn build(key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        Ok(SchemaProxy::new(key, node, ctx, 0))
    }
}

impl fmt::Debug for SchemaProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("SchemaProxy");
        match self.reference() {
            Some(reference) => debug.field("reference", &reference),
            None => debug.field("position", &self.position()),
        };
        debug
            .field("depth", &self.depth)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::error::ErrorKind;
    use crate::index::SpecIndex;
    use crate::low::context::CancellationToken;
    use crate::yaml::parse_document;

    fn context_with(content: &str, config: BuildConfig) -> (BuildContext, Node) {
        let root = parse_document(content, "").unwrap();
        let ctx = BuildContext::new(SpecIndex::new(root.clone()), config, CancellationToken::new())
            .unwrap();
        (ctx, root)
    }

    fn context(content: &str) -> (BuildContext, Node) {
        context_with(content, BuildConfig::default())
    }

    fn component(ctx: &BuildContext, root: &Node, name: &str) -> Arc<SchemaProxy> {
        let node = root.pointer(&format!("/components/schemas/{name}")).unwrap();
        SchemaProxy::new(None, &node, ctx, 0)
    }

    fn property(schema: &Schema, name: &str) -> Arc<SchemaProxy> {
        Arc::clone(&schema.properties.as_ref().unwrap().value[name].value)
    }

    #[test]
    fn test_resolution_is_memoized() {
        let (ctx, root) = context("components:\n  schemas:\n    Pet:\n      type: object\n");
        let proxy = component(&ctx, &root, "Pet");
        assert!(!proxy.is_resolved());

        let first = proxy.schema().unwrap();
        let second = proxy.schema().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(proxy.is_resolved());
        assert!(proxy.build_error().is_none());
    }

    #[test]
    fn test_resolution_survives_a_cache_clear() {
        let (ctx, root) = context("components:\n  schemas:\n    Pet:\n      type: object\n");
        let proxy = component(&ctx, &root, "Pet");
        let first = proxy.schema().unwrap();

        ctx.cache().clear();
        assert!(ctx.cache().is_empty());
        let second = proxy.schema().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(ctx.cache().is_empty());
    }

    #[test]
    fn test_build_error_is_memoized() {
        let (ctx, root) = context("components:\n  schemas:\n    Pet:\n      $ref: '#/components/schemas/Gone'\n");
        let proxy = component(&ctx, &root, "Pet");

        assert!(proxy.schema().is_none());
        let first = proxy.build_error().unwrap();
        let second = proxy.build_error().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.kind(), Some(ErrorKind::ReferenceNotFound));
        assert!(first
            .to_string()
            .contains("reference cannot be found: '#/components/schemas/Gone' at line 4 col 13"));
        assert!(ctx.take_diagnostics().is_empty());
    }

    #[test]
    fn test_fragment_without_leading_slash_does_not_build_the_root() {
        let (ctx, root) =
            context("components:\n  schemas:\n    Pet:\n      properties:\n        bad:\n          $ref: '#Pet'\n");
        let pet = component(&ctx, &root, "Pet").schema().unwrap();
        let bad = property(&pet, "bad");
        assert!(bad.schema().is_none());
        assert_eq!(bad.build_error().unwrap().kind(), Some(ErrorKind::ReferenceNotFound));
    }

    #[test]
    fn test_shared_references_yield_one_schema() {
        let (ctx, root) = context(
            "components:\n  schemas:\n    Owner:\n      properties:\n        home:\n          $ref: '#/components/schemas/Address'\n        work:\n          $ref: '#/components/schemas/Address'\n    Address:\n      type: object\n",
        );
        let owner = component(&ctx, &root, "Owner").schema().unwrap();
        let home = property(&owner, "home").schema().unwrap();
        let work = property(&owner, "work").schema().unwrap();
        assert!(Arc::ptr_eq(&home, &work));

        let address = component(&ctx, &root, "Address").schema().unwrap();
        assert!(Arc::ptr_eq(&home, &address));
    }

    #[test]
    fn test_circular_references_return_to_the_same_schema() {
        let (ctx, root) = context(
            "components:\n  schemas:\n    A:\n      properties:\n        b:\n          $ref: '#/components/schemas/B'\n    B:\n      properties:\n        a:\n          $ref: '#/components/schemas/A'\n",
        );
        let a = component(&ctx, &root, "A").schema().unwrap();
        let b = property(&a, "b").schema().unwrap();
        let back = property(&b, "a").schema().unwrap();
        assert!(Arc::ptr_eq(&a, &back));

        let again = property(&property(&back, "b").schema().unwrap(), "a")
            .schema()
            .unwrap();
        assert!(Arc::ptr_eq(&a, &again));
    }

    fn nested(levels: usize) -> String {
        let mut content = String::from("root:\n");
        for i in 0..levels {
            let pad = " ".repeat(2 + 4 * i);
            content.push_str(&format!("{pad}properties:\n{pad}  child:\n"));
        }
        content.push_str(&format!("{}type: string\n", " ".repeat(2 + 4 * levels)));
        content
    }

    /// Follows `child` properties down from `root` until a level fails to build
    fn walk(ctx: &BuildContext, root: &Node) -> (usize, Option<Arc<Schema>>, Arc<SchemaProxy>) {
        let mut proxy = SchemaProxy::new(None, root.get("root").unwrap(), ctx, 0);
        let mut last = None;
        loop {
            let Some(schema) = proxy.schema() else {
                return (proxy.depth(), last, proxy);
            };
            let Some(properties) = schema.properties.as_ref() else {
                return (proxy.depth(), Some(schema), proxy);
            };
            let next = Arc::clone(&properties.value["child"].value);
            last = Some(schema);
            proxy = next;
        }
    }

    #[test]
    fn test_depth_ceiling_reports_an_error() {
        let (ctx, root) = context(&nested(35));
        let (depth, _, proxy) = walk(&ctx, &root);
        assert_eq!(depth, 31);
        let err = proxy.build_error().unwrap();
        assert_eq!(err.kind(), Some(ErrorKind::ExcessiveDepth));
        assert!(err.to_string().contains("depth 31 exceeds the limit of 30"));
    }

    #[test]
    fn test_depth_ceiling_truncates_when_configured() {
        let config = BuildConfig::default().with_max_depth(30, DepthPolicy::Truncate);
        let (ctx, root) = context_with(&nested(35), config);
        let (depth, last, proxy) = walk(&ctx, &root);
        assert_eq!(depth, 31);
        let truncated = last.unwrap();
        assert!(truncated.truncated);
        assert!(truncated.properties.is_none());
        assert!(proxy.build_error().is_none());
    }

    #[test]
    fn test_shallow_documents_are_unaffected_by_the_ceiling() {
        let (ctx, root) = context(&nested(10));
        let (depth, last, _) = walk(&ctx, &root);
        assert_eq!(depth, 10);
        let leaf = last.unwrap();
        assert!(!leaf.truncated);
        assert!(leaf.schema_type.is_some());
    }
}

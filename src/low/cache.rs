//! Seen-schema cache
//!
//! Maps a schema node's identity to the one `Schema` built from it during a
//! session. The per-key cell is fetched or inserted under a single lock, and
//! the cell's once-initialization makes racing resolvers wait for the winner.

use super::schema::Schema;
use crate::error::Error;
use crate::yaml::NodeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::trace;

pub type SchemaResult = Result<Arc<Schema>, Arc<Error>>;

type Cell = Arc<OnceLock<SchemaResult>>;

#[derive(Default)]
pub struct SchemaCache {
    cells: Mutex<HashMap<NodeId, Cell>>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: NodeId) -> Cell {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key).or_default())
    }

    /// Returns the schema for `key`, running `build` only if no schema has
    /// been built for it yet. A failed build is cached like a successful one.
    ///
    /// `build` must not resolve schemas through this cache.
    ///
    /// # Errors
    ///
    /// Returns the (shared) error of the build that ran for `key`.
    pub fn get_or_build<F>(&self, key: NodeId, build: F) -> SchemaResult
    where
        F: FnOnce() -> Result<Schema, Error>,
    {
        let cell = self.cell(key);
        if let Some(done) = cell.get() {
            trace!(target: "strata::cache", "hit {key:?}");
            return done.clone();
        }
        cell.get_or_init(|| {
            trace!(target: "strata::cache", "building {key:?}");
            build().map(Arc::new).map_err(Arc::new)
        })
        .clone()
    }

    /// The finished result for `key`, if a build for it has completed
    #[must_use]
    pub fn result(&self, key: NodeId) -> Option<SchemaResult> {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.get(&key).and_then(|cell| cell.get().cloned())
    }

    /// The schema built for `key`, if one was built successfully
    #[must_use]
    pub fn get(&self, key: NodeId) -> Option<Arc<Schema>> {
        self.result(key).and_then(Result::ok)
    }

    /// Number of keys with a finished build
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every built schema
    pub fn clear(&self) {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SpecIndex;
    use crate::low::context::BuildContext;
    use crate::yaml::parse_document;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fixture() -> (BuildContext, crate::yaml::Node) {
        let root = parse_document("type: string\n", "").unwrap();
        (BuildContext::for_index(SpecIndex::new(root.clone())), root)
    }

    #[test]
    fn test_builds_each_key_once_under_contention() {
        let (ctx, node) = fixture();
        let builds = AtomicUsize::new(0);

        let (ctx, node, builds) = (&ctx, &node, &builds);
        let results: Vec<Arc<Schema>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(move || {
                        ctx.cache()
                            .get_or_build(node.id(), || {
                                builds.fetch_add(1, Ordering::SeqCst);
                                std::thread::sleep(std::time::Duration::from_millis(5));
                                Schema::build(node, ctx, 0)
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(ctx.cache().len(), 1);
    }

    #[test]
    fn test_errors_are_cached() {
        let (ctx, node) = fixture();
        let first = ctx
            .cache()
            .get_or_build(node.id(), || Err(Error::invalid_document("boom")))
            .unwrap_err();
        let second = ctx
            .cache()
            .get_or_build(node.id(), || Schema::build(&node, &ctx, 0))
            .unwrap_err();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(ctx.cache().get(node.id()).is_none());
    }

    #[test]
    fn test_clear_resets_the_cache() {
        let (ctx, node) = fixture();
        ctx.cache()
            .get_or_build(node.id(), || Schema::build(&node, &ctx, 0))
            .unwrap();
        assert!(!ctx.cache().is_empty());
        ctx.cache().clear();
        assert!(ctx.cache().is_empty());
        assert!(ctx.cache().get(node.id()).is_none());
    }
}

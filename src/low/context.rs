//! Shared state of one document build
//!
//! A [`BuildSession`] is created per document build and handed to every
//! builder through a [`BuildContext`]. Nothing in it outlives the document.

use super::cache::SchemaCache;
use crate::config::BuildConfig;
use crate::error::Error;
use crate::index::SpecIndex;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::trace;

/// Cooperative cancellation flag, checked at every join point
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct BuildSession {
    index: SpecIndex,
    cache: SchemaCache,
    config: BuildConfig,
    cancel: CancellationToken,
    diagnostics: Mutex<Vec<Error>>,
    pool: Option<rayon::ThreadPool>,
}

/// Handle to the build session, threaded through every builder
#[derive(Clone)]
pub struct BuildContext(Arc<BuildSession>);

impl BuildContext {
    /// Creates a session over `index`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the dedicated worker pool cannot be created.
    pub fn new(
        index: SpecIndex,
        config: BuildConfig,
        cancel: CancellationToken,
    ) -> Result<Self, Error> {
        let pool = match config.max_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("strata-build-{i}"))
                    .build()
                    .map_err(|e| Error::invalid_config(format!("cannot start worker pool: {e}")))?,
            ),
            None => None,
        };
        Ok(Self(Arc::new(BuildSession {
            index,
            cache: SchemaCache::new(),
            config,
            cancel,
            diagnostics: Mutex::new(Vec::new()),
            pool,
        })))
    }

    /// A session over a single in-memory document with the default configuration
    #[must_use]
    pub fn for_index(index: SpecIndex) -> Self {
        Self(Arc::new(BuildSession {
            index,
            cache: SchemaCache::new(),
            config: BuildConfig::default(),
            cancel: CancellationToken::new(),
            diagnostics: Mutex::new(Vec::new()),
            pool: None,
        }))
    }

    #[must_use]
    pub fn index(&self) -> &SpecIndex {
        &self.0.index
    }

    #[must_use]
    pub fn cache(&self) -> &SchemaCache {
        &self.0.cache
    }

    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.0.config
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.cancel.is_cancelled()
    }

    pub(crate) fn downgrade(&self) -> Weak<BuildSession> {
        Arc::downgrade(&self.0)
    }

    pub(crate) fn upgrade(session: &Weak<BuildSession>) -> Option<Self> {
        session.upgrade().map(Self)
    }

    /// Whether two handles belong to the same session
    #[must_use]
    pub fn same_session(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Adds an error to the session's error list
    pub fn record(&self, error: Error) {
        self.0
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }

    /// Drains the errors recorded so far
    #[must_use]
    pub fn take_diagnostics(&self) -> Vec<Error> {
        std::mem::take(
            &mut *self
                .0
                .diagnostics
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Runs `f` on the session's worker pool, or on the calling thread without one
    pub fn install<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.0.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    /// Maps `items` through `f`, in parallel once there are at least
    /// `parallel_threshold` of them. Results keep the order of `items`.
    pub fn fan_out<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if items.len() < self.0.config.parallel_threshold {
            return items.iter().map(f).collect();
        }
        trace!(target: "strata::build", "fanning out {} tasks", items.len());
        self.install(|| items.par_iter().map(f).collect())
    }

    /// Fan-out for work running inside a schema cache cell.
    ///
    /// Stays on the calling thread unless the session has its own pool and the
    /// caller is not a rayon worker. A worker waiting on this join could
    /// otherwise run a job that blocks on the cell being initialized.
    pub(crate) fn fan_out_in_cell<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.0.pool.is_some() && rayon::current_thread_index().is_none() {
            self.fan_out(items, f)
        } else {
            items.iter().map(f).collect()
        }
    }

    /// Unwraps a child result at a join point, recording its error
    pub(crate) fn settle<T>(&self, label: &str, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(target: "strata::build", "'{label}' failed: {e}");
                self.record(e);
                None
            }
        }
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("references", &self.0.index.mapped_references().len())
            .field("cached_schemas", &self.0.cache.len())
            .field("pool", &self.0.pool.as_ref().map(rayon::ThreadPool::current_num_threads))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_document;

    fn context(config: BuildConfig) -> BuildContext {
        let root = parse_document("{}", "").unwrap();
        BuildContext::new(SpecIndex::new(root), config, CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_fan_out_preserves_order() {
        for threshold in [1, 4, 1000] {
            let ctx = context(BuildConfig {
                parallel_threshold: threshold,
                max_threads: Some(3),
                ..BuildConfig::default()
            });
            let items: Vec<usize> = (0..200).collect();
            let doubled = ctx.fan_out(&items, |i| i * 2);
            assert_eq!(doubled, items.iter().map(|i| i * 2).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_diagnostics_are_drained() {
        let ctx = context(BuildConfig::default());
        ctx.record(Error::invalid_document("first"));
        ctx.record(Error::invalid_document("second"));
        assert_eq!(ctx.take_diagnostics().len(), 2);
        assert!(ctx.take_diagnostics().is_empty());
    }

    #[test]
    fn test_cancellation_is_shared() {
        let token = CancellationToken::new();
        let root = parse_document("{}", "").unwrap();
        let ctx = BuildContext::new(SpecIndex::new(root), BuildConfig::default(), token.clone())
            .unwrap();
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
    }
}

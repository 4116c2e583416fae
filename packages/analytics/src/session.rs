//! A loaded dataset plus its view cache.

use std::sync::Arc;

use crate::{
    Dataset,
    cache::{ViewCache, ViewParams, ViewPayload, build_view},
    guard::{RecomputeGuard, Ticket},
};

/// Owns the current dataset and memoizes the views built from it.
///
/// Replacing the dataset bumps its version, so cached views built from the
/// old data are never served again.
#[derive(Debug)]
pub struct Session {
    dataset: Arc<Dataset>,
    version: u64,
    cache: ViewCache,
    guard: RecomputeGuard,
}

impl Session {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            version: 1,
            cache: ViewCache::new(),
            guard: RecomputeGuard::new(),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Swaps in a newly loaded dataset and evicts views of the old one.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = Arc::new(dataset);
        self.version += 1;
        self.cache.retain_version(self.version);
        log::info!("Dataset replaced, now at version {}", self.version);
    }

    /// Returns the cached view for `params`, building it on a miss.
    pub fn view(&self, params: &ViewParams) -> Arc<ViewPayload> {
        let params = params.normalized();
        if let Some(payload) = self.cache.get(self.version, &params) {
            return payload;
        }
        log::debug!("Building view {params:?} for version {}", self.version);
        let payload = build_view(&self.dataset, &params);
        self.cache.insert(self.version, params, payload)
    }

    /// Registers a new selection, superseding every pending one.
    pub fn begin(&self) -> Ticket {
        self.guard.begin()
    }

    /// Builds the view for a selection, or `None` if a newer selection was
    /// made in the meantime.
    pub fn complete(&self, ticket: Ticket, params: &ViewParams) -> Option<Arc<ViewPayload>> {
        if !self.guard.is_current(ticket) {
            return None;
        }
        let payload = self.view(params);
        self.guard.finish(ticket, payload)
    }

    /// [`Self::begin`] followed by [`Self::complete`].
    pub fn request(&self, params: &ViewParams) -> Option<Arc<ViewPayload>> {
        let ticket = self.begin();
        self.complete(ticket, params)
    }
}

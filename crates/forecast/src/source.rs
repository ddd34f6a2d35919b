//! The dataset-fetch capability and an in-memory implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

use briefing_common::RunId;

use crate::types::{Dataset, Product};

/// Failure reported by a dataset source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The catalog has no data for this exact run.
    #[error("run {run} not found in {product} catalog")]
    RunNotFound { product: Product, run: RunId },

    /// Anything else: network, decoding, permissions.
    #[error("{0}")]
    Unavailable(String),
}

/// Something that can fetch the dataset of one product and run.
///
/// Implementations must report a missing run as [`SourceError::RunNotFound`]
/// so callers can tell it apart from other failures.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, product: Product, run: RunId) -> Result<Dataset, SourceError>;
}

#[async_trait]
impl<T: DatasetSource + ?Sized> DatasetSource for Arc<T> {
    async fn fetch(&self, product: Product, run: RunId) -> Result<Dataset, SourceError> {
        (**self).fetch(product, run).await
    }
}

/// In-memory catalog keyed by product and run.
///
/// Used for tests and for re-running a briefing from data already on hand.
/// Every fetch is counted and recorded.
#[derive(Debug, Default)]
pub struct MemorySource {
    datasets: HashMap<(Product, RunId), Dataset>,
    failures: HashMap<(Product, RunId), String>,
    attempts: AtomicUsize,
    requests: Mutex<Vec<(Product, RunId)>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.insert(dataset);
        self
    }

    pub fn insert(&mut self, dataset: Dataset) {
        self.datasets.insert((dataset.product, dataset.run), dataset);
    }

    /// Make fetches of this run fail with [`SourceError::Unavailable`].
    pub fn with_failure(mut self, product: Product, run: RunId, message: impl Into<String>) -> Self {
        self.failures.insert((product, run), message.into());
        self
    }

    /// Number of fetches made so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Fetched `(product, run)` pairs in call order.
    pub fn requests(&self) -> Vec<(Product, RunId)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn reset_counters(&self) {
        self.attempts.store(0, Ordering::SeqCst);
        match self.requests.lock() {
            Ok(mut r) => r.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

#[async_trait]
impl DatasetSource for MemorySource {
    async fn fetch(&self, product: Product, run: RunId) -> Result<Dataset, SourceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.requests.lock() {
            Ok(mut r) => r.push((product, run)),
            Err(poisoned) => poisoned.into_inner().push((product, run)),
        }

        if let Some(message) = self.failures.get(&(product, run)) {
            return Err(SourceError::Unavailable(message.clone()));
        }

        self.datasets
            .get(&(product, run))
            .cloned()
            .ok_or(SourceError::RunNotFound { product, run })
    }
}

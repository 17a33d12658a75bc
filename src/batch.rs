//! Grouped concurrent writes.
//!
//! A [`BatchWriter`] splits pending writes into consecutive groups of at most
//! `group_size`, runs each group's writes concurrently and waits for the whole
//! group before starting the next. Every item gets exactly one attempt; a
//! failing write never stops its siblings or later groups.

use futures::future::join_all;
use std::future::Future;
use std::num::NonZeroUsize;
use tracing::{debug, info, instrument, warn};

use k12_config::BatchConfig;
use k12_core::AppError;
use k12_observability::track_batch_write;

/// One write that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the item in the input sequence.
    pub index: usize,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport<T> {
    /// Results of the successful writes, in input order.
    pub created: Vec<T>,
    /// Failed writes, in input order.
    pub failures: Vec<BatchFailure>,
    /// Number of writes dispatched in each group.
    pub group_sizes: Vec<usize>,
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            failures: Vec::new(),
            group_sizes: Vec::new(),
        }
    }
}

impl<T> BatchReport<T> {
    pub fn succeeded(&self) -> usize {
        self.created.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// "Added 12 students, 0 failed"
    pub fn summary(&self, noun: &str) -> String {
        format!("Added {} {}, {} failed", self.succeeded(), noun, self.failed())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchWriter {
    group_size: NonZeroUsize,
}

impl Default for BatchWriter {
    fn default() -> Self {
        Self::from_config(&BatchConfig::default())
    }
}

impl BatchWriter {
    pub fn new(group_size: NonZeroUsize) -> Self {
        Self { group_size }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(config.group_size)
    }

    pub fn group_size(&self) -> usize {
        self.group_size.get()
    }

    /// Runs `write` once for every item, one group at a time.
    #[instrument(skip_all, fields(batch.items = items.len(), batch.group_size = self.group_size.get()))]
    pub async fn run<I, T, F, Fut>(&self, items: Vec<I>, mut write: F) -> BatchReport<T>
    where
        F: FnMut(I) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut report = BatchReport::default();
        let mut pending = items.into_iter().enumerate();

        for group in 0.. {
            let writes: Vec<_> = pending
                .by_ref()
                .take(self.group_size.get())
                .map(|(index, item)| {
                    let attempt = write(item);
                    async move { (index, attempt.await) }
                })
                .collect();

            if writes.is_empty() {
                break;
            }
            report.group_sizes.push(writes.len());

            let mut group_failures = 0;
            for (index, result) in join_all(writes).await {
                track_batch_write(result.is_ok());
                match result {
                    Ok(value) => report.created.push(value),
                    Err(e) => {
                        group_failures += 1;
                        warn!(batch.group = group, batch.index = index, error = %e, "Batch write failed");
                        report.failures.push(BatchFailure {
                            index,
                            message: e.user_message(),
                        });
                    }
                }
            }

            debug!(
                batch.group = group,
                batch.group_items = report.group_sizes[group],
                batch.group_failures = group_failures,
                "Batch group complete"
            );
        }

        info!(
            batch.succeeded = report.succeeded(),
            batch.failed = report.failed(),
            batch.groups = report.group_sizes.len(),
            "Batch complete"
        );

        report
    }
}

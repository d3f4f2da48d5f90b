/*
 * batch.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Running independent exports to completion.
 */

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;
use tracing::error;

/// Outcome of a batch of exports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    /// One message per failed task, in task order
    pub failures: Vec<String>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }
}

/// Await every task, logging failures instead of stopping at the first one.
///
/// Tasks are polled together on the current task, so their I/O waits overlap
/// without spawning. A failing task never cancels its siblings.
pub async fn resolve_and_log_errors<I, F, T, E>(tasks: I) -> BatchReport
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut report = BatchReport::default();
    for result in join_all(tasks).await {
        match result {
            Ok(_) => report.succeeded += 1,
            Err(err) => {
                error!("{err}");
                report.failures.push(err.to_string());
            }
        }
    }
    report
}

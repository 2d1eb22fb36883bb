//! Fan-out/join for the questions of one DNS request.
//!
//! Every piece of work spawned through a [`PendingRequest`] (or one of its
//! [`PendingHandle`]s, which is how nested alias lookups join the same group)
//! is tracked until it completes. [`PendingRequest::finish`] waits for all of
//! them, then hands back the accumulated answers. It consumes the request, so
//! a response can only ever be produced once.

use dockdns_domain::{DnsRecord, DomainError};
use std::future::Future;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::warn;

#[derive(Clone)]
pub struct PendingHandle {
    tracker: TaskTracker,
    cancel: CancellationToken,
    answers: Arc<Mutex<Vec<DnsRecord>>>,
    failure: Arc<OnceLock<DomainError>>,
}

impl PendingHandle {
    /// Runs `work` as part of the request. The task is dropped at its next
    /// suspension point once the request is cancelled.
    pub fn spawn<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = work => {}
            }
        });
    }

    pub fn push(&self, record: DnsRecord) {
        self.lock_answers().push(record);
    }

    /// Appends `records` contiguously, keeping their relative order.
    pub fn extend(&self, records: Vec<DnsRecord>) {
        if records.is_empty() {
            return;
        }
        self.lock_answers().extend(records);
    }

    /// Marks the request as failed and cancels all outstanding work. Only the
    /// first failure is kept.
    pub fn fail(&self, error: DomainError) {
        let _ = self.failure.set(error);
        self.cancel.cancel();
    }

    fn lock_answers(&self) -> std::sync::MutexGuard<'_, Vec<DnsRecord>> {
        self.answers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct PendingRequest {
    handle: PendingHandle,
}

impl PendingRequest {
    pub fn new() -> Self {
        Self {
            handle: PendingHandle {
                tracker: TaskTracker::new(),
                cancel: CancellationToken::new(),
                answers: Arc::new(Mutex::new(Vec::new())),
                failure: Arc::new(OnceLock::new()),
            },
        }
    }

    pub fn handle(&self) -> PendingHandle {
        self.handle.clone()
    }

    pub fn spawn<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(work);
    }

    pub fn push(&self, record: DnsRecord) {
        self.handle.push(record);
    }

    /// Waits until every tracked task, nested ones included, has finished.
    ///
    /// When `deadline` passes first the remaining work is cancelled and the
    /// answers gathered so far are returned. A recorded failure wins over any
    /// partial answers.
    pub async fn finish(self, deadline: Duration) -> Result<Vec<DnsRecord>, DomainError> {
        let PendingHandle {
            tracker,
            cancel,
            answers,
            failure,
        } = self.handle;

        tracker.close();
        if tokio::time::timeout(deadline, tracker.wait()).await.is_err() {
            warn!(
                deadline_ms = deadline.as_millis() as u64,
                outstanding = tracker.len(),
                "Request deadline reached, answering with partial results"
            );
            cancel.cancel();
            tracker.wait().await;
        }

        if let Some(error) = failure.get() {
            return Err(error.clone());
        }

        let mut answers = answers.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(std::mem::take(&mut *answers))
    }
}

impl Default for PendingRequest {
    fn default() -> Self {
        Self::new()
    }
}

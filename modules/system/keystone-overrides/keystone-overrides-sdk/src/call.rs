//! Per-call cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;

/// Cancellation token and optional deadline supplied by the caller.
///
/// Store queries issued on behalf of a call are raced against both; the
/// first to fire aborts the query.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    #[must_use]
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Set an absolute deadline. An earlier existing deadline wins.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Set a deadline `timeout` from now. An earlier existing deadline wins.
    ///
    /// A timeout too large to represent as an instant leaves the context
    /// without that deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    #[must_use]
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the call is cancelled or its
    /// deadline passes first. The losing future is dropped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cancelled` or `StoreError::DeadlineExceeded`
    /// (converted into `E`) when the call is aborted, otherwise whatever
    /// `fut` returns.
    pub async fn run<T, E, F>(&self, fut: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<StoreError>,
    {
        // Already-cancelled calls never start the query.
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled.into());
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(StoreError::Cancelled.into()),
            () = deadline => Err(StoreError::DeadlineExceeded.into()),
            res = fut => res,
        }
    }
}

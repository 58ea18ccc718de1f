//! Waiting for asynchronous updates to leave the `enqueued` state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::{AsyncUpdateId, Client, ClientError, FetchErrorPolicy, Result, UpdateStatus};

/// Deadline and cancellation signal for a wait.
///
/// Clones share the cancellation flag, so a clone handed to another task
/// can stop the wait. The signal is checked before every poll; a request
/// already in flight is not interrupted.
#[derive(Debug, Clone, Default)]
pub struct WaitContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

enum Interrupt {
    Cancelled,
    DeadlineExceeded,
}

impl WaitContext {
    /// No deadline; only [`cancel`](Self::cancel) ends the wait early
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::default(),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn interrupted(&self) -> Option<Interrupt> {
        if self.is_cancelled() {
            Some(Interrupt::Cancelled)
        } else if self.is_expired() {
            Some(Interrupt::DeadlineExceeded)
        } else {
            None
        }
    }
}

impl Client {
    /// Polls the update every `interval` until its status is no longer
    /// `enqueued`, then returns that status.
    ///
    /// Returns [`ClientError::Cancelled`] or [`ClientError::DeadlineExceeded`]
    /// when `ctx` fires first. A failed status fetch is handled according to
    /// [`WaitConfig::on_fetch_error`](crate::WaitConfig::on_fetch_error);
    /// by default the wait stops with [`UpdateStatus::Unknown`].
    pub async fn wait_for_pending_update(
        &self,
        ctx: &WaitContext,
        interval: Duration,
        index_uid: &str,
        update: &AsyncUpdateId,
    ) -> Result<UpdateStatus> {
        let policy = self.config().wait.on_fetch_error;
        let updates = self.updates(index_uid);
        let mut failures = 0u32;
        let mut polls = 0u32;

        loop {
            if let Some(interrupt) = ctx.interrupted() {
                debug!(
                    index = %index_uid,
                    update_id = update.update_id,
                    polls,
                    "Stopped waiting for update"
                );
                let (index_uid, update_id) = (index_uid.to_string(), update.update_id);
                return Err(match interrupt {
                    Interrupt::Cancelled => ClientError::Cancelled { index_uid, update_id },
                    Interrupt::DeadlineExceeded => {
                        ClientError::DeadlineExceeded { index_uid, update_id }
                    }
                });
            }

            polls += 1;
            match updates.get(update.update_id).await {
                Ok(record) if record.status.is_terminal() => {
                    debug!(
                        index = %index_uid,
                        update_id = update.update_id,
                        status = %record.status,
                        polls,
                        "Update finished"
                    );
                    return Ok(record.status);
                }
                Ok(_) => {
                    failures = 0;
                    trace!(update_id = update.update_id, "Update still enqueued");
                }
                Err(err) => match policy {
                    FetchErrorPolicy::Unknown => {
                        debug!(error = %err, "Update status unavailable");
                        return Ok(UpdateStatus::Unknown);
                    }
                    FetchErrorPolicy::Propagate => return Err(err),
                    FetchErrorPolicy::Retry { attempts } => {
                        failures += 1;
                        if failures > attempts {
                            warn!(error = %err, failures, "Giving up on update status");
                            return Ok(UpdateStatus::Unknown);
                        }
                        warn!(error = %err, failures, "Update status fetch failed, retrying");
                    }
                },
            }

            tokio::time::sleep(interval).await;
        }
    }

    /// [`wait_for_pending_update`](Self::wait_for_pending_update) with the
    /// configured deadline and interval (5 s and 50 ms unless overridden).
    pub async fn default_wait_for_pending_update(
        &self,
        index_uid: &str,
        update: &AsyncUpdateId,
    ) -> Result<UpdateStatus> {
        let wait = &self.config().wait;
        let ctx = WaitContext::with_timeout(wait.timeout());
        self.wait_for_pending_update(&ctx, wait.interval(), index_uid, update)
            .await
    }
}

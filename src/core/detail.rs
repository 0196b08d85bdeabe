//! Detail screen projector.
//!
//! A single-record subscription keyed by an externally supplied id. The
//! projected state starts at `Loading`, then settles on `Found` or `NotFound`
//! and follows every subsequent mutation of that id - including a delete from
//! another screen, which pushes `NotFound`.

use crate::entities::job_application;
use crate::errors::Result;
use crate::store::JobStore;
use tokio::sync::watch;
use tracing::error;

/// Projected detail screen state.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JobDetailState {
    /// Subscription not yet resolved
    #[default]
    Loading,
    /// The record exists
    Found(job_application::Model),
    /// No record with the subscribed id
    NotFound,
}

/// Projector for the detail screen.
///
/// Dropping it cancels the underlying subscription.
pub struct JobDetailProjector {
    store: JobStore,
    job_id: i64,
    state: watch::Receiver<JobDetailState>,
}

impl JobDetailProjector {
    /// Creates the projector and starts its subscription to `job_id`.
    pub fn new(store: JobStore, job_id: i64) -> Self {
        let (state_tx, state_rx) = watch::channel(JobDetailState::Loading);

        let feed_store = store.clone();
        tokio::spawn(async move {
            let mut feed = match feed_store.watch_by_id(job_id).await {
                Ok(feed) => feed,
                Err(e) => {
                    // Surfaced once; the state stays Loading and nothing retries.
                    error!(error = %e, id = job_id, "detail subscription failed");
                    return;
                }
            };

            if state_tx.send(project(feed.snapshot())).is_err() {
                return;
            }
            loop {
                tokio::select! {
                    pushed = feed.updated() => {
                        match pushed {
                            Some(record) => {
                                if state_tx.send(project(record)).is_err() {
                                    return;
                                }
                            }
                            None => return,
                        }
                    }
                    _ = state_tx.closed() => return,
                }
            }
        });

        Self {
            store,
            job_id,
            state: state_rx,
        }
    }

    /// The id this projector is subscribed to.
    pub const fn job_id(&self) -> i64 {
        self.job_id
    }

    /// A receiver of the projected detail state for the presentation layer.
    pub fn state(&self) -> watch::Receiver<JobDetailState> {
        self.state.clone()
    }

    /// Deletes the subscribed record. The caller navigates back once the
    /// returned future completes successfully.
    pub async fn delete(&self) -> Result<()> {
        self.store.delete(self.job_id).await
    }
}

fn project(record: Option<job_application::Model>) -> JobDetailState {
    record.map_or(JobDetailState::NotFound, JobDetailState::Found)
}

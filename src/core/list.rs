//! List screen projector.
//!
//! Combines two user-controlled inputs - a free-text search query and an
//! optional status filter - into one live store query. Changing either input
//! drops the current subscription and establishes a new one with the combined
//! pair (latest value wins on each side). Every pushed snapshot is projected
//! into [`JobListState`] for the presentation layer.

use crate::entities::{JobStatus, job_application};
use crate::errors::Result;
use crate::store::{JobApplicationInput, JobStore};
use tokio::sync::watch;
use tracing::{debug, error};

/// Immutable list screen state.
#[derive(Clone, Debug, PartialEq)]
pub struct JobListState {
    /// True only before the first result ever arrives
    pub is_loading: bool,
    /// Matching records, newest `date_saved` first
    pub records: Vec<job_application::Model>,
    /// The search query these records were filtered with
    pub search_query: String,
    /// The status filter these records were filtered with
    pub status_filter: Option<JobStatus>,
}

impl Default for JobListState {
    fn default() -> Self {
        Self {
            is_loading: true,
            records: Vec::new(),
            search_query: String::new(),
            status_filter: None,
        }
    }
}

/// The (query, status) pair driving the active subscription.
type FilterParams = (String, Option<JobStatus>);

/// Projector for the list screen.
///
/// Holds the store handle it was constructed with and a background driver
/// task that owns the active `watch_filtered` subscription. Dropping the
/// projector stops the driver and its subscription.
pub struct JobListProjector {
    store: JobStore,
    params: watch::Sender<FilterParams>,
    state: watch::Receiver<JobListState>,
}

impl JobListProjector {
    /// Creates the projector and starts its driver with an empty query and no
    /// status filter.
    pub fn new(store: JobStore) -> Self {
        let (params_tx, params_rx) = watch::channel((String::new(), None));
        let (state_tx, state_rx) = watch::channel(JobListState::default());

        tokio::spawn(drive(store.clone(), params_rx, state_tx));

        Self {
            store,
            params: params_tx,
            state: state_rx,
        }
    }

    /// A receiver of the projected list state for the presentation layer.
    pub fn state(&self) -> watch::Receiver<JobListState> {
        self.state.clone()
    }

    /// Replaces the search query; the active subscription is re-established.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.params.send_modify(|params| params.0 = query);
    }

    /// Replaces the status filter; the active subscription is re-established.
    pub fn set_status_filter(&self, status: Option<JobStatus>) {
        self.params.send_modify(|params| params.1 = status);
    }

    /// Deletes the record with the given id; no-op if absent.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await
    }

    /// Quick-advance gesture: moves the record one step along the fixed
    /// forward chain Saved → Applied → Interviewing → Accepted. Records in a
    /// terminal status, and unknown ids, are no-ops that mutate nothing.
    pub async fn advance_status(&self, id: i64) -> Result<()> {
        let Some(record) = self.store.get_by_id(id).await? else {
            debug!(id, "advance_status on missing id, nothing to do");
            return Ok(());
        };

        let next = record.status.advance();
        if next == record.status {
            return Ok(());
        }

        let mut input = JobApplicationInput::from(record);
        input.status = next;
        self.store.update(id, input).await
    }
}

/// Driver loop: owns the active subscription and republishes its pushes.
///
/// Exits when the projector is dropped (parameter sender or state receiver
/// gone) or when the store itself goes away.
async fn drive(
    store: JobStore,
    mut params: watch::Receiver<FilterParams>,
    state: watch::Sender<JobListState>,
) {
    'resubscribe: loop {
        let (query, status) = params.borrow_and_update().clone();

        let mut feed = match store.watch_filtered(query.clone(), status).await {
            Ok(feed) => feed,
            Err(e) => {
                error!(error = %e, "list subscription failed");
                // Hold the last published state until the parameters change
                if params.changed().await.is_err() {
                    return;
                }
                continue 'resubscribe;
            }
        };

        let project = |records: Vec<job_application::Model>| JobListState {
            is_loading: false,
            records,
            search_query: query.clone(),
            status_filter: status,
        };

        if state.send(project(feed.snapshot())).is_err() {
            return;
        }

        loop {
            tokio::select! {
                changed = params.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    continue 'resubscribe;
                }
                pushed = feed.updated() => {
                    match pushed {
                        Some(records) => {
                            if state.send(project(records)).is_err() {
                                return;
                            }
                        }
                        // Store dropped; no further pushes will come.
                        None => return,
                    }
                }
            }
        }
    }
}

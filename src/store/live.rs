//! Live query plumbing.
//!
//! A [`LiveQuery`] is a long-lived subscription to one store query: it holds
//! the latest full result snapshot and receives a fresh snapshot after every
//! committed mutation. There are no incremental diffs; each push replaces the
//! whole snapshot. Subscriptions are independent of each other - dropping one
//! only stops its own background refresh task.

use std::future::Future;

use sea_orm::DatabaseConnection;
use tokio::sync::watch;
use tracing::warn;

use crate::errors::Result;

/// A live, push-updated view of one query's result.
///
/// The initial snapshot is computed before the `LiveQuery` is handed out, so
/// [`snapshot`](Self::snapshot) is always meaningful. Await
/// [`updated`](Self::updated) to receive the next snapshot pushed after a
/// mutation.
#[derive(Debug)]
pub struct LiveQuery<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> LiveQuery<T> {
    /// Returns the latest snapshot without consuming pending pushes.
    pub fn snapshot(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Waits for the next pushed snapshot and returns it.
    ///
    /// Returns `None` once the feed is closed, which happens only when the
    /// owning store (every clone of it) has been dropped.
    pub async fn updated(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Spawns the refresh task backing one [`LiveQuery`].
///
/// `changes` carries the store's revision counter; every committed mutation
/// bumps it. On each bump the query is re-run against `db` and the new full
/// snapshot is pushed. A refresh failure keeps the previous snapshot - errors
/// never cross subscriptions. The task exits when the `LiveQuery` is dropped
/// or when the store itself goes away.
pub(crate) fn spawn_live<T, F, Fut>(
    initial: T,
    db: DatabaseConnection,
    mut changes: watch::Receiver<u64>,
    query: F,
) -> LiveQuery<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = changes.changed() => {
                    // The revision sender is gone: every store handle dropped.
                    if changed.is_err() {
                        break;
                    }
                    match query(db.clone()).await {
                        Ok(snapshot) => {
                            if tx.send(snapshot).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "live query refresh failed, keeping previous snapshot");
                        }
                    }
                }
                _ = tx.closed() => break,
            }
        }
    });

    LiveQuery { rx }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::errors::Result;
    use crate::test_utils::{create_test_job, setup_test_store, test_input};

    #[tokio::test]
    async fn watch_all_pushes_a_snapshot_after_insert() -> Result<()> {
        let store = setup_test_store().await?;
        let mut feed = store.watch_all().await?;
        assert!(feed.snapshot().is_empty());

        let inserted = create_test_job(&store, "Acme").await?;

        let records = feed.updated().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], inserted);
        Ok(())
    }

    #[tokio::test]
    async fn watch_by_id_sees_update_then_delete() -> Result<()> {
        let store = setup_test_store().await?;
        let inserted = create_test_job(&store, "Acme").await?;

        let mut feed = store.watch_by_id(inserted.id).await?;
        assert_eq!(feed.snapshot().unwrap().company_name, "Acme");

        let mut input = test_input("Acme Corp", "Engineer");
        input.notes = "renamed".to_string();
        store.update(inserted.id, input).await?;
        let pushed = feed.updated().await.unwrap();
        assert_eq!(pushed.unwrap().company_name, "Acme Corp");

        store.delete(inserted.id).await?;
        let pushed = feed.updated().await.unwrap();
        assert!(pushed.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn watch_by_id_on_missing_id_starts_as_none() -> Result<()> {
        let store = setup_test_store().await?;
        let feed = store.watch_by_id(9999).await?;
        assert!(feed.snapshot().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn dropping_one_feed_leaves_others_running() -> Result<()> {
        let store = setup_test_store().await?;
        let first = store.watch_all().await?;
        let mut second = store.watch_filtered("", None).await?;

        drop(first);

        create_test_job(&store, "Acme").await?;
        let records = second.updated().await.unwrap();
        assert_eq!(records.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn filtered_feed_reevaluates_its_predicate_on_mutation() -> Result<()> {
        let store = setup_test_store().await?;
        let mut feed = store.watch_filtered("Acme", None).await?;
        assert!(feed.snapshot().is_empty());

        create_test_job(&store, "Globex").await?;
        let records = feed.updated().await.unwrap();
        assert!(records.is_empty(), "non-matching insert pushes an unchanged set");

        create_test_job(&store, "Acme").await?;
        let records = feed.updated().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_name, "Acme");
        Ok(())
    }
}

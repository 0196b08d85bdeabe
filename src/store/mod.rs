//! The record store - single-table CRUD plus live queries.
//!
//! [`JobStore`] exclusively owns record lifetime: ids are assigned by the
//! database at insert, `date_saved` is stamped once at insert and never
//! changes, and `last_updated` is stamped on every mutation. All access goes
//! through one serialized `SQLite` connection, so reads always observe a
//! consistent row. After each committed mutation the store bumps a revision
//! counter that drives every live query's refresh.

mod live;

pub use live::LiveQuery;

use crate::entities::{JobStatus, job_application};
use crate::errors::Result;
use sea_orm::prelude::DateTimeUtc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Write-boundary input for insert and update: every record field except the
/// id and the store-stamped timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct JobApplicationInput {
    /// Company applied to; required non-blank (enforced by the edit projector)
    pub company_name: String,
    /// Role applied for; required non-blank
    pub job_role: String,
    /// Position location; required non-blank
    pub location: String,
    /// Optional link to the job posting
    pub job_posting_url: Option<String>,
    /// Free-form notes
    pub notes: String,
    /// When the application was submitted, if it was
    pub date_applied: Option<DateTimeUtc>,
    /// Free-form salary range
    pub salary_range: Option<String>,
    /// Pipeline status
    pub status: JobStatus,
}

impl From<job_application::Model> for JobApplicationInput {
    fn from(record: job_application::Model) -> Self {
        Self {
            company_name: record.company_name,
            job_role: record.job_role,
            location: record.location,
            job_posting_url: record.job_posting_url,
            notes: record.notes,
            date_applied: record.date_applied,
            salary_range: record.salary_range,
            status: record.status,
        }
    }
}

/// Handle to the job application table.
///
/// Cheap to clone; clones share the same connection and revision counter.
/// Pass a clone into each projector at construction rather than holding a
/// global instance.
#[derive(Clone)]
pub struct JobStore {
    db: DatabaseConnection,
    revision: watch::Sender<u64>,
}

impl JobStore {
    /// Wraps an already-connected database. The schema must be initialized
    /// (see [`crate::config::database::init_schema`]).
    pub fn new(db: DatabaseConnection) -> Self {
        let (revision, _) = watch::channel(0);
        Self { db, revision }
    }

    /// Connects to `database_url`, initializes the schema (wiping on version
    /// mismatch), and returns a ready store.
    pub async fn open(database_url: &str) -> Result<Self> {
        let db = crate::config::database::create_connection(database_url).await?;
        crate::config::database::init_schema(&db).await?;
        Ok(Self::new(db))
    }

    /// The underlying connection.
    ///
    /// Mutations issued directly through it bypass the revision counter and
    /// are not pushed to live queries; use the store methods for writes.
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Signals every live query that the table changed.
    fn mark_dirty(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Inserts a new record. The id is assigned by the database; `date_saved`
    /// and `last_updated` are stamped with the current time.
    #[instrument(skip(self, input), fields(company = %input.company_name))]
    pub async fn insert(
        &self,
        input: JobApplicationInput,
    ) -> Result<job_application::Model> {
        let now = chrono::Utc::now();
        let record = job_application::ActiveModel {
            company_name: Set(input.company_name),
            job_role: Set(input.job_role),
            location: Set(input.location),
            job_posting_url: Set(input.job_posting_url),
            notes: Set(input.notes),
            date_applied: Set(input.date_applied),
            salary_range: Set(input.salary_range),
            status: Set(input.status),
            date_saved: Set(now),
            last_updated: Set(now),
            ..Default::default()
        };

        let model = record.insert(&self.db).await?;
        debug!(id = model.id, "inserted job application");
        self.mark_dirty();
        Ok(model)
    }

    /// Replaces the mutable columns of the record with the given id and
    /// stamps `last_updated`. `date_saved` is never touched.
    ///
    /// An unknown id is a silent no-op that succeeds. Questionable as a
    /// default, but it is the documented contract of this store.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: JobApplicationInput) -> Result<()> {
        let changes = job_application::ActiveModel {
            company_name: Set(input.company_name),
            job_role: Set(input.job_role),
            location: Set(input.location),
            job_posting_url: Set(input.job_posting_url),
            notes: Set(input.notes),
            date_applied: Set(input.date_applied),
            salary_range: Set(input.salary_range),
            status: Set(input.status),
            last_updated: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let result = job_application::Entity::update_many()
            .set(changes)
            .filter(job_application::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            self.mark_dirty();
        } else {
            debug!(id, "update on missing id, nothing changed");
        }
        Ok(())
    }

    /// Hard-deletes the record with the given id; no-op if absent.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = job_application::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            debug!(id, "deleted job application");
            self.mark_dirty();
        }
        Ok(())
    }

    /// Fetches one record by id; `None` when absent.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<job_application::Model>> {
        fetch_by_id(&self.db, id).await
    }

    /// Fetches all records, newest `date_saved` first.
    pub async fn get_all(&self) -> Result<Vec<job_application::Model>> {
        fetch_all(&self.db).await
    }

    /// Fetches the records matching the conjunction of an optional status
    /// equality and a case-sensitive substring match on company name or job
    /// role; newest `date_saved` first. An empty `text` matches everything.
    pub async fn get_filtered(
        &self,
        text: &str,
        status: Option<JobStatus>,
    ) -> Result<Vec<job_application::Model>> {
        fetch_filtered(&self.db, text, status).await
    }

    /// Live feed of one record by id. Emits `None` immediately when absent,
    /// then re-emits after every mutation affecting that id.
    pub async fn watch_by_id(
        &self,
        id: i64,
    ) -> Result<LiveQuery<Option<job_application::Model>>> {
        let changes = self.revision.subscribe();
        let initial = fetch_by_id(&self.db, id).await?;
        Ok(live::spawn_live(
            initial,
            self.db.clone(),
            changes,
            move |db| async move { fetch_by_id(&db, id).await },
        ))
    }

    /// Live feed of the full table, newest `date_saved` first.
    pub async fn watch_all(&self) -> Result<LiveQuery<Vec<job_application::Model>>> {
        let changes = self.revision.subscribe();
        let initial = fetch_all(&self.db).await?;
        Ok(live::spawn_live(
            initial,
            self.db.clone(),
            changes,
            move |db| async move { fetch_all(&db).await },
        ))
    }

    /// Live feed of [`get_filtered`](Self::get_filtered) with fixed
    /// parameters; re-evaluated after every store mutation.
    pub async fn watch_filtered(
        &self,
        text: impl Into<String>,
        status: Option<JobStatus>,
    ) -> Result<LiveQuery<Vec<job_application::Model>>> {
        let text = text.into();
        let changes = self.revision.subscribe();
        let initial = fetch_filtered(&self.db, &text, status).await?;
        Ok(live::spawn_live(
            initial,
            self.db.clone(),
            changes,
            move |db| {
                let text = text.clone();
                async move { fetch_filtered(&db, &text, status).await }
            },
        ))
    }
}

async fn fetch_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<job_application::Model>> {
    job_application::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn fetch_all(db: &DatabaseConnection) -> Result<Vec<job_application::Model>> {
    job_application::Entity::find()
        .order_by_desc(job_application::Column::DateSaved)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn fetch_filtered(
    db: &DatabaseConnection,
    text: &str,
    status: Option<JobStatus>,
) -> Result<Vec<job_application::Model>> {
    let mut query = job_application::Entity::find();
    if let Some(status) = status {
        query = query.filter(job_application::Column::Status.eq(status));
    }
    let mut records = query
        .order_by_desc(job_application::Column::DateSaved)
        .all(db)
        .await?;

    // SQLite's LIKE is case-insensitive for ASCII; the contract here is a
    // case-sensitive substring match, so the text predicate runs in Rust.
    if !text.is_empty() {
        records.retain(|record| {
            record.company_name.contains(text) || record.job_role.contains(text)
        });
    }
    Ok(records)
}

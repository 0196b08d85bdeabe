//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`'s
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the entity definitions without hand-written SQL. There is deliberately no
//! migration story: when [`SCHEMA_VERSION`] changes, the table is dropped and
//! recreated, wiping all data. The version is tracked in `SQLite`'s
//! `user_version` pragma.

use crate::entities::JobApplication;
use crate::errors::Result;
use sea_orm::sea_query::Table;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, Statement};
use tracing::{info, warn};

/// Current schema version, kept in the `user_version` pragma. Bump on any
/// entity change; existing data is wiped on mismatch.
pub const SCHEMA_VERSION: i32 = 1;

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Reads the schema version recorded in the `user_version` pragma.
async fn stored_schema_version(db: &DatabaseConnection) -> Result<i32> {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(backend, "PRAGMA user_version"))
        .await?;
    match row {
        Some(row) => Ok(row.try_get_by_index::<i32>(0)?),
        None => Ok(0),
    }
}

/// Initializes the `job_applications` table.
///
/// If the stored schema version does not match [`SCHEMA_VERSION`], the table
/// is dropped first and all data is lost - the destructive wipe-and-recreate
/// contract this crate inherits from its data model.
pub async fn init_schema(db: &DatabaseConnection) -> Result<()> {
    let backend = db.get_database_backend();

    let stored = stored_schema_version(db).await?;
    if stored != SCHEMA_VERSION {
        if stored != 0 {
            warn!(
                stored,
                current = SCHEMA_VERSION,
                "schema version changed, wiping job_applications table"
            );
        }
        let mut drop_table = Table::drop();
        drop_table.table(JobApplication).if_exists();
        db.execute(backend.build(&drop_table)).await?;
    }

    let schema = Schema::new(backend);
    let mut create_table = schema.create_table_from_entity(JobApplication);
    create_table.if_not_exists();
    db.execute(backend.build(&create_table)).await?;

    db.execute(Statement::from_string(
        backend,
        format!("PRAGMA user_version = {SCHEMA_VERSION}"),
    ))
    .await?;

    info!(version = SCHEMA_VERSION, "database schema initialized");
    Ok(())
}

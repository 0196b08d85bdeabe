//! Shared test utilities for `jobtrack-core`.
//!
//! This module provides common helper functions for setting up test stores
//! and creating test records with sensible defaults.

use crate::{
    config,
    entities::{JobStatus, job_application},
    errors::Result,
    store::{JobApplicationInput, JobStore},
};
use sea_orm::{ActiveModelTrait, Set};

/// Creates a store backed by an in-memory `SQLite` database with the schema
/// initialized. This is the standard setup for all integration tests.
pub async fn setup_test_store() -> Result<JobStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::init_schema(&db).await?;
    Ok(JobStore::new(db))
}

/// Builds a write-boundary input with sensible defaults.
///
/// # Defaults
/// * `location`: "Remote"
/// * `status`: Saved
/// * everything optional: empty/None
pub fn test_input(company: &str, role: &str) -> JobApplicationInput {
    JobApplicationInput {
        company_name: company.to_string(),
        job_role: role.to_string(),
        location: "Remote".to_string(),
        job_posting_url: None,
        notes: String::new(),
        date_applied: None,
        salary_range: None,
        status: JobStatus::Saved,
    }
}

/// Builds a write-boundary input with custom location and status.
/// Use this when a test needs specific filter targets.
pub fn custom_input(
    company: &str,
    role: &str,
    location: &str,
    status: JobStatus,
) -> JobApplicationInput {
    JobApplicationInput {
        location: location.to_string(),
        status,
        ..test_input(company, role)
    }
}

/// Inserts a test record with default fields and the given company name.
pub async fn create_test_job(store: &JobStore, company: &str) -> Result<job_application::Model> {
    store.insert(test_input(company, "Engineer")).await
}

/// Rewrites a record's `date_saved` to `days` days in the past, directly
/// through the connection. Ordering tests need records that differ in
/// `date_saved`, which the store itself never allows after insert. Bypasses
/// the revision counter, so live feeds do not see this write.
pub async fn backdate_date_saved(
    store: &JobStore,
    record: job_application::Model,
    days: i64,
) -> Result<job_application::Model> {
    let mut active: job_application::ActiveModel = record.into();
    active.date_saved = Set(chrono::Utc::now() - chrono::Duration::days(days));
    let updated = active.update(store.connection()).await?;
    Ok(updated)
}

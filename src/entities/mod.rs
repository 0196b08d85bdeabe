//! Entity module - Contains all SeaORM entity definitions for the database.
//! The job application is the sole persisted entity; the store exclusively
//! owns record lifetime and every other component holds read-only snapshots.

pub mod job_application;

// Re-export specific types to avoid conflicts
pub use job_application::{
    Column as JobApplicationColumn, Entity as JobApplication, JobStatus,
    Model as JobApplicationModel,
};

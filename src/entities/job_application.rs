//! Job application entity - Represents one tracked application.
//!
//! Each record carries the company, role, and location it was saved for,
//! optional posting/salary details, free-form notes, a status, and the two
//! lifecycle timestamps: `date_saved` (stamped once at insert) and
//! `last_updated` (stamped on every mutation).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job application database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_applications")]
pub struct Model {
    /// Unique identifier for the application, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company applied to (e.g., "Acme")
    pub company_name: String,
    /// Role applied for (e.g., "Engineer")
    pub job_role: String,
    /// Where the position is located
    pub location: String,
    /// Optional link to the job posting
    pub job_posting_url: Option<String>,
    /// Free-form notes, capped at 1000 characters at the input boundary
    pub notes: String,
    /// When the application was actually submitted, if it was
    pub date_applied: Option<DateTimeUtc>,
    /// Free-form salary range string (e.g., "120k-140k")
    pub salary_range: Option<String>,
    /// Current position in the application pipeline
    pub status: JobStatus,
    /// When the record was created; immutable after insert
    pub date_saved: DateTimeUtc,
    /// When the record was last mutated, including status-only changes
    pub last_updated: DateTimeUtc,
}

/// Application pipeline status, stored as its name string.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum JobStatus {
    /// Saved for later, not yet applied
    #[default]
    #[sea_orm(string_value = "SAVED")]
    Saved,
    /// Application submitted
    #[sea_orm(string_value = "APPLIED")]
    Applied,
    /// In the interview process
    #[sea_orm(string_value = "INTERVIEWING")]
    Interviewing,
    /// Offer accepted
    #[sea_orm(string_value = "ACCEPTED")]
    Accepted,
    /// Application rejected
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    /// No response from the company
    #[sea_orm(string_value = "NO_REPLY")]
    NoReply,
}

impl JobStatus {
    /// Returns the next status in the fixed forward chain
    /// Saved → Applied → Interviewing → Accepted.
    ///
    /// Accepted, Rejected, and NoReply are fixed points: the quick-advance
    /// gesture has no further step from them, so they return themselves.
    /// Total over the enum, no error case.
    #[must_use]
    pub const fn advance(self) -> Self {
        match self {
            Self::Saved => Self::Applied,
            Self::Applied => Self::Interviewing,
            Self::Interviewing => Self::Accepted,
            Self::Accepted | Self::Rejected | Self::NoReply => self,
        }
    }
}

/// The job application table has no relationships; it is the sole entity.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_the_forward_chain() {
        let mut status = JobStatus::Saved;
        status = status.advance();
        assert_eq!(status, JobStatus::Applied);
        status = status.advance();
        assert_eq!(status, JobStatus::Interviewing);
        status = status.advance();
        assert_eq!(status, JobStatus::Accepted);
    }

    #[test]
    fn advance_is_idempotent_on_terminal_statuses() {
        assert_eq!(JobStatus::Accepted.advance(), JobStatus::Accepted);
        assert_eq!(JobStatus::Rejected.advance(), JobStatus::Rejected);
        assert_eq!(JobStatus::NoReply.advance(), JobStatus::NoReply);
    }

    #[test]
    fn default_status_is_saved() {
        assert_eq!(JobStatus::default(), JobStatus::Saved);
    }
}

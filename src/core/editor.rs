//! Add/edit screen projector.
//!
//! Field edits are buffered locally in a [`JobDraft`] and only written
//! through on an explicit save. Saving validates the required fields and
//! either inserts a new record or updates the existing one, preserving its id
//! and `date_saved`. A validation rejection mutates nothing; its message is
//! meant for direct display to the user.

use crate::entities::{JobStatus, job_application};
use crate::errors::{Error, Result};
use crate::store::{JobApplicationInput, JobStore};
use sea_orm::prelude::DateTimeUtc;

/// Maximum length of the notes field, in characters.
pub const MAX_NOTES_CHARS: usize = 1000;

const REQUIRED_FIELDS_MESSAGE: &str = "Company Name, Job Role and Location are required.";
const NOTES_TOO_LONG_MESSAGE: &str = "Notes must be 1000 characters or fewer.";

/// Locally buffered form state. Optional record fields are buffered as plain
/// strings the way a form edits them; empty ones become `None` on save.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobDraft {
    /// Company applied to; required
    pub company_name: String,
    /// Role applied for; required
    pub job_role: String,
    /// Position location; required
    pub location: String,
    /// Link to the job posting
    pub job_posting_url: String,
    /// Free-form notes; set through [`JobEditor::set_notes`]
    pub notes: String,
    /// When the application was submitted, if it was
    pub date_applied: Option<DateTimeUtc>,
    /// Free-form salary range
    pub salary_range: String,
    /// Pipeline status
    pub status: JobStatus,
}

impl JobDraft {
    fn from_record(record: &job_application::Model) -> Self {
        Self {
            company_name: record.company_name.clone(),
            job_role: record.job_role.clone(),
            location: record.location.clone(),
            job_posting_url: record.job_posting_url.clone().unwrap_or_default(),
            notes: record.notes.clone(),
            date_applied: record.date_applied,
            salary_range: record.salary_range.clone().unwrap_or_default(),
            status: record.status,
        }
    }

    fn to_input(&self) -> JobApplicationInput {
        JobApplicationInput {
            company_name: self.company_name.clone(),
            job_role: self.job_role.clone(),
            location: self.location.clone(),
            job_posting_url: non_blank(&self.job_posting_url),
            notes: self.notes.clone(),
            date_applied: self.date_applied,
            salary_range: non_blank(&self.salary_range),
            status: self.status,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Projector for the add/edit screen.
///
/// Created either blank for a new record or loaded from an existing one. The
/// caller navigates back once [`save`](Self::save) or
/// [`delete`](Self::delete) completes successfully.
pub struct JobEditor {
    store: JobStore,
    job_id: Option<i64>,
    /// The buffered form state; fields other than notes are edited directly
    pub draft: JobDraft,
}

impl JobEditor {
    /// Blank editor for a record that does not exist yet.
    pub fn new(store: JobStore) -> Self {
        Self {
            store,
            job_id: None,
            draft: JobDraft::default(),
        }
    }

    /// Editor preloaded from the record with the given id, or `None` when no
    /// such record exists.
    pub async fn for_record(store: JobStore, id: i64) -> Result<Option<Self>> {
        let Some(record) = store.get_by_id(id).await? else {
            return Ok(None);
        };
        Ok(Some(Self {
            store,
            job_id: Some(id),
            draft: JobDraft::from_record(&record),
        }))
    }

    /// Whether this editor targets an existing record.
    pub const fn is_editing(&self) -> bool {
        self.job_id.is_some()
    }

    /// Replaces the notes, enforcing the length cap at the input boundary.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        let notes = notes.into();
        if notes.chars().count() > MAX_NOTES_CHARS {
            return Err(Error::validation(NOTES_TOO_LONG_MESSAGE));
        }
        self.draft.notes = notes;
        Ok(())
    }

    /// Validates the draft and writes it through: insert for a new record,
    /// update (id and `date_saved` preserved) for an existing one.
    ///
    /// # Errors
    /// [`Error::Validation`] with a user-facing message when a required field
    /// is blank or the notes exceed the cap; nothing is mutated in that case.
    pub async fn save(&self) -> Result<()> {
        if self.draft.company_name.trim().is_empty()
            || self.draft.job_role.trim().is_empty()
            || self.draft.location.trim().is_empty()
        {
            return Err(Error::validation(REQUIRED_FIELDS_MESSAGE));
        }
        if self.draft.notes.chars().count() > MAX_NOTES_CHARS {
            return Err(Error::validation(NOTES_TOO_LONG_MESSAGE));
        }

        let input = self.draft.to_input();
        match self.job_id {
            Some(id) => self.store.update(id, input).await,
            None => self.store.insert(input).await.map(|_| ()),
        }
    }

    /// Deletes the record being edited; no-op for an unsaved new record.
    pub async fn delete(&self) -> Result<()> {
        match self.job_id {
            Some(id) => self.store.delete(id).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_job, setup_test_store};

    #[tokio::test]
    async fn save_rejects_blank_required_fields_and_mutates_nothing() -> Result<()> {
        let store = setup_test_store().await?;
        let mut editor = JobEditor::new(store.clone());
        editor.draft.company_name = "Acme".to_string();
        editor.draft.job_role = "   ".to_string();
        editor.draft.location = "Remote".to_string();

        let result = editor.save().await;
        match result {
            Err(Error::Validation { message }) => {
                assert_eq!(message, REQUIRED_FIELDS_MESSAGE);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn set_notes_enforces_the_character_cap() -> Result<()> {
        let store = setup_test_store().await?;
        let mut editor = JobEditor::new(store);

        let at_cap = "x".repeat(MAX_NOTES_CHARS);
        editor.set_notes(at_cap.clone())?;
        assert_eq!(editor.draft.notes, at_cap);

        let over_cap = "x".repeat(MAX_NOTES_CHARS + 1);
        assert!(matches!(
            editor.set_notes(over_cap),
            Err(Error::Validation { .. })
        ));
        assert_eq!(editor.draft.notes, at_cap, "rejected input must not stick");
        Ok(())
    }

    #[tokio::test]
    async fn saving_a_new_draft_inserts_with_stamped_dates() -> Result<()> {
        let store = setup_test_store().await?;
        let mut editor = JobEditor::new(store.clone());
        assert!(!editor.is_editing());
        editor.draft.company_name = "Acme".to_string();
        editor.draft.job_role = "Engineer".to_string();
        editor.draft.location = "Berlin".to_string();
        editor.draft.salary_range = "  ".to_string();
        editor.draft.status = JobStatus::Applied;
        editor.set_notes("applied via referral")?;

        editor.save().await?;

        let all = store.get_all().await?;
        assert_eq!(all.len(), 1);
        let record = &all[0];
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.status, JobStatus::Applied);
        assert_eq!(record.date_saved, record.last_updated);
        assert_eq!(record.salary_range, None, "blank input becomes None");
        assert_eq!(record.job_posting_url, None);
        Ok(())
    }

    #[tokio::test]
    async fn saving_an_existing_record_preserves_id_and_date_saved() -> Result<()> {
        let store = setup_test_store().await?;
        let inserted = create_test_job(&store, "Acme").await?;

        let mut editor = JobEditor::for_record(store.clone(), inserted.id)
            .await?
            .unwrap();
        assert!(editor.is_editing());
        assert_eq!(editor.draft.company_name, "Acme");

        editor.draft.company_name = "Acme Corp".to_string();
        editor.draft.status = JobStatus::Interviewing;
        editor.save().await?;

        let updated = store.get_by_id(inserted.id).await?.unwrap();
        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.date_saved, inserted.date_saved);
        assert_eq!(updated.company_name, "Acme Corp");
        assert_eq!(updated.status, JobStatus::Interviewing);
        assert!(updated.last_updated >= inserted.last_updated);
        Ok(())
    }

    #[tokio::test]
    async fn for_record_on_a_missing_id_returns_none() -> Result<()> {
        let store = setup_test_store().await?;
        assert!(JobEditor::for_record(store, 77).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_edited_record() -> Result<()> {
        let store = setup_test_store().await?;
        let inserted = create_test_job(&store, "Acme").await?;

        let editor = JobEditor::for_record(store.clone(), inserted.id)
            .await?
            .unwrap();
        editor.delete().await?;

        assert!(store.get_by_id(inserted.id).await?.is_none());

        // Deleting from a blank editor is a no-op
        JobEditor::new(store).delete().await?;
        Ok(())
    }
}

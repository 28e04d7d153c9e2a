// src/client/application.rs
//! Job application and local feedback forms

use anyhow::Result;

use crate::app_log;
use crate::client::notice::Notice;
use crate::client::profile::record_application;
use crate::client::store::KeyValueStore;
use crate::types::{Job, ValidationError};

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub resume: Option<String>,
    pub cover_letter: String,
}

impl ApplicationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.resume {
            Some(resume) if !resume.is_empty() && !self.cover_letter.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::IncompleteApplication),
        }
    }

    /// Validate, then count the application against the stored profile.
    pub async fn submit<S: KeyValueStore + ?Sized>(&self, job: &Job, store: &S) -> Result<Notice> {
        self.validate()?;

        match record_application(store).await? {
            Some(total) => app_log!(info, "Applied to {} ({} applications)", job.id, total),
            None => app_log!(info, "Applied to {} as guest", job.id),
        }
        Ok(Notice::ApplicationSubmitted)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub text: String,
    pub rating: u8,
}

impl FeedbackForm {
    /// Accept the feedback and reset the form.
    pub fn submit(&mut self) -> Result<Notice, ValidationError> {
        if self.text.trim().is_empty() || self.rating == 0 || self.rating > MAX_RATING {
            return Err(ValidationError::IncompleteFeedback);
        }
        app_log!(info, "Feedback submitted with rating {}", self.rating);
        *self = Self::default();
        Ok(Notice::FeedbackSubmitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::{load_json, store_json, MemoryStore, USER_KEY};
    use crate::types::UserProfile;

    #[tokio::test]
    async fn test_application_requires_resume_and_letter() {
        let store = MemoryStore::new();
        let job = Job::new("1", "Engineer", "Acme");

        let missing_resume = ApplicationForm {
            resume: None,
            cover_letter: "Hello".to_string(),
        };
        let err = missing_resume.submit(&job, &store).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::IncompleteApplication)
        );

        let missing_letter = ApplicationForm {
            resume: Some("file:///cv.pdf".to_string()),
            cover_letter: "   ".to_string(),
        };
        assert!(missing_letter.validate().is_err());
    }

    #[tokio::test]
    async fn test_application_increments_counter() {
        let store = MemoryStore::new();
        store_json(&store, USER_KEY, &UserProfile::for_email("a@b.c"))
            .await
            .unwrap();
        let form = ApplicationForm {
            resume: Some("file:///cv.pdf".to_string()),
            cover_letter: "Dear Acme".to_string(),
        };

        let notice = form.submit(&Job::new("1", "Engineer", "Acme"), &store).await.unwrap();
        assert_eq!(notice, Notice::ApplicationSubmitted);

        let profile: UserProfile = load_json(&store, USER_KEY).await.unwrap();
        assert_eq!(profile.applications, 1);
    }

    #[test]
    fn test_feedback_requires_text_and_rating() {
        let mut form = FeedbackForm {
            text: "Great app".to_string(),
            rating: 0,
        };
        assert_eq!(form.submit(), Err(ValidationError::IncompleteFeedback));

        form.rating = 6;
        assert_eq!(form.submit(), Err(ValidationError::IncompleteFeedback));

        form.rating = 4;
        assert_eq!(form.submit(), Ok(Notice::FeedbackSubmitted));
        assert!(form.text.is_empty());
        assert_eq!(form.rating, 0);
    }
}

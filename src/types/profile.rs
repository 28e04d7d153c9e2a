// src/types/profile.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::name_from_email;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub bio: String,
    pub profile_photo: Option<String>,
    pub cover_photo: Option<String>,
    pub skills: Vec<String>,
    pub experience: String,
    pub portfolio: Vec<String>,
    pub applications: u32,
}

impl UserProfile {
    /// Fresh profile created at login or signup.
    pub fn for_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name_from_email(email),
            ..Self::default()
        }
    }

    /// True when none of the editable fields carry content.
    pub fn has_editable_content(&self) -> bool {
        !self.bio.is_empty()
            || self.profile_photo.is_some()
            || self.cover_photo.is_some()
            || !self.skills.is_empty()
            || !self.experience.is_empty()
            || !self.portfolio.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoKind {
    Profile,
    Cover,
}

/// One feedback entry attached to a backend account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub text: String,
    pub date: DateTime<Utc>,
}

/// Account document returned by the backend, without credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub username: String,
    pub favorites: Vec<String>,
    pub feedback: Vec<FeedbackEntry>,
    pub profile_photo: Option<String>,
    pub cover_photo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial account update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Vec<FeedbackEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
}

impl AccountUpdate {
    pub fn favorites(favorites: Vec<String>) -> Self {
        Self {
            favorites: Some(favorites),
            ..Self::default()
        }
    }

    pub fn feedback(feedback: Vec<FeedbackEntry>) -> Self {
        Self {
            feedback: Some(feedback),
            ..Self::default()
        }
    }
}

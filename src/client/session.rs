// src/client/session.rs
//! Local login/signup, onboarding flag and theme preference

use anyhow::Result;
use std::sync::Arc;

use crate::app_log;
use crate::client::notice::Notice;
use crate::client::store::{
    load_json, store_json, KeyValueStore, DARK_MODE_KEY, ONBOARDING_KEY, USER_KEY,
};
use crate::client::theme::Theme;
use crate::types::{UserProfile, ValidationError};

pub struct Session<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Session<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Sign in with a fresh profile for `email`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Notice> {
        self.start_session(email, password).await?;
        Ok(Notice::LoginSuccessful)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<Notice> {
        self.start_session(email, password).await?;
        Ok(Notice::SignupSuccessful)
    }

    async fn start_session(&self, email: &str, password: &str) -> Result<UserProfile> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let profile = UserProfile::for_email(email);
        store_json(self.store.as_ref(), USER_KEY, &profile).await?;
        app_log!(info, "Session started for {}", email);
        Ok(profile)
    }

    /// Simulated password reset.
    pub fn forgot_password(&self, email: &str) -> Result<Notice, ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(Notice::PasswordResetSent)
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        load_json(self.store.as_ref(), USER_KEY).await
    }

    /// Drop every stored key.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        app_log!(info, "Session cleared");
        Ok(())
    }

    pub async fn onboarding_completed(&self) -> bool {
        load_json(self.store.as_ref(), ONBOARDING_KEY)
            .await
            .unwrap_or(false)
    }

    pub async fn complete_onboarding(&self) -> Result<()> {
        store_json(self.store.as_ref(), ONBOARDING_KEY, &true).await
    }

    pub async fn is_dark_mode(&self) -> bool {
        load_json(self.store.as_ref(), DARK_MODE_KEY)
            .await
            .unwrap_or(false)
    }

    /// Flip the theme. The new theme applies for this session even when the
    /// preference cannot be written.
    pub async fn toggle_dark_mode(&self) -> Theme {
        let dark = !self.is_dark_mode().await;
        if let Err(e) = store_json(self.store.as_ref(), DARK_MODE_KEY, &dark).await {
            app_log!(error, "Error saving dark mode: {:#}", e);
        }
        Theme::for_mode(dark)
    }
}

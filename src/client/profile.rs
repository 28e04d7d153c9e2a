// src/client/profile.rs
//! Profile screen state persisted as one blob under `user`

use anyhow::Result;
use std::sync::Arc;

use crate::app_log;
use crate::client::store::{
    load_json, store_json, KeyValueStore, COVER_PHOTO_KEY, PROFILE_PHOTO_KEY, USER_KEY,
};
use crate::types::{PhotoKind, UserProfile, ValidationError};

impl PhotoKind {
    pub fn store_key(&self) -> &'static str {
        match self {
            PhotoKind::Profile => PROFILE_PHOTO_KEY,
            PhotoKind::Cover => COVER_PHOTO_KEY,
        }
    }
}

/// Editable copy of the stored profile. Mutations stay local until `save`.
pub struct ProfileEditor<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
    profile: UserProfile,
}

impl<S: KeyValueStore + ?Sized> ProfileEditor<S> {
    /// Load the stored profile, or start from an empty one.
    pub async fn load(store: Arc<S>) -> Self {
        let mut profile = load_json::<UserProfile, S>(store.as_ref(), USER_KEY)
            .await
            .unwrap_or_default();

        // Photos may also have been stored under their own keys.
        if profile.profile_photo.is_none() {
            profile.profile_photo = load_json(store.as_ref(), PROFILE_PHOTO_KEY).await;
        }
        if profile.cover_photo.is_none() {
            profile.cover_photo = load_json(store.as_ref(), COVER_PHOTO_KEY).await;
        }

        Self { store, profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn display_name(&self) -> &str {
        if self.profile.name.is_empty() {
            "Member"
        } else {
            &self.profile.name
        }
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.profile.bio = bio.into();
    }

    pub fn set_experience(&mut self, experience: impl Into<String>) {
        self.profile.experience = experience.into();
    }

    /// Add a skill; blanks and duplicates are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.profile.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.profile.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.profile.skills.retain(|s| s != skill);
    }

    pub fn add_portfolio_item(&mut self, uri: impl Into<String>) {
        self.profile.portfolio.push(uri.into());
    }

    pub fn remove_portfolio_item(&mut self, uri: &str) {
        self.profile.portfolio.retain(|item| item != uri);
    }

    /// Set a photo and persist it under its own key right away.
    pub async fn set_photo(&mut self, kind: PhotoKind, uri: impl Into<String>) -> Result<()> {
        let uri = uri.into();
        store_json(self.store.as_ref(), kind.store_key(), &uri).await?;
        match kind {
            PhotoKind::Profile => self.profile.profile_photo = Some(uri),
            PhotoKind::Cover => self.profile.cover_photo = Some(uri),
        }
        Ok(())
    }

    /// Persist the profile. Rejected when every editable field is empty.
    pub async fn save(&mut self) -> Result<()> {
        if !self.profile.has_editable_content() {
            return Err(ValidationError::NothingToSave.into());
        }
        store_json(self.store.as_ref(), USER_KEY, &self.profile).await?;
        app_log!(info, "Profile saved for {}", self.profile.email);
        Ok(())
    }
}

/// Bump the stored application counter. No-op without a stored profile.
pub async fn record_application<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<u32>> {
    let Some(mut profile) = load_json::<UserProfile, S>(store, USER_KEY).await else {
        return Ok(None);
    };
    profile.applications += 1;
    store_json(store, USER_KEY, &profile).await?;
    Ok(Some(profile.applications))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::MemoryStore;

    #[tokio::test]
    async fn test_empty_store_yields_default_profile() {
        let editor = ProfileEditor::load(Arc::new(MemoryStore::new())).await;
        assert_eq!(editor.profile(), &UserProfile::default());
        assert_eq!(editor.display_name(), "Member");
    }

    #[tokio::test]
    async fn test_save_rejects_empty_profile() {
        let mut editor = ProfileEditor::load(Arc::new(MemoryStore::new())).await;
        let err = editor.save().await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NothingToSave)
        );
    }

    #[tokio::test]
    async fn test_edit_and_save_round_trip() {
        let store = Arc::new(MemoryStore::new());
        store_json(store.as_ref(), USER_KEY, &UserProfile::for_email("ada@example.com"))
            .await
            .unwrap();

        let mut editor = ProfileEditor::load(store.clone()).await;
        editor.set_bio("Compiler nerd");
        assert!(editor.add_skill("rust"));
        assert!(!editor.add_skill("rust"));
        assert!(!editor.add_skill("  "));
        assert!(editor.add_skill("sql"));
        editor.remove_skill("sql");
        editor.add_portfolio_item("file:///a.png");
        editor.add_portfolio_item("file:///b.png");
        editor.remove_portfolio_item("file:///a.png");
        editor.save().await.unwrap();

        let reloaded = ProfileEditor::load(store).await;
        assert_eq!(reloaded.profile().bio, "Compiler nerd");
        assert_eq!(reloaded.profile().skills, vec!["rust"]);
        assert_eq!(reloaded.profile().portfolio, vec!["file:///b.png"]);
        assert_eq!(reloaded.display_name(), "ada");
    }

    #[tokio::test]
    async fn test_set_photo_persists_separate_key() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = ProfileEditor::load(store.clone()).await;
        editor.set_photo(PhotoKind::Cover, "file:///cover.png").await.unwrap();

        let reloaded = ProfileEditor::load(store).await;
        assert_eq!(reloaded.profile().cover_photo.as_deref(), Some("file:///cover.png"));
        assert_eq!(reloaded.profile().profile_photo, None);
    }

    #[tokio::test]
    async fn test_record_application() {
        let store = MemoryStore::new();
        assert_eq!(record_application(&store).await.unwrap(), None);

        store_json(&store, USER_KEY, &UserProfile::for_email("a@b.c"))
            .await
            .unwrap();
        assert_eq!(record_application(&store).await.unwrap(), Some(1));
        assert_eq!(record_application(&store).await.unwrap(), Some(2));
    }
}

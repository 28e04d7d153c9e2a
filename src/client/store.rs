// src/client/store.rs
//! Key-value persistence for client state (profile, saved jobs, flags)

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::app_log;
use crate::core::FsOps;

pub const USER_KEY: &str = "user";
pub const SAVED_JOBS_KEY: &str = "savedJobs";
pub const ONBOARDING_KEY: &str = "onboardingCompleted";
pub const DARK_MODE_KEY: &str = "isDarkMode";
pub const COVER_PHOTO_KEY: &str = "coverPhoto";
pub const PROFILE_PHOTO_KEY: &str = "profilePhoto";

#[rocket::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Read and decode a value. Missing, unreadable or corrupt entries are
/// logged and reported as absent.
pub async fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let value = match store.get(key).await {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            app_log!(error, "Error retrieving {}: {:#}", key, e);
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            app_log!(warn, "Discarding corrupt value for {}: {}", key, e);
            None
        }
    }
}

/// Encode and write a value.
pub async fn store_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded =
        serde_json::to_value(value).with_context(|| format!("Failed to encode {}", key))?;
    store
        .set(key, encoded)
        .await
        .with_context(|| format!("Failed to store {}", key))
}

// ===== File-backed store =====

/// One JSON document per key inside a directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub async fn open(root: &Path) -> Result<Self> {
        FsOps::ensure_dir_exists(root).await?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", FsOps::normalize_key(key)))
    }
}

#[rocket::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !FsOps::exists(&path).await {
            return Ok(None);
        }

        let content = FsOps::read_file_safe(&path).await?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let content = serde_json::to_string(&value)?;
        FsOps::write_file_atomic(&self.path_for(key), &content).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if FsOps::exists(&path).await {
            FsOps::remove_file(&path).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        FsOps::remove_files_with_extension(&self.root, "json").await
    }
}

// ===== In-memory store =====

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[rocket::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

// src/core/fs_ops.rs
//! File system helpers shared by the file store and configuration

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::app_log;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !Self::exists(path).await {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(info, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn exists(path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write through a sibling temp file and rename, so readers never see
    /// a half-written document.
    pub async fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        let tmp_path = Self::temp_path_for(path);
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .await
            .with_context(|| format!("Failed to replace file: {}", path.display()))?;

        app_log!(debug, "Written file: {}", path.display());
        Ok(())
    }

    pub async fn remove_file(path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .with_context(|| format!("Failed to remove file: {}", path.display()))
    }

    /// Remove every regular file in `dir` with the given extension.
    pub async fn remove_files_with_extension(dir: &Path, extension: &str) -> Result<()> {
        if !Self::exists(dir).await {
            return Ok(());
        }

        let mut entries = fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        let mut count = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && Self::get_extension(&path).as_deref() == Some(extension) {
                Self::remove_file(&path).await?;
                count += 1;
            }
        }

        app_log!(info, "Removed {} files from {}", count, dir.display());
        Ok(())
    }

    pub fn normalize_path(base: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        }
    }

    /// Map a store key onto a safe file stem.
    pub fn normalize_key(key: &str) -> String {
        key.trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("store");
        path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
    }
}

// src/core/config_manager.rs
//! Configuration: paths per environment plus service settings

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::FsOps;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_REMOTE_JOBS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:4000/api";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
    pub store_path: PathBuf,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub remote_jobs_url: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl ConfigManager {
    pub fn load() -> Result<Self> {
        let environment = Self::load_environment()?;
        let service = Self::load_service()?;

        Ok(Self {
            environment,
            service,
        })
    }

    pub fn environment_name() -> String {
        std::env::var("JOBSEEK_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_environment() -> Result<EnvironmentConfig> {
        let env = Self::environment_name();

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        let config_path = base_dir.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path, &env)?
        } else {
            EnvironmentConfig {
                database_path: PathBuf::from("jobseek.db"),
                store_path: PathBuf::from("store"),
                log_path: None,
            }
        };

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }

        Ok(EnvironmentConfig {
            database_path: FsOps::normalize_path(&base_dir, &config.database_path),
            store_path: FsOps::normalize_path(&base_dir, &config.store_path),
            log_path: config
                .log_path
                .map(|path| FsOps::normalize_path(&base_dir, &path)),
        })
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<EnvironmentConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_config(&content, environment)
    }

    fn parse_config(content: &str, environment: &str) -> Result<EnvironmentConfig> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn load_service() -> Result<ServiceConfig> {
        let port = match std::env::var("JOBSEEK_PORT").or_else(|_| std::env::var("ROCKET_PORT")) {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("Port must be a valid port number: {}", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let remote_jobs_url = std::env::var("REMOTE_JOBS_URL")
            .unwrap_or_else(|_| DEFAULT_REMOTE_JOBS_URL.to_string());
        let api_base_url = std::env::var("JOBSEEK_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(ServiceConfig {
            port,
            remote_jobs_url,
            api_base_url,
            timeout_seconds: 30,
        })
    }

    /// Ensure the store directory and the database parent exist
    pub async fn ensure_directories(&self) -> Result<()> {
        FsOps::ensure_dir_exists(&self.environment.store_path).await?;

        if let Some(db_parent) = self.environment.database_path.parent() {
            FsOps::ensure_dir_exists(db_parent).await?;
        }

        if let Some(log_parent) = self
            .environment
            .log_path
            .as_ref()
            .and_then(|path| path.parent())
        {
            FsOps::ensure_dir_exists(log_parent).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  database_path: data/jobseek.db
  store_path: data/store
production:
  database_path: /var/lib/jobseek/jobseek.db
  store_path: /var/lib/jobseek/store
  log_path: /var/log/jobseek.log
"#;

    #[test]
    fn test_parse_config_selects_environment() {
        let local = ConfigManager::parse_config(SAMPLE, "local").unwrap();
        assert_eq!(local.database_path, PathBuf::from("data/jobseek.db"));
        assert_eq!(local.log_path, None);

        let production = ConfigManager::parse_config(SAMPLE, "production").unwrap();
        assert_eq!(production.store_path, PathBuf::from("/var/lib/jobseek/store"));
        assert_eq!(
            production.log_path,
            Some(PathBuf::from("/var/log/jobseek.log"))
        );
    }

    #[test]
    fn test_parse_config_rejects_missing_sections() {
        assert!(ConfigManager::parse_config("local: {}", "local").is_err());
    }

    #[tokio::test]
    async fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager {
            environment: EnvironmentConfig {
                database_path: dir.path().join("db").join("jobseek.db"),
                store_path: dir.path().join("store"),
                log_path: None,
            },
            service: ServiceConfig {
                port: DEFAULT_PORT,
                remote_jobs_url: DEFAULT_REMOTE_JOBS_URL.to_string(),
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout_seconds: 30,
            },
        };

        config.ensure_directories().await.unwrap();
        assert!(dir.path().join("store").is_dir());
        assert!(dir.path().join("db").is_dir());
    }
}

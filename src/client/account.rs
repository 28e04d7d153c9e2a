// src/client/account.rs
//! HTTP client for the account surface (signup, login, partial updates)

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::app_log;
use crate::types::{Account, AccountUpdate, FeedbackEntry, ValidationError};

const SIGNUP_ENDPOINT: &str = "/signup";
const LOGIN_ENDPOINT: &str = "/login";
const USER_ENDPOINT: &str = "/user";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Favorites list after toggling `job_id`.
pub fn toggle_favorite_ids(favorites: &[String], job_id: &str) -> Vec<String> {
    if favorites.iter().any(|id| id == job_id) {
        favorites.iter().filter(|id| *id != job_id).cloned().collect()
    } else {
        let mut updated = favorites.to_vec();
        updated.push(job_id.to_string());
        updated
    }
}

pub struct AccountClient {
    client: reqwest::Client,
    base_url: String,
}

impl AccountClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<Account> {
        let payload = credentials(username, password)?;
        let url = format!("{}{}", self.base_url, SIGNUP_ENDPOINT);
        app_log!(info, "Signing up {}", username.trim());
        self.send(self.client.post(&url).json(&payload)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Account> {
        let payload = credentials(username, password)?;
        let url = format!("{}{}", self.base_url, LOGIN_ENDPOINT);
        app_log!(info, "Logging in {}", username.trim());
        self.send(self.client.post(&url).json(&payload)).await
    }

    pub async fn update_user(&self, username: &str, update: &AccountUpdate) -> Result<Account> {
        let url = self.user_url(username)?;
        self.send(self.client.put(url).json(update))
            .await
            .with_context(|| format!("Update user error for {}", username))
    }

    /// Toggle a favorite. `favorites` is replaced with the server's list
    /// only after the update is confirmed; on failure it is left as is.
    pub async fn toggle_favorite(
        &self,
        username: &str,
        favorites: &mut Vec<String>,
        job_id: &str,
    ) -> Result<bool> {
        let updated = toggle_favorite_ids(favorites, job_id);
        let added = updated.len() > favorites.len();

        match self
            .update_user(username, &AccountUpdate::favorites(updated))
            .await
        {
            Ok(account) => {
                *favorites = account.favorites;
                Ok(added)
            }
            Err(e) => {
                app_log!(error, "Toggle favorite error: {:#}", e);
                Err(e)
            }
        }
    }

    /// Append feedback to the account. Blank text is ignored.
    pub async fn submit_feedback(
        &self,
        username: &str,
        feedback: &mut Vec<FeedbackEntry>,
        text: &str,
    ) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let mut updated = feedback.clone();
        updated.push(FeedbackEntry {
            text: text.to_string(),
            date: Utc::now(),
        });

        let account = self
            .update_user(username, &AccountUpdate::feedback(updated))
            .await?;
        *feedback = account.feedback;
        Ok(true)
    }

    /// `{base}/user/{username}` with the username encoded as one path segment.
    fn user_url(&self, username: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base_url, USER_ENDPOINT))
            .with_context(|| format!("Invalid account service URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Account service URL cannot take a path: {}", self.base_url))?
            .push(username);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await.context("HTTP request failed")?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .context("Failed to parse account response");
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => format!("Request failed with status {}", status),
        };
        app_log!(warn, "Account service error {}: {}", status, message);
        anyhow::bail!(message)
    }
}

fn credentials(username: &str, password: &str) -> Result<serde_json::Value> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(ValidationError::MissingUsernamePassword.into());
    }
    Ok(serde_json::json!({ "username": username, "password": password }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_toggle_favorite_ids() {
        assert_eq!(toggle_favorite_ids(&ids(&["1"]), "2"), ids(&["1", "2"]));
        assert_eq!(toggle_favorite_ids(&ids(&["1", "2"]), "1"), ids(&["2"]));
        assert_eq!(toggle_favorite_ids(&[], "1"), ids(&["1"]));
    }

    #[test]
    fn test_credentials_validation() {
        assert!(credentials("ada", "secret").is_ok());
        let err = credentials("  ", "secret").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingUsernamePassword)
        );
    }

    #[test]
    fn test_user_url_encodes_username() {
        let client = AccountClient::new("http://127.0.0.1:4000/api/".to_string(), 2).unwrap();

        assert_eq!(
            client.user_url("ada").unwrap().as_str(),
            "http://127.0.0.1:4000/api/user/ada"
        );

        let url = client.user_url("a/b?c#d").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4000/api/user/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[tokio::test]
    async fn test_toggle_favorite_leaves_list_on_failure() {
        // Nothing listens on the discard port.
        let client = AccountClient::new("http://127.0.0.1:9/api".to_string(), 2).unwrap();
        let mut favorites = ids(&["1"]);

        assert!(client
            .toggle_favorite("ada", &mut favorites, "2")
            .await
            .is_err());
        assert_eq!(favorites, ids(&["1"]));
    }
}

// src/client/source.rs
//! Job sources: the remote placeholder collection and the jobs backend

use anyhow::{Context, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

use crate::app_log;
use crate::types::{Job, CATEGORIES, LOCATIONS};

const REQUIREMENTS: [&str; 3] = [
    "5+ years experience",
    "Advanced degree",
    "Proven excellence",
];

const FEATURED_PROBABILITY: f64 = 0.3;

#[rocket::async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>>;
}

fn http_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .context("Failed to create HTTP client")
}

// ===== Remote placeholder collection =====

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Map posts into jobs. Location, salary, category and the featured flag
/// are drawn from `rng`, so two fetches of the same posts differ.
pub fn map_posts<R: Rng>(posts: Vec<Post>, rng: &mut R) -> Vec<Job> {
    let posted_date = chrono::Local::now().format("%-m/%-d/%Y").to_string();

    posts
        .into_iter()
        .map(|post| Job {
            id: post.id.to_string(),
            title: post.title,
            company: format!("Elite {}", post.user_id),
            description: post.body,
            location: LOCATIONS.choose(rng).unwrap_or(&"Remote").to_string(),
            category: CATEGORIES.choose(rng).unwrap_or(&"Tech").to_string(),
            salary: Some(rng.random_range(100..200)),
            posted_date: posted_date.clone(),
            requirements: REQUIREMENTS.iter().map(|r| r.to_string()).collect(),
            is_featured: rng.random_bool(FEATURED_PROBABILITY),
            image: None,
            created_at: None,
        })
        .collect()
}

pub struct RemoteJobSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteJobSource {
    pub fn new(url: String, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            url,
        })
    }
}

#[rocket::async_trait]
impl JobSource for RemoteJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        app_log!(info, "Fetching remote jobs: {}", self.url);

        let posts: Vec<Post> = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Remote job request failed")?
            .error_for_status()
            .context("Remote job source returned an error status")?
            .json()
            .await
            .context("Failed to parse remote job payload")?;

        let jobs = map_posts(posts, &mut rand::rng());
        app_log!(info, "Mapped {} remote jobs", jobs.len());
        Ok(jobs)
    }
}

// ===== Jobs backend =====

pub struct ApiJobSource {
    client: reqwest::Client,
    base_url: String,
}

impl ApiJobSource {
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout_seconds)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[rocket::async_trait]
impl JobSource for ApiJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        let url = format!("{}/jobs", self.base_url);
        app_log!(info, "Fetching jobs from backend: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch jobs")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to fetch jobs: status {}: {}", status, body);
        }

        response
            .json::<Vec<Job>>()
            .await
            .context("Failed to parse jobs payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn posts() -> Vec<Post> {
        (1..=20)
            .map(|id| Post {
                user_id: id % 3,
                id,
                title: format!("post {}", id),
                body: "body".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_map_posts_shapes_jobs() {
        let mut rng = StdRng::seed_from_u64(7);
        let jobs = map_posts(posts(), &mut rng);

        assert_eq!(jobs.len(), 20);
        for (job, id) in jobs.iter().zip(1u64..) {
            assert_eq!(job.id, id.to_string());
            assert_eq!(job.company, format!("Elite {}", id % 3));
            assert!(LOCATIONS.contains(&job.location.as_str()));
            assert!(CATEGORIES.contains(&job.category.as_str()));
            let salary = job.salary.unwrap();
            assert!((100..200).contains(&salary));
            assert_eq!(job.requirements.len(), 3);
        }
    }

    #[test]
    fn test_map_posts_keeps_ids_stable_across_fetches() {
        let first = map_posts(posts(), &mut StdRng::seed_from_u64(1));
        let second = map_posts(posts(), &mut StdRng::seed_from_u64(2));

        let first_ids: Vec<_> = first.iter().map(|j| &j.id).collect();
        let second_ids: Vec<_> = second.iter().map(|j| &j.id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_post_payload_deserializes() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "userId": 1, "id": 3, "title": "t", "body": "b"
        }))
        .unwrap();
        assert_eq!(post.user_id, 1);
    }
}

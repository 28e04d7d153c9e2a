// src/client/saved_jobs.rs
//! Saved-jobs set persisted write-through under `savedJobs`

use anyhow::Result;
use std::sync::Arc;

use crate::app_log;
use crate::client::store::{load_json, store_json, KeyValueStore, SAVED_JOBS_KEY};
use crate::types::Job;

/// Result of a confirmed toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    pub jobs: Vec<Job>,
    pub was_added: bool,
}

/// Remove `job` by id if present, otherwise append it.
pub fn toggle_membership(job: &Job, current: &[Job]) -> Toggled {
    if current.iter().any(|saved| saved.id == job.id) {
        Toggled {
            jobs: current
                .iter()
                .filter(|saved| saved.id != job.id)
                .cloned()
                .collect(),
            was_added: false,
        }
    } else {
        let mut jobs = current.to_vec();
        jobs.push(job.clone());
        Toggled {
            jobs,
            was_added: true,
        }
    }
}

pub struct SavedJobsManager<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Clone for SavedJobsManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore + ?Sized> SavedJobsManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persisted saved jobs; empty when absent or unreadable.
    pub async fn load(&self) -> Vec<Job> {
        load_json::<Vec<Job>, S>(self.store.as_ref(), SAVED_JOBS_KEY)
            .await
            .unwrap_or_default()
    }

    /// Toggle `job` and persist the new set before returning it.
    ///
    /// On a failed write the error is returned and `current` remains the
    /// authoritative set.
    pub async fn toggle(&self, job: &Job, current: &[Job]) -> Result<Toggled> {
        let toggled = toggle_membership(job, current);

        if let Err(e) = store_json(self.store.as_ref(), SAVED_JOBS_KEY, &toggled.jobs).await {
            app_log!(
                error,
                "Failed to persist saved jobs after toggling {}: {:#}",
                job.id,
                e
            );
            return Err(e);
        }

        app_log!(
            info,
            "Job {} {} ({} saved)",
            job.id,
            if toggled.was_added { "saved" } else { "unsaved" },
            toggled.jobs.len()
        );
        Ok(toggled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::testing::FlakyStore;
    use crate::client::store::MemoryStore;
    use serde_json::json;

    fn job(id: &str) -> Job {
        Job::new(id, format!("Job {}", id), "Acme")
    }

    #[test]
    fn test_toggle_membership_scenario() {
        let job1 = job("1");

        let added = toggle_membership(&job1, &[]);
        assert!(added.was_added);
        assert_eq!(added.jobs, vec![job1.clone()]);

        let removed = toggle_membership(&job1, &added.jobs);
        assert!(!removed.was_added);
        assert!(removed.jobs.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let start = vec![job("1"), job("2"), job("3")];
        for target in [job("2"), job("9")] {
            let once = toggle_membership(&target, &start);
            let twice = toggle_membership(&target, &once.jobs);
            let mut restored = twice.jobs.clone();
            let mut expected = start.clone();
            restored.sort_by(|a, b| a.id.cmp(&b.id));
            expected.sort_by(|a, b| a.id.cmp(&b.id));
            assert_eq!(restored, expected);
        }
    }

    #[tokio::test]
    async fn test_load_empty_when_absent_or_corrupt() {
        let store = Arc::new(MemoryStore::new());
        let manager = SavedJobsManager::new(store.clone());
        assert!(manager.load().await.is_empty());

        store
            .set(SAVED_JOBS_KEY, json!({ "not": "a list" }))
            .await
            .unwrap();
        assert!(manager.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_writes_through() {
        let store = Arc::new(MemoryStore::new());
        let manager = SavedJobsManager::new(store.clone());

        let toggled = manager.toggle(&job("1"), &[]).await.unwrap();
        assert!(toggled.was_added);
        assert_eq!(manager.load().await, toggled.jobs);

        let toggled = manager.toggle(&job("1"), &toggled.jobs).await.unwrap();
        assert!(!toggled.was_added);
        assert!(manager.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_reload_keeps_salary_in_thousands() {
        let store = Arc::new(MemoryStore::new());
        let manager = SavedJobsManager::new(store);
        let executive = job("1").with_salary(1500);

        let toggled = manager.toggle(&executive, &[]).await.unwrap();
        assert_eq!(toggled.jobs[0].salary, Some(1500));
        assert_eq!(manager.load().await, vec![executive]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_persisted_state_untouched() {
        let store = Arc::new(FlakyStore::new());
        let manager = SavedJobsManager::new(store.clone());
        let saved = manager.toggle(&job("1"), &[]).await.unwrap().jobs;

        store.fail_writes(true);
        assert!(manager.toggle(&job("2"), &saved).await.is_err());
        assert!(manager.toggle(&job("1"), &saved).await.is_err());

        assert_eq!(manager.load().await, saved);
    }
}

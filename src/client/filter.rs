// src/client/filter.rs
//! Job list filtering. Pure and synchronous; re-run in full on every
//! criteria change.

use crate::types::{FilterCriteria, Job};

/// Keep the jobs matching every active predicate, in input order.
pub fn filter(jobs: &[Job], criteria: &FilterCriteria) -> Vec<Job> {
    let needle = criteria.search_text.to_lowercase();

    jobs.iter()
        .filter(|job| matches_text(job, &needle))
        .filter(|job| criteria.category.matches(&job.category))
        .filter(|job| criteria.location.matches(&job.location))
        .filter(|job| matches_salary(job, criteria))
        .cloned()
        .collect()
}

/// Single-job form of [`filter`].
pub fn matches(job: &Job, criteria: &FilterCriteria) -> bool {
    matches_text(job, &criteria.search_text.to_lowercase())
        && criteria.category.matches(&job.category)
        && criteria.location.matches(&job.location)
        && matches_salary(job, criteria)
}

fn matches_text(job: &Job, needle: &str) -> bool {
    needle.is_empty()
        || job.title.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle)
}

fn matches_salary(job: &Job, criteria: &FilterCriteria) -> bool {
    match (&criteria.salary_range, job.salary) {
        (None, _) => true,
        (Some(range), Some(salary)) => range.contains(salary),
        (Some(_), None) => false,
    }
}

/// First `limit` featured jobs.
pub fn featured(jobs: &[Job], limit: usize) -> Vec<Job> {
    jobs.iter()
        .filter(|job| job.is_featured)
        .take(limit)
        .cloned()
        .collect()
}

/// Other jobs in the same category as `job`.
pub fn related(jobs: &[Job], job: &Job, limit: usize) -> Vec<Job> {
    jobs.iter()
        .filter(|other| other.id != job.id && other.category == job.category)
        .take(limit)
        .cloned()
        .collect()
}

pub fn is_saved(saved: &[Job], job: &Job) -> bool {
    saved.iter().any(|s| s.id == job.id)
}

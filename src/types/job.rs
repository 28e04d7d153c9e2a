// src/types/job.rs
//! Job posting records shared by the client core and the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;
use crate::utils::{normalize_salary_amount, parse_salary_text};

pub const CATEGORIES: [&str; 7] = [
    "Tech",
    "Design",
    "Marketing",
    "Finance",
    "Sales",
    "Management",
    "Executive",
];

pub const LOCATIONS: [&str; 6] = ["New York", "London", "Remote", "Tokyo", "Dubai", "Paris"];

// ===== Job =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    /// Salary in thousands
    #[serde(default, deserialize_with = "deserialize_salary")]
    pub salary: Option<u32>,
    #[serde(default, alias = "posted")]
    pub posted_date: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(id: impl Into<String>, title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            salary: None,
            posted_date: String::new(),
            requirements: Vec::new(),
            is_featured: false,
            image: None,
            created_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_salary(mut self, salary: u32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }
}

// ===== Salary ingestion =====

/// Salary as it arrives at an ingestion boundary: a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Amount(f64),
    Text(String),
}

impl SalaryInput {
    /// Normalize to thousands; `None` when the text has no amount.
    pub fn normalize(&self) -> Option<u32> {
        match self {
            SalaryInput::Amount(amount) => normalize_salary_amount(*amount),
            SalaryInput::Text(text) => parse_salary_text(text),
        }
    }
}

/// A salary on a stored `Job`. Numbers are already thousands; legacy
/// text payloads still go through the text parser.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSalary {
    Thousands(u32),
    Text(String),
}

fn deserialize_salary<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredSalary>::deserialize(deserializer)?;
    Ok(stored.and_then(|salary| match salary {
        StoredSalary::Thousands(amount) => Some(amount),
        StoredSalary::Text(text) => parse_salary_text(&text),
    }))
}

// ===== Backend input =====

/// Body of a job creation request. Required fields are checked by
/// [`NewJob::into_job`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<SalaryInput>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

impl NewJob {
    pub fn into_job(self, id: String, now: DateTime<Utc>) -> Result<Job, ValidationError> {
        let salary = self.salary.ok_or(ValidationError::MissingField("salary"))?;

        Ok(Job {
            id,
            title: required(self.title, "title")?,
            company: required(self.company, "company")?,
            description: required(self.description, "description")?,
            location: required(self.location, "location")?,
            category: required(self.category, "category")?,
            salary: salary.normalize(),
            posted_date: now.format("%-m/%-d/%Y").to_string(),
            requirements: self.requirements.unwrap_or_default(),
            is_featured: self.is_featured.unwrap_or(false),
            image: self.image.filter(|i| !i.trim().is_empty()),
            created_at: Some(now),
        })
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<SalaryInput>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

impl JobPatch {
    pub fn apply(self, job: &mut Job) -> Result<(), ValidationError> {
        if let Some(title) = self.title {
            job.title = required(Some(title), "title")?;
        }
        if let Some(company) = self.company {
            job.company = required(Some(company), "company")?;
        }
        if let Some(location) = self.location {
            job.location = required(Some(location), "location")?;
        }
        if let Some(description) = self.description {
            job.description = required(Some(description), "description")?;
        }
        if let Some(category) = self.category {
            job.category = required(Some(category), "category")?;
        }
        if let Some(salary) = self.salary {
            job.salary = salary.normalize();
        }
        if let Some(image) = self.image {
            job.image = Some(image).filter(|i| !i.trim().is_empty());
        }
        if let Some(requirements) = self.requirements {
            job.requirements = requirements;
        }
        if let Some(is_featured) = self.is_featured {
            job.is_featured = is_featured;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_from_remote_shape() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "7",
            "title": "Engineer",
            "company": "Elite 1",
            "description": "Build things",
            "location": "Remote",
            "category": "Tech",
            "salary": 150,
            "posted": "1/2/2026",
            "requirements": ["5+ years experience"],
            "isFeatured": true
        }))
        .unwrap();

        assert_eq!(job.salary, Some(150));
        assert_eq!(job.posted_date, "1/2/2026");
        assert!(job.is_featured);
    }

    #[test]
    fn test_job_from_backend_shape_normalizes_salary_text() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "title": "Marketing Manager",
            "company": "GrowEasy",
            "salary": "$90,000 - $110,000"
        }))
        .unwrap();

        assert_eq!(job.salary, Some(90));
        assert!(!job.is_featured);
        assert!(job.requirements.is_empty());
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let job = Job::new("1", "Engineer", "Acme").featured().with_salary(120);
        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["isFeatured"], true);
        assert_eq!(value["salary"], 120);
        assert!(value.get("postedDate").is_some());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_job_round_trip_keeps_large_salary() {
        let job = Job::new("1", "Chief Executive", "Acme").with_salary(1500);
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["salary"], 1500);

        let back: Job = serde_json::from_value(value).unwrap();
        assert_eq!(back, job);

        let input: NewJob = serde_json::from_value(serde_json::json!({
            "title": "Chief Executive",
            "company": "Acme",
            "location": "Remote",
            "salary": "$1,500,000",
            "description": "Run the company.",
            "category": "Executive"
        }))
        .unwrap();
        let ingested = input.into_job("2".to_string(), Utc::now()).unwrap();
        assert_eq!(ingested.salary, Some(1500));

        let text = serde_json::to_string(&ingested).unwrap();
        let reloaded: Job = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded.salary, Some(1500));
    }

    fn seed_input() -> NewJob {
        serde_json::from_value(serde_json::json!({
            "title": "Senior React Native Developer",
            "company": "TechCorp",
            "location": "San Francisco, CA",
            "salary": "$120,000 - $150,000",
            "description": "Develop cutting-edge mobile applications.",
            "category": "Tech"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_job_into_job() {
        let job = seed_input().into_job("id-1".to_string(), Utc::now()).unwrap();
        assert_eq!(job.salary, Some(120));
        assert_eq!(job.location, "San Francisco, CA");
        assert!(job.created_at.is_some());
        assert!(!job.posted_date.is_empty());
    }

    #[test]
    fn test_new_job_requires_fields() {
        let mut input = seed_input();
        input.company = Some("   ".to_string());
        assert_eq!(
            input.into_job("x".to_string(), Utc::now()),
            Err(ValidationError::MissingField("company"))
        );

        let mut input = seed_input();
        input.salary = None;
        assert_eq!(
            input.into_job("x".to_string(), Utc::now()),
            Err(ValidationError::MissingField("salary"))
        );
    }

    #[test]
    fn test_job_patch_applies_partial_update() {
        let mut job = seed_input().into_job("id-1".to_string(), Utc::now()).unwrap();
        let patch: JobPatch = serde_json::from_value(serde_json::json!({
            "salary": 175,
            "isFeatured": true
        }))
        .unwrap();
        patch.apply(&mut job).unwrap();

        assert_eq!(job.salary, Some(175));
        assert!(job.is_featured);
        assert_eq!(job.company, "TechCorp");

        let blank_title = JobPatch {
            title: Some(String::new()),
            ..JobPatch::default()
        };
        assert!(blank_title.apply(&mut job).is_err());
    }
}

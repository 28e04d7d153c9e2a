// src/web/types.rs
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::FromForm;

use crate::types::{Facet, FilterCriteria, SalaryRange, ValidationError};

/// Body of every non-success response, and of plain confirmations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            message: message.into(),
            error: Some(error.to_string()),
        }
    }
}

pub type ApiError = status::Custom<Json<ApiMessage>>;
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn api_error(status: Status, body: ApiMessage) -> ApiError {
    status::Custom(status, Json(body))
}

pub fn server_error(error: impl ToString) -> ApiError {
    api_error(
        Status::InternalServerError,
        ApiMessage::with_error("Server error", error),
    )
}

pub fn job_not_found() -> ApiError {
    api_error(Status::NotFound, ApiMessage::new("Job not found"))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Trimmed username and raw password, or the validation failure.
    pub fn require(&self) -> Result<(String, String), ValidationError> {
        let username = self.username.as_deref().map(str::trim).unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();

        if username.is_empty() || password.trim().is_empty() {
            return Err(ValidationError::MissingUsernamePassword);
        }
        Ok((username.to_string(), password.to_string()))
    }
}

/// Query string accepted by `GET /api/jobs`.
#[derive(Debug, Clone, Default, FromForm)]
pub struct JobQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<u32>,
    pub max_salary: Option<u32>,
}

impl JobQuery {
    pub fn to_criteria(&self) -> Result<FilterCriteria, ValidationError> {
        let salary_range = SalaryRange::from_bounds(self.min_salary, self.max_salary)?;

        Ok(FilterCriteria {
            search_text: self.q.clone().unwrap_or_default(),
            category: Facet::parse(self.category.as_deref()),
            location: Facet::parse(self.location.as_deref()),
            salary_range,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_query_to_criteria() {
        let query = JobQuery {
            q: Some("react".to_string()),
            category: Some("All".to_string()),
            location: Some("Remote".to_string()),
            min_salary: Some(100),
            max_salary: None,
        };
        let criteria = query.to_criteria().unwrap();

        assert_eq!(criteria.search_text, "react");
        assert_eq!(criteria.category, Facet::All);
        assert_eq!(criteria.location, Facet::Only("Remote".to_string()));
        assert_eq!(criteria.salary_range.map(|r| r.min()), Some(100));
    }

    #[test]
    fn test_job_query_rejects_inverted_range() {
        let query = JobQuery {
            min_salary: Some(200),
            max_salary: Some(100),
            ..JobQuery::default()
        };
        assert!(query.to_criteria().is_err());
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let blank = Credentials {
            username: Some("  ".to_string()),
            password: Some("secret".to_string()),
        };
        assert_eq!(
            blank.require(),
            Err(ValidationError::MissingUsernamePassword)
        );

        let ok = Credentials {
            username: Some(" ada ".to_string()),
            password: Some("secret".to_string()),
        };
        assert_eq!(
            ok.require(),
            Ok(("ada".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_api_message_omits_empty_error() {
        let value = serde_json::to_value(ApiMessage::new("Job not found")).unwrap();
        assert_eq!(value, serde_json::json!({ "message": "Job not found" }));
    }
}

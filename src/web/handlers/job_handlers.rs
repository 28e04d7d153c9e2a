// src/web/handlers/job_handlers.rs
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::client::filter::filter;
use crate::core::{Database, JobWrite};
use crate::types::{Job, JobPatch, NewJob};
use crate::web::types::{
    api_error, job_not_found, server_error, ApiError, ApiMessage, ApiResult, JobQuery,
};

pub async fn list_jobs_handler(query: JobQuery, db: &State<Database>) -> ApiResult<Vec<Job>> {
    let criteria = query.to_criteria().map_err(|e| {
        api_error(
            Status::BadRequest,
            ApiMessage::with_error("Invalid filter", e),
        )
    })?;

    let jobs = db.jobs().list().await.map_err(|e| {
        app_log!(error, "Failed to list jobs: {:#}", e);
        server_error(e)
    })?;

    if criteria.is_unconstrained() {
        return Ok(Json(jobs));
    }

    let visible = filter(&jobs, &criteria);
    app_log!(
        debug,
        "Filtered {} jobs down to {}",
        jobs.len(),
        visible.len()
    );
    Ok(Json(visible))
}

pub async fn get_job_handler(id: &str, db: &State<Database>) -> ApiResult<Job> {
    match db.jobs().get(id).await {
        Ok(Some(job)) => Ok(Json(job)),
        Ok(None) => Err(job_not_found()),
        Err(e) => {
            app_log!(error, "Failed to fetch job {}: {:#}", id, e);
            Err(server_error(e))
        }
    }
}

pub async fn create_job_handler(
    input: Json<NewJob>,
    db: &State<Database>,
) -> Result<status::Custom<Json<Job>>, ApiError> {
    match db.jobs().create(input.into_inner()).await {
        Ok(JobWrite::Written(job)) => Ok(status::Custom(Status::Created, Json(job))),
        Ok(JobWrite::Invalid(e)) => {
            app_log!(warn, "Rejected job creation: {}", e);
            Err(server_error(e))
        }
        Ok(JobWrite::NotFound) => Err(job_not_found()),
        Err(e) => {
            app_log!(error, "Failed to create job: {:#}", e);
            Err(server_error(e))
        }
    }
}

pub async fn update_job_handler(
    id: &str,
    patch: Json<JobPatch>,
    db: &State<Database>,
) -> ApiResult<Job> {
    match db.jobs().update(id, patch.into_inner()).await {
        Ok(JobWrite::Written(job)) => Ok(Json(job)),
        Ok(JobWrite::NotFound) => Err(job_not_found()),
        Ok(JobWrite::Invalid(e)) => {
            app_log!(warn, "Rejected update for job {}: {}", id, e);
            Err(server_error(e))
        }
        Err(e) => {
            app_log!(error, "Failed to update job {}: {:#}", id, e);
            Err(server_error(e))
        }
    }
}

pub async fn delete_job_handler(id: &str, db: &State<Database>) -> ApiResult<ApiMessage> {
    match db.jobs().delete(id).await {
        Ok(true) => Ok(Json(ApiMessage::new("Job deleted successfully"))),
        Ok(false) => Err(job_not_found()),
        Err(e) => {
            app_log!(error, "Failed to delete job {}: {:#}", id, e);
            Err(server_error(e))
        }
    }
}

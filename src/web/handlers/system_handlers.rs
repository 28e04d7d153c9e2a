// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::core::Database;
use crate::web::types::HealthResponse;

pub const WELCOME_TEXT: &str = "Welcome to the Job App Backend!";

pub async fn health_handler(db: &State<Database>) -> Json<HealthResponse> {
    let database = match db.health_check().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            app_log!(error, "Health check failed: {:#}", e);
            "unavailable".to_string()
        }
    };

    Json(HealthResponse {
        status: "OK".to_string(),
        database,
    })
}

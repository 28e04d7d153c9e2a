// src/web/handlers/account_handlers.rs
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::core::Database;
use crate::types::{Account, AccountUpdate};
use crate::web::types::{api_error, server_error, ApiError, ApiMessage, ApiResult, Credentials};

fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(Status::BadRequest, ApiMessage::new(message))
}

pub async fn signup_handler(
    credentials: Json<Credentials>,
    db: &State<Database>,
) -> Result<status::Custom<Json<Account>>, ApiError> {
    let (username, password) = credentials
        .require()
        .map_err(|e| bad_request(e.to_string()))?;

    match db.users().create(&username, &password).await {
        Ok(Some(account)) => Ok(status::Custom(Status::Created, Json(account))),
        Ok(None) => Err(bad_request("Username already exists")),
        Err(e) => {
            app_log!(error, "Signup failed for {}: {:#}", username, e);
            Err(server_error(e))
        }
    }
}

pub async fn login_handler(credentials: Json<Credentials>, db: &State<Database>) -> ApiResult<Account> {
    let (username, password) = credentials
        .require()
        .map_err(|e| bad_request(e.to_string()))?;

    match db.users().verify(&username, &password).await {
        Ok(Some(account)) => {
            app_log!(info, "User logged in: {}", username);
            Ok(Json(account))
        }
        Ok(None) => Err(api_error(
            Status::Unauthorized,
            ApiMessage::new("Invalid credentials"),
        )),
        Err(e) => {
            app_log!(error, "Login failed for {}: {:#}", username, e);
            Err(server_error(e))
        }
    }
}

pub async fn update_user_handler(
    username: &str,
    update: Json<AccountUpdate>,
    db: &State<Database>,
) -> ApiResult<Account> {
    match db.users().update(username, &update).await {
        Ok(Some(account)) => Ok(Json(account)),
        Ok(None) => Err(api_error(
            Status::NotFound,
            ApiMessage::new("User not found"),
        )),
        Err(e) => {
            app_log!(error, "Update failed for {}: {:#}", username, e);
            Err(server_error(e))
        }
    }
}

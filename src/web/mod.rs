// src/web/mod.rs
//! Job posting and account HTTP surface

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{
    catchers, delete, get, options, post, put, routes, Build, Request, Response, Rocket, State,
};

use crate::app_log;
use crate::core::{ConfigManager, Database};
use crate::types::{Account, AccountUpdate, Job, JobPatch, NewJob};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// ===== Jobs =====

#[get("/jobs?<query..>")]
pub async fn list_jobs(query: JobQuery, db: &State<Database>) -> ApiResult<Vec<Job>> {
    handlers::list_jobs_handler(query, db).await
}

#[get("/jobs/<id>")]
pub async fn get_job(id: &str, db: &State<Database>) -> ApiResult<Job> {
    handlers::get_job_handler(id, db).await
}

#[post("/jobs", data = "<input>")]
pub async fn create_job(
    input: Json<NewJob>,
    db: &State<Database>,
) -> Result<status::Custom<Json<Job>>, ApiError> {
    handlers::create_job_handler(input, db).await
}

#[put("/jobs/<id>", data = "<patch>")]
pub async fn update_job(id: &str, patch: Json<JobPatch>, db: &State<Database>) -> ApiResult<Job> {
    handlers::update_job_handler(id, patch, db).await
}

#[delete("/jobs/<id>")]
pub async fn delete_job(id: &str, db: &State<Database>) -> ApiResult<ApiMessage> {
    handlers::delete_job_handler(id, db).await
}

// ===== Accounts =====

#[post("/signup", data = "<credentials>")]
pub async fn signup(
    credentials: Json<Credentials>,
    db: &State<Database>,
) -> Result<status::Custom<Json<Account>>, ApiError> {
    handlers::signup_handler(credentials, db).await
}

#[post("/login", data = "<credentials>")]
pub async fn login(credentials: Json<Credentials>, db: &State<Database>) -> ApiResult<Account> {
    handlers::login_handler(credentials, db).await
}

#[put("/user/<username>", data = "<update>")]
pub async fn update_user(
    username: &str,
    update: Json<AccountUpdate>,
    db: &State<Database>,
) -> ApiResult<Account> {
    handlers::update_user_handler(username, update, db).await
}

// ===== System =====

#[get("/health")]
pub async fn health(db: &State<Database>) -> Json<HealthResponse> {
    handlers::health_handler(db).await
}

#[get("/")]
pub fn index() -> &'static str {
    handlers::WELCOME_TEXT
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ApiMessage> {
    Json(ApiMessage::new("Invalid request format"))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<ApiMessage> {
    Json(ApiMessage::with_error("Not found", request.uri()))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ApiMessage> {
    Json(ApiMessage::new("Request body has invalid fields"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ApiMessage> {
    Json(ApiMessage::new("Server error"))
}

/// Assemble the server around an open database.
pub fn build_rocket(database: Database) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(database)
        .register("/", catchers![bad_request, not_found, unprocessable, internal_error])
        .mount("/", routes![index, options])
        .mount(
            "/api",
            routes![
                list_jobs,
                get_job,
                create_job,
                update_job,
                delete_job,
                signup,
                login,
                update_user,
                health,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let database = Database::new(&config.environment.database_path).await?;
    database.jobs().seed_if_empty().await?;

    app_log!(info, "Starting job backend");
    app_log!(
        info,
        "Database: {}",
        config.environment.database_path.display()
    );
    app_log!(info, "Server: http://0.0.0.0:{}", config.service.port);

    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.service.port));

    let _rocket = build_rocket(database)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}

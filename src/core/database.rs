// src/core/database.rs
//! SQLite storage for job postings and accounts

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::path::Path;
use uuid::Uuid;

use crate::app_log;
use crate::core::FsOps;
use crate::types::{
    Account, AccountUpdate, FeedbackEntry, Job, JobPatch, NewJob, SalaryInput, ValidationError,
};

// ===== Core Database Connection Management =====

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database file and run migrations
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            FsOps::ensure_dir_exists(parent).await?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        app_log!(
            info,
            "Database connection established: {}",
            database_path.display()
        );

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn jobs(&self) -> JobRepository<'_> {
        JobRepository::new(&self.pool)
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                company TEXT NOT NULL,
                description TEXT NOT NULL,
                location TEXT NOT NULL,
                category TEXT NOT NULL,
                salary INTEGER,
                posted_date TEXT NOT NULL,
                requirements TEXT NOT NULL DEFAULT '[]',
                is_featured BOOLEAN NOT NULL DEFAULT FALSE,
                image TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                salt TEXT NOT NULL,
                favorites TEXT NOT NULL DEFAULT '[]',
                feedback TEXT NOT NULL DEFAULT '[]',
                profile_photo TEXT,
                cover_photo TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_category ON jobs(category);")
            .execute(&self.pool)
            .await?;

        app_log!(info, "Database migrations completed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

// ===== Job Rows =====

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: String,
    title: String,
    company: String,
    description: String,
    location: String,
    category: String,
    salary: Option<i64>,
    posted_date: String,
    requirements: String,
    is_featured: bool,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = anyhow::Error;

    fn try_from(row: JobRow) -> Result<Self> {
        let requirements: Vec<String> = serde_json::from_str(&row.requirements)
            .with_context(|| format!("Corrupt requirements for job {}", row.id))?;

        Ok(Job {
            salary: row.salary.and_then(|s| u32::try_from(s).ok()),
            id: row.id,
            title: row.title,
            company: row.company,
            description: row.description,
            location: row.location,
            category: row.category,
            posted_date: row.posted_date,
            requirements,
            is_featured: row.is_featured,
            image: row.image,
            created_at: Some(row.created_at),
        })
    }
}

const JOB_COLUMNS: &str = "id, title, company, description, location, category, salary, \
     posted_date, requirements, is_featured, image, created_at";

/// Result of a write that can fail validation before touching the table.
#[derive(Debug)]
pub enum JobWrite {
    Written(Job),
    NotFound,
    Invalid(ValidationError),
}

// ===== Job Repository =====

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All jobs in insertion order
    pub async fn list(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs ORDER BY rowid ASC",
            JOB_COLUMNS
        ))
        .fetch_all(self.pool)
        .await
        .context("Failed to list jobs")?;

        rows.into_iter().map(Job::try_from).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs WHERE id = ?",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .with_context(|| format!("Failed to fetch job {}", id))?;

        row.map(Job::try_from).transpose()
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(self.pool)
            .await
            .context("Failed to count jobs")?;
        Ok(count)
    }

    pub async fn create(&self, input: NewJob) -> Result<JobWrite> {
        let job = match input.into_job(Uuid::new_v4().to_string(), Utc::now()) {
            Ok(job) => job,
            Err(e) => return Ok(JobWrite::Invalid(e)),
        };

        sqlx::query(&format!(
            "INSERT INTO jobs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            JOB_COLUMNS
        ))
        .bind(&job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.category)
        .bind(job.salary.map(i64::from))
        .bind(&job.posted_date)
        .bind(serde_json::to_string(&job.requirements)?)
        .bind(job.is_featured)
        .bind(&job.image)
        .bind(job.created_at.unwrap_or_else(Utc::now))
        .execute(self.pool)
        .await
        .context("Failed to insert job")?;

        app_log!(info, "Created job {} ({} at {})", job.id, job.title, job.company);
        Ok(JobWrite::Written(job))
    }

    pub async fn update(&self, id: &str, patch: JobPatch) -> Result<JobWrite> {
        let Some(mut job) = self.get(id).await? else {
            return Ok(JobWrite::NotFound);
        };

        if let Err(e) = patch.apply(&mut job) {
            return Ok(JobWrite::Invalid(e));
        }

        sqlx::query(
            r#"
            UPDATE jobs
            SET title = ?, company = ?, description = ?, location = ?, category = ?,
                salary = ?, requirements = ?, is_featured = ?, image = ?
            WHERE id = ?
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.category)
        .bind(job.salary.map(i64::from))
        .bind(serde_json::to_string(&job.requirements)?)
        .bind(job.is_featured)
        .bind(&job.image)
        .bind(id)
        .execute(self.pool)
        .await
        .with_context(|| format!("Failed to update job {}", id))?;

        app_log!(info, "Updated job {}", id);
        Ok(JobWrite::Written(job))
    }

    /// Returns false when no job had this id
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .with_context(|| format!("Failed to delete job {}", id))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            app_log!(info, "Deleted job {}", id);
        }
        Ok(deleted)
    }

    /// Insert the two starter postings when the table is empty
    pub async fn seed_if_empty(&self) -> Result<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let mut seeded = 0;
        for input in seed_jobs() {
            if let JobWrite::Written(_) = self.create(input).await? {
                seeded += 1;
            }
        }

        app_log!(info, "Initial job data seeded ({} jobs)", seeded);
        Ok(seeded)
    }
}

fn seed_jobs() -> Vec<NewJob> {
    let job = |title: &str,
               company: &str,
               location: &str,
               salary: &str,
               description: &str,
               category: &str| NewJob {
        title: Some(title.to_string()),
        company: Some(company.to_string()),
        location: Some(location.to_string()),
        salary: Some(SalaryInput::Text(salary.to_string())),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        image: Some(format!("https://via.placeholder.com/300x150?text={}", company)),
        requirements: None,
        is_featured: None,
    };

    vec![
        job(
            "Senior React Native Developer",
            "TechCorp",
            "San Francisco, CA",
            "$120,000 - $150,000",
            "Develop cutting-edge mobile applications using React Native.",
            "Tech",
        ),
        job(
            "Marketing Manager",
            "GrowEasy",
            "New York, NY",
            "$90,000 - $110,000",
            "Lead marketing campaigns and strategies.",
            "Marketing",
        ),
    ]
}

// ===== Accounts =====

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    salt: String,
    favorites: String,
    feedback: String,
    profile_photo: Option<String>,
    cover_photo: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_account(self) -> Result<Account> {
        let favorites: Vec<String> = serde_json::from_str(&self.favorites)
            .with_context(|| format!("Corrupt favorites for {}", self.username))?;
        let feedback: Vec<FeedbackEntry> = serde_json::from_str(&self.feedback)
            .with_context(|| format!("Corrupt feedback for {}", self.username))?;

        Ok(Account {
            username: self.username,
            favorites,
            feedback,
            profile_photo: self.profile_photo,
            cover_photo: self.cover_photo,
            created_at: Some(self.created_at),
        })
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    async fn find(&self, username: &str) -> Result<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, password_hash, salt, favorites, feedback,
                   profile_photo, cover_photo, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .with_context(|| format!("Failed to fetch user {}", username))
    }

    pub async fn get(&self, username: &str) -> Result<Option<Account>> {
        self.find(username)
            .await?
            .map(UserRow::into_account)
            .transpose()
    }

    /// Create an account. `None` when the username is taken.
    pub async fn create(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let salt = Uuid::new_v4().simple().to_string();
        let now = Utc::now();

        // The primary key decides a race between two signups for one name
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (username, password_hash, salt, favorites, feedback, created_at)
            VALUES (?, ?, ?, '[]', '[]', ?)
            "#,
        )
        .bind(username)
        .bind(hash_password(&salt, password))
        .bind(&salt)
        .bind(now)
        .execute(self.pool)
        .await
        .with_context(|| format!("Failed to create user {}", username))?;

        if result.rows_affected() == 0 {
            app_log!(warn, "Signup rejected, username taken: {}", username);
            return Ok(None);
        }

        app_log!(info, "Created account: {}", username);
        Ok(Some(Account {
            username: username.to_string(),
            created_at: Some(now),
            ..Account::default()
        }))
    }

    /// Check credentials. `None` on unknown user or wrong password.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let Some(row) = self.find(username).await? else {
            return Ok(None);
        };

        if hash_password(&row.salt, password) != row.password_hash {
            app_log!(warn, "Invalid password for {}", username);
            return Ok(None);
        }

        row.into_account().map(Some)
    }

    /// Apply a partial update. `None` when the user does not exist.
    pub async fn update(&self, username: &str, update: &AccountUpdate) -> Result<Option<Account>> {
        let Some(mut account) = self.get(username).await? else {
            return Ok(None);
        };

        if let Some(favorites) = &update.favorites {
            account.favorites = favorites.clone();
        }
        if let Some(feedback) = &update.feedback {
            account.feedback = feedback.clone();
        }
        if let Some(photo) = &update.profile_photo {
            account.profile_photo = Some(photo.clone());
        }
        if let Some(photo) = &update.cover_photo {
            account.cover_photo = Some(photo.clone());
        }

        sqlx::query(
            r#"
            UPDATE users
            SET favorites = ?, feedback = ?, profile_photo = ?, cover_photo = ?
            WHERE username = ?
            "#,
        )
        .bind(serde_json::to_string(&account.favorites)?)
        .bind(serde_json::to_string(&account.feedback)?)
        .bind(&account.profile_photo)
        .bind(&account.cover_photo)
        .bind(username)
        .execute(self.pool)
        .await
        .with_context(|| format!("Failed to update user {}", username))?;

        app_log!(info, "Updated account: {}", username);
        Ok(Some(account))
    }
}

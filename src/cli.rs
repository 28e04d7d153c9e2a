// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_log;
use crate::client::filter::filter;
use crate::client::{ApiJobSource, FileStore, JobSource, RemoteJobSource, SavedJobsManager};
use crate::core::{ConfigManager, Database, JobWrite};
use crate::types::{Facet, FilterCriteria, Job, NewJob, SalaryInput, SalaryRange, ValidationError};
use crate::utils::format_salary;
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "jobseek")]
#[command(about = "Job search backend and command line client")]
pub struct JobseekCli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the configured database file
    #[arg(long, global = true)]
    pub database_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP backend
    Serve,
    /// Create the database and seed the starter postings
    Init,
    /// Import job postings from a CSV file
    Import { csv_file: PathBuf },
    /// List postings from the database (or a running backend with --api)
    List {
        #[arg(long)]
        api: bool,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Fetch postings from the remote placeholder feed
    Remote {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Manage the locally saved jobs
    Saved {
        #[command(subcommand)]
        action: SavedCommand,
    },
}

#[derive(Subcommand)]
pub enum SavedCommand {
    /// Show saved jobs
    List,
    /// Save or unsave a job from the database
    Toggle { job_id: String },
}

#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive match on title or company
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Minimum salary in thousands
    #[arg(long)]
    pub min_salary: Option<u32>,
    /// Maximum salary in thousands
    #[arg(long)]
    pub max_salary: Option<u32>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria, ValidationError> {
        Ok(FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            category: Facet::parse(self.category.as_deref()),
            location: Facet::parse(self.location.as_deref()),
            salary_range: SalaryRange::from_bounds(self.min_salary, self.max_salary)?,
        })
    }
}

/// One CSV row; `requirements` is a `;`-separated list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvJob {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    salary: Option<String>,
    description: Option<String>,
    category: Option<String>,
    image: Option<String>,
    requirements: Option<String>,
    featured: Option<bool>,
}

impl From<CsvJob> for NewJob {
    fn from(row: CsvJob) -> Self {
        NewJob {
            title: row.title,
            company: row.company,
            location: row.location,
            salary: row.salary.map(SalaryInput::Text),
            description: row.description,
            category: row.category,
            image: row.image,
            requirements: row.requirements.map(|list| {
                list.split(';')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            is_featured: row.featured,
        }
    }
}

/// Parse CSV content into job inputs; malformed rows are counted, not fatal.
fn parse_job_csv(content: &str) -> (Vec<NewJob>, usize) {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut jobs = Vec::new();
    let mut error_count = 0;

    for result in reader.deserialize::<CsvJob>() {
        match result {
            Ok(row) => jobs.push(NewJob::from(row)),
            Err(e) => {
                error_count += 1;
                app_log!(warn, "CSV parsing error: {}", e);
            }
        }
    }

    (jobs, error_count)
}

fn describe(job: &Job) -> String {
    format!(
        "{:<38} {} @ {} [{} | {}] {}{}",
        job.id,
        job.title,
        job.company,
        job.category,
        job.location,
        format_salary(job.salary),
        if job.is_featured { " *" } else { "" }
    )
}

/// Terminal lines for a job listing, summary last.
fn render_jobs(jobs: &[Job]) -> Vec<String> {
    if jobs.is_empty() {
        return vec!["No jobs match these filters.".to_string()];
    }
    let mut lines: Vec<String> = jobs.iter().map(describe).collect();
    lines.push(format!("{} job(s)", jobs.len()));
    lines
}

// Results always reach stdout, whatever the log sink
fn print_jobs(jobs: &[Job]) {
    app_log!(debug, "Listing {} job(s)", jobs.len());
    for line in render_jobs(jobs) {
        println!("{}", line);
    }
}

async fn open_database(config: &ConfigManager) -> Result<Database> {
    Database::new(&config.environment.database_path).await
}

pub async fn handle_command(cli: JobseekCli, mut config: ConfigManager) -> Result<()> {
    if let Some(path) = cli.database_path {
        config.environment.database_path = path;
    }

    match cli.command {
        Command::Serve => start_web_server(config).await?,

        Command::Init => {
            let db = open_database(&config).await?;
            let seeded = db.jobs().seed_if_empty().await?;
            app_log!(
                info,
                "Database initialized at: {} ({} job(s) seeded)",
                config.environment.database_path.display(),
                seeded
            );
        }

        Command::Import { csv_file } => {
            if !csv_file.exists() {
                anyhow::bail!("CSV file not found: {}", csv_file.display());
            }

            let content = tokio::fs::read_to_string(&csv_file)
                .await
                .with_context(|| format!("Failed to read {}", csv_file.display()))?;
            let (inputs, mut error_count) = parse_job_csv(&content);

            let db = open_database(&config).await?;
            let mut success_count = 0;

            for input in inputs {
                match db.jobs().create(input).await? {
                    JobWrite::Written(job) => {
                        success_count += 1;
                        app_log!(info, "Added: {} @ {}", job.title, job.company);
                    }
                    JobWrite::Invalid(e) => {
                        error_count += 1;
                        app_log!(warn, "Skipping row: {}", e);
                    }
                    JobWrite::NotFound => error_count += 1,
                }
            }

            app_log!(
                info,
                "Import completed: {} added, {} skipped",
                success_count,
                error_count
            );
        }

        Command::List { api, filters } => {
            let criteria = filters.to_criteria()?;
            let jobs = if api {
                ApiJobSource::new(
                    config.service.api_base_url.clone(),
                    config.service.timeout_seconds,
                )?
                .fetch_jobs()
                .await?
            } else {
                open_database(&config).await?.jobs().list().await?
            };
            print_jobs(&filter(&jobs, &criteria));
        }

        Command::Remote { filters } => {
            let criteria = filters.to_criteria()?;
            let source = RemoteJobSource::new(
                config.service.remote_jobs_url.clone(),
                config.service.timeout_seconds,
            )?;
            let jobs = source.fetch_jobs().await?;
            print_jobs(&filter(&jobs, &criteria));
        }

        Command::Saved { action } => {
            let store = Arc::new(FileStore::open(&config.environment.store_path).await?);
            let manager = SavedJobsManager::new(store);
            let saved = manager.load().await;

            match action {
                SavedCommand::List => print_jobs(&saved),
                SavedCommand::Toggle { job_id } => {
                    let job = match saved.iter().find(|job| job.id == job_id) {
                        Some(job) => job.clone(),
                        None => open_database(&config)
                            .await?
                            .jobs()
                            .get(&job_id)
                            .await?
                            .with_context(|| format!("Job not found: {}", job_id))?,
                    };

                    let toggled = manager.toggle(&job, &saved).await?;
                    println!(
                        "{}: {}",
                        if toggled.was_added { "Job Saved" } else { "Job Unsaved" },
                        job.title
                    );
                }
            }
        }
    }

    Ok(())
}

// src/client/mod.rs
//! Client-side core behind the job search screens

pub mod account;
pub mod application;
pub mod board;
pub mod filter;
pub mod notice;
pub mod profile;
pub mod saved_jobs;
pub mod session;
pub mod source;
pub mod store;
pub mod theme;

pub use account::AccountClient;
pub use application::{ApplicationForm, FeedbackForm};
pub use board::{JobBoard, LoadOutcome, Liveness};
pub use notice::Notice;
pub use profile::ProfileEditor;
pub use saved_jobs::{SavedJobsManager, Toggled};
pub use session::Session;
pub use source::{ApiJobSource, JobSource, RemoteJobSource};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{BoardConfig, Theme};

// src/core/mod.rs
//! Configuration, storage and filesystem services shared by the server and CLI

pub mod config_manager;
pub mod database;
pub mod fs_ops;

pub use config_manager::{ConfigManager, EnvironmentConfig, ServiceConfig};
pub use database::{Database, JobRepository, JobWrite, UserRepository};
pub use fs_ops::FsOps;

//! Job search core: filtering, saved jobs, profile services and the
//! job posting backend.

#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!($($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!($($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!($($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!($($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!($($arg)+) };
}

pub mod cli;
pub mod client;
pub mod core;
pub mod types;
pub mod utils;
pub mod web;

pub use client::filter::filter;
pub use types::{Facet, FilterCriteria, Job, SalaryRange, UserProfile};
pub use web::{build_rocket, start_web_server};

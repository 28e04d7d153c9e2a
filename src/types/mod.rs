// src/types/mod.rs
pub mod criteria;
pub mod error;
pub mod job;
pub mod profile;

pub use criteria::{Facet, FilterCriteria, SalaryRange};
pub use error::ValidationError;
pub use job::{Job, JobPatch, NewJob, SalaryInput, CATEGORIES, LOCATIONS};
pub use profile::{Account, AccountUpdate, FeedbackEntry, PhotoKind, UserProfile};

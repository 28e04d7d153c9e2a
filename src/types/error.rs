// src/types/error.rs
use thiserror::Error;

/// Input problems reported back to the user before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter email and password")]
    MissingCredentials,
    #[error("Please enter username and password")]
    MissingUsernamePassword,
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Please upload a resume and write a cover letter")]
    IncompleteApplication,
    #[error("Please provide feedback and a rating")]
    IncompleteFeedback,
    #[error("Nothing to save")]
    NothingToSave,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid salary range: min {min} is greater than max {max}")]
    InvalidSalaryRange { min: u32, max: u32 },
}

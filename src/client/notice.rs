// src/client/notice.rs
use std::fmt;

/// Transient message a screen shows after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    JobSaved,
    JobUnsaved,
    SaveFailed,
    JobsUnavailable,
    LoginSuccessful,
    SignupSuccessful,
    ProfileSaved,
    ImageUploaded,
    ApplicationSubmitted,
    FeedbackSubmitted,
    PasswordResetSent,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::JobSaved => "Job Saved",
            Notice::JobUnsaved => "Job Unsaved",
            Notice::SaveFailed => "Could not update saved jobs",
            Notice::JobsUnavailable => "Failed to load jobs",
            Notice::LoginSuccessful => "Login Successful",
            Notice::SignupSuccessful => "Signup Successful",
            Notice::ProfileSaved => "Profile Saved",
            Notice::ImageUploaded => "Image Uploaded",
            Notice::ApplicationSubmitted => "Application Submitted",
            Notice::FeedbackSubmitted => "Feedback Submitted",
            Notice::PasswordResetSent => "Password reset link sent (simulated)",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::SaveFailed | Notice::JobsUnavailable)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

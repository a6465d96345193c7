use journal_api::ApiError;
use thiserror::Error;

/// Why a submission did not go through. `Display` is the user-facing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please write something before submitting.")]
    Empty,
    #[error("Entry is too long. Please keep it under 1000 characters.")]
    TooLong { len: usize },
    /// Another session wrote today's entry first.
    #[error("You already submitted an entry for today.")]
    AlreadySubmitted,
    #[error(transparent)]
    Backend(#[from] ApiError),
}

impl SubmitError {
    /// Validation failures are decided locally and never reach the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Empty | Self::TooLong { .. })
    }
}

pub mod config;
pub mod dev_backend;
pub mod error;
mod guard;
pub mod history;
pub mod normalize;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use dev_backend::DevBackend;
pub use error::SubmitError;
pub use history::HistoryController;
pub use session::SessionController;
pub use types::{
    EntryId, HistoryState, JournalEntry, SessionState, SubmissionState, TodayStatus,
};

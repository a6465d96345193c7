mod api_url;
mod backend;
mod client;
mod error;
mod payload;

pub use api_url::ApiUrl;
pub use backend::JournalBackend;
pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use payload::Payload;

pub use reqwest::{Method, StatusCode};

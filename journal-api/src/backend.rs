use async_trait::async_trait;

use crate::{Payload, Result};

/// The five operations the journal backend exposes.
///
/// Payloads are returned uninterpreted; callers decide which response shapes
/// they accept.
#[async_trait]
pub trait JournalBackend: Send + Sync {
    /// GET /streak
    async fn get_streak(&self) -> Result<Payload>;

    /// GET /entries/today. A 404 means no entry has been written today.
    async fn get_today_entry(&self) -> Result<Payload>;

    /// POST /entries. A 409 means today's entry already exists.
    async fn submit_entry(&self, content: &str) -> Result<Payload>;

    /// GET /entries
    async fn list_entries(&self) -> Result<Payload>;

    /// GET /entries/{id}
    async fn get_entry_by_id(&self, id: &str) -> Result<Payload>;
}

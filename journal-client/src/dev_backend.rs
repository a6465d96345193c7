use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use journal_api::{ApiError, JournalBackend, Payload, Result, StatusCode};
use serde_json::{json, Value};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::session::validate_entry;
use crate::types::{EntryId, JournalEntry};

/// In-memory stand-in for the journal backend, used by `journal --dev`.
///
/// Follows the real backend's conventions: 404 when today has no entry, 409
/// on a second entry for the same day, history listed latest first.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
    today: Date,
}

#[derive(Debug)]
struct DevStore {
    entries: Vec<JournalEntry>,
    next_id: i64,
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevBackend {
    pub fn new() -> Self {
        Self::seeded(local_today())
    }

    /// Seeded history ending yesterday, so today is still open.
    pub fn seeded(today: Date) -> Self {
        let backend = Self::empty(today);
        {
            let mut store = backend.lock();
            for (days_ago, content) in [
                (4, "Started reading a new book."),
                (2, "Long walk after work, cleared my head."),
                (1, "Shipped the release. Tired but happy."),
            ] {
                store.insert(format_date(today - Duration::days(days_ago)), content);
            }
        }
        backend
    }

    pub fn empty(today: Date) -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore {
                entries: Vec::new(),
                next_id: 1,
            })),
            today,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn today_str(&self) -> String {
        format_date(self.today)
    }

    /// Consecutive days with an entry, ending today or yesterday.
    pub fn streak(&self) -> u64 {
        let dates: BTreeSet<Date> = self
            .lock()
            .entries
            .iter()
            .filter_map(|e| e.date.as_deref().and_then(parse_date))
            .collect();

        let mut day = if dates.contains(&self.today) {
            self.today
        } else {
            self.today - Duration::days(1)
        };

        let mut streak = 0;
        while dates.contains(&day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }
}

impl DevStore {
    fn insert(&mut self, date: String, content: &str) -> JournalEntry {
        let entry = JournalEntry {
            id: Some(EntryId::Int(self.next_id)),
            date: Some(date),
            content: Some(content.to_string()),
        };
        self.next_id += 1;
        self.entries.push(entry.clone());
        entry
    }
}

#[async_trait]
impl JournalBackend for DevBackend {
    async fn get_streak(&self) -> Result<Payload> {
        Ok(Payload::Json(json!({ "streak": self.streak() })))
    }

    async fn get_today_entry(&self) -> Result<Payload> {
        let today = self.today_str();
        let store = self.lock();
        let entry = store
            .entries
            .iter()
            .find(|e| e.date.as_deref() == Some(today.as_str()))
            .ok_or_else(|| not_found("No entry for today"))?;
        Ok(Payload::Json(json!({ "entry": record(entry)? })))
    }

    async fn submit_entry(&self, content: &str) -> Result<Payload> {
        let content = validate_entry(content)
            .map_err(|e| error(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()))?;

        let today = self.today_str();
        let mut store = self.lock();
        if store
            .entries
            .iter()
            .any(|e| e.date.as_deref() == Some(today.as_str()))
        {
            return Err(error(
                StatusCode::CONFLICT,
                "An entry for today already exists",
            ));
        }

        let entry = store.insert(today, content);
        tracing::debug!(id = ?entry.id, "dev backend stored entry");
        Ok(Payload::Json(record(&entry)?))
    }

    async fn list_entries(&self) -> Result<Payload> {
        let mut entries = self.lock().entries.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        let entries = entries.iter().map(record).collect::<Result<Vec<_>>>()?;
        Ok(Payload::Json(json!({ "entries": entries })))
    }

    async fn get_entry_by_id(&self, id: &str) -> Result<Payload> {
        let store = self.lock();
        let entry = store
            .entries
            .iter()
            .find(|e| e.id.as_ref().is_some_and(|entry_id| entry_id.to_string() == id))
            .ok_or_else(|| not_found("Entry not found"))?;
        Ok(Payload::Json(record(entry)?))
    }
}

fn record(entry: &JournalEntry) -> Result<Value> {
    serde_json::to_value(entry).map_err(|e| ApiError::transport(e.to_string()))
}

fn error(status: StatusCode, detail: &str) -> ApiError {
    ApiError::from_parts(
        status,
        "application/json",
        &json!({ "detail": detail }).to_string(),
    )
}

fn not_found(detail: &str) -> ApiError {
    error(StatusCode::NOT_FOUND, detail)
}

fn local_today() -> Date {
    OffsetDateTime::now_utc()
        .to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
        .date()
}

fn format_date(date: Date) -> String {
    // Formatting a calendar date with this description cannot fail.
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).ok()
}

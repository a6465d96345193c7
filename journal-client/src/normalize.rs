//! Shape adapters for backend payloads.
//!
//! The backend answers some endpoints with either a bare value or a wrapper
//! object. Each endpoint gets exactly one adapter here so the controllers
//! never inspect raw JSON.

use journal_api::Payload;
use serde_json::Value;

use crate::types::{JournalEntry, TodayStatus};

/// `GET /streak`: a bare number, `{"streak": n}` or `{"count": n}`.
pub fn streak(payload: Payload) -> Option<u64> {
    let value = payload.into_json()?;
    count(&value)
        .or_else(|| value.get("streak").and_then(count))
        .or_else(|| value.get("count").and_then(count))
}

fn count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| *n >= 0.0 && n.fract() == 0.0)
            .map(|n| n as u64)
    })
}

/// A single entry record, bare or wrapped as `{"entry": {...}}`.
pub fn entry(payload: Payload) -> Option<JournalEntry> {
    let Some(Value::Object(mut map)) = payload.into_json() else {
        return None;
    };

    let record = match map.remove("entry") {
        Some(Value::Null) => return None,
        Some(inner) => inner,
        None => Value::Object(map),
    };
    record_to_entry(record)
}

/// `GET /entries/today`: present only when the record names a real entry.
pub fn today(payload: Payload) -> TodayStatus {
    match entry(payload) {
        Some(entry) if entry.has_identity() => TodayStatus::Present(entry),
        _ => TodayStatus::Absent,
    }
}

/// `GET /entries`: a bare array or `{"entries": [...]}`. Anything else is an
/// empty history.
pub fn entries(payload: Payload) -> Vec<JournalEntry> {
    let items = match payload.into_json() {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut map)) => match map.remove("entries") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items.into_iter().filter_map(record_to_entry).collect()
}

fn record_to_entry(record: Value) -> Option<JournalEntry> {
    if !record.is_object() {
        return None;
    }
    serde_json::from_value(record)
        .inspect_err(|e| tracing::warn!(error = %e, "skipping malformed entry record"))
        .ok()
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

/// Backend-assigned entry identifier; the backend may use strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EntryId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A journal entry as the backend describes it.
///
/// Every field is optional so summaries and partial detail records both
/// deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl JournalEntry {
    /// Overlay the fields `detail` carries; fields it omits are kept.
    pub fn merge(&mut self, detail: JournalEntry) {
        if detail.id.is_some() {
            self.id = detail.id;
        }
        if detail.date.is_some() {
            self.date = detail.date;
        }
        if detail.content.is_some() {
            self.content = detail.content;
        }
    }

    /// Whether the record actually describes a persisted entry.
    pub fn has_identity(&self) -> bool {
        self.id.is_some() || self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// What is known about today's entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TodayStatus {
    /// Not loaded yet, or the last load failed.
    #[default]
    Unknown,
    Absent,
    Present(JournalEntry),
}

impl TodayStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn entry(&self) -> Option<&JournalEntry> {
        match self {
            Self::Present(entry) => Some(entry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub in_flight: bool,
    pub last_error: Option<SubmitError>,
    pub last_success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub today: TodayStatus,
    pub streak: Option<u64>,
    pub streak_loading: bool,
    pub today_loading: bool,
    pub streak_error: Option<String>,
    pub today_error: Option<String>,
    pub submission: SubmissionState,
}

impl SessionState {
    /// Submission is open only when today's entry is confirmed absent, the
    /// today lookup is settled and no other submission is pending.
    pub fn can_submit(&self) -> bool {
        self.today == TodayStatus::Absent && !self.today_loading && !self.submission.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.streak_loading || self.today_loading
    }

    /// The single load error to show next to the streak.
    pub fn display_error(&self) -> Option<&str> {
        self.streak_error
            .as_deref()
            .or(self.today_error.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryState {
    /// Backend order, latest first.
    pub entries: Vec<JournalEntry>,
    pub loading: bool,
    pub list_error: Option<String>,
    pub selected: Option<JournalEntry>,
    pub detail_loading: bool,
    pub detail_error: Option<String>,
}

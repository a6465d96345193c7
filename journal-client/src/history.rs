//! Past entries and the entry under review.

use std::sync::Arc;

use journal_api::JournalBackend;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::guard::Flag;
use crate::normalize;
use crate::types::{HistoryState, JournalEntry};

pub struct HistoryController {
    backend: Arc<dyn JournalBackend>,
    state: watch::Sender<HistoryState>,
    loading: Flag<HistoryState>,
    detail_loading: Flag<HistoryState>,
}

impl HistoryController {
    pub fn new(backend: Arc<dyn JournalBackend>) -> Self {
        let (state, _) = watch::channel(HistoryState::default());
        Self {
            backend,
            state,
            loading: Flag::new(set_loading),
            detail_loading: Flag::new(set_detail_loading),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<HistoryState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> HistoryState {
        self.state.borrow().clone()
    }

    /// Load the full history. A failed load keeps the entries already shown.
    #[tracing::instrument(name = "history.list_all", skip_all)]
    pub async fn list_all(&self) {
        self.state.send_modify(|s| s.list_error = None);
        let _loading = self.loading.raise(&self.state);

        match self.backend.list_entries().await {
            Ok(payload) => {
                let entries = normalize::entries(payload);
                debug!(count = entries.len(), "history loaded");
                self.state.send_modify(|s| s.entries = entries);
            }
            Err(e) => {
                warn!(error = %e, "failed to load history");
                self.state
                    .send_modify(|s| s.list_error = Some(e.to_string()));
            }
        }
    }

    /// Show `entry` right away, then fill in its details.
    ///
    /// Entries without an id are shown as given. Otherwise the detail record
    /// is merged into the selection, so fields the detail omits survive, and a
    /// failed lookup leaves the summary on screen next to the error.
    #[tracing::instrument(name = "history.select", skip_all)]
    pub async fn select(&self, entry: JournalEntry) {
        let id = entry.id.clone();
        self.state.send_modify(|s| {
            s.selected = Some(entry);
            s.detail_error = None;
        });

        let Some(id) = id else {
            return;
        };

        let _loading = self.detail_loading.raise(&self.state);
        let outcome = self.backend.get_entry_by_id(&id.to_string()).await;

        self.state.send_modify(|s| {
            // The reader may have moved on while the detail was loading.
            let Some(selected) = s
                .selected
                .as_mut()
                .filter(|selected| selected.id.as_ref() == Some(&id))
            else {
                debug!(%id, "selection changed before detail arrived");
                return;
            };

            match outcome {
                Ok(payload) => {
                    if let Some(detail) = normalize::entry(payload) {
                        selected.merge(detail);
                    }
                }
                Err(e) => {
                    warn!(%id, error = %e, "failed to load entry detail");
                    s.detail_error = Some(e.to_string());
                }
            }
        });
    }

    /// Dismiss the entry under review.
    pub fn close(&self) {
        self.state.send_modify(|s| {
            s.selected = None;
            s.detail_error = None;
        });
    }
}

fn set_loading(state: &mut HistoryState, on: bool) {
    state.loading = on;
}

fn set_detail_loading(state: &mut HistoryState, on: bool) {
    state.detail_loading = on;
}

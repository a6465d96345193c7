//! Today's submission gate.
//!
//! The controller owns [`SessionState`] and publishes every change through a
//! watch channel. It never trusts its own view after a submission; the
//! post-submit state is always re-read from the backend.

use std::sync::Arc;

use journal_api::{JournalBackend, Payload, Result as ApiResult};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::guard::Flag;
use crate::normalize;
use crate::types::{SessionState, TodayStatus};

pub const MAX_ENTRY_CHARS: usize = 1000;

/// Trim `content` and check it fits an entry. Returns the text to send.
pub fn validate_entry(content: &str) -> Result<&str, SubmitError> {
    let trimmed = content.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(SubmitError::Empty);
    }
    if len > MAX_ENTRY_CHARS {
        return Err(SubmitError::TooLong { len });
    }
    Ok(trimmed)
}

pub struct SessionController {
    backend: Arc<dyn JournalBackend>,
    state: watch::Sender<SessionState>,
    loading: Flag<SessionState>,
    in_flight: Flag<SessionState>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn JournalBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            backend,
            state,
            loading: Flag::new(set_loading),
            in_flight: Flag::new(set_in_flight),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn can_submit(&self) -> bool {
        self.state.borrow().can_submit()
    }

    /// Reload the streak and today's entry.
    ///
    /// Both lookups run concurrently and are applied independently: one
    /// failing never discards the other's result.
    #[tracing::instrument(name = "session.refresh", skip_all)]
    pub async fn refresh(&self) {
        self.state.send_modify(|s| {
            s.submission.last_success = false;
            s.streak_error = None;
            s.today_error = None;
        });
        let _loading = self.loading.raise(&self.state);

        let (streak, today) =
            tokio::join!(self.backend.get_streak(), self.backend.get_today_entry());

        self.state.send_modify(|s| {
            apply_streak(s, streak);
            apply_today(s, today);
        });
    }

    /// Submit today's entry.
    ///
    /// Callers are expected to check [`Self::can_submit`] first; the
    /// controller does not queue or reject overlapping calls itself.
    #[tracing::instrument(name = "session.submit", skip_all)]
    pub async fn submit(&self, content: &str) -> Result<(), SubmitError> {
        self.state.send_modify(|s| {
            s.submission.last_error = None;
            s.submission.last_success = false;
        });

        let content = match validate_entry(content) {
            Ok(content) => content,
            Err(e) => {
                debug!(error = %e, "entry rejected before sending");
                self.record_submit_error(e.clone());
                return Err(e);
            }
        };

        let _in_flight = self.in_flight.raise(&self.state);

        match self.backend.submit_entry(content).await {
            Ok(_) => {
                info!("entry submitted");
                self.refresh().await;
                self.state.send_modify(|s| s.submission.last_success = true);
                Ok(())
            }
            Err(e) => {
                let error = if e.is_conflict() {
                    SubmitError::AlreadySubmitted
                } else {
                    SubmitError::Backend(e)
                };
                warn!(error = %error, "entry submission failed");
                self.record_submit_error(error.clone());
                Err(error)
            }
        }
    }

    fn record_submit_error(&self, error: SubmitError) {
        self.state
            .send_modify(|s| s.submission.last_error = Some(error));
    }
}

fn set_loading(state: &mut SessionState, on: bool) {
    state.streak_loading = on;
    state.today_loading = on;
}

fn set_in_flight(state: &mut SessionState, on: bool) {
    state.submission.in_flight = on;
}

fn apply_streak(state: &mut SessionState, outcome: ApiResult<Payload>) {
    match outcome {
        Ok(payload) => {
            state.streak = normalize::streak(payload);
            if state.streak.is_none() {
                warn!("streak response had no recognizable count");
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to load streak");
            state.streak_error = Some(e.to_string());
        }
    }
}

fn apply_today(state: &mut SessionState, outcome: ApiResult<Payload>) {
    match outcome {
        Ok(payload) => state.today = normalize::today(payload),
        // The backend answers 404 when nothing has been written today.
        Err(e) if e.is_not_found() => state.today = TodayStatus::Absent,
        Err(e) => {
            warn!(error = %e, "failed to load today's entry");
            state.today = TodayStatus::Unknown;
            state.today_error = Some(e.to_string());
        }
    }
}

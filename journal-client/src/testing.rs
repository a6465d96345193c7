//! Scripted backend for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use journal_api::{ApiError, JournalBackend, Payload, Result, StatusCode};
use serde_json::Value;
use tokio::sync::{Barrier, Notify};

type Reply = Result<Payload>;

pub(crate) fn json(value: Value) -> Reply {
    Ok(Payload::Json(value))
}

pub(crate) fn status(code: u16, message: &str) -> Reply {
    Err(ApiError::new(
        StatusCode::from_u16(code).expect("valid status code"),
        message,
    ))
}

#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl Script {
    fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Replies are consumed in order; the last one repeats.
    fn next(&self) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            return replies.pop_front().unwrap();
        }
        replies
            .front()
            .cloned()
            .unwrap_or_else(|| Err(ApiError::transport("no scripted reply")))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Parks the first call on one endpoint until the test releases it.
struct Hold {
    gate: Arc<Notify>,
    armed: bool,
}

#[derive(Default)]
pub(crate) struct ScriptedBackend {
    streak: Script,
    today: Script,
    submit: Script,
    list: Script,
    detail: Script,
    submitted: Mutex<Vec<String>>,
    requested_ids: Mutex<Vec<String>>,
    rendezvous: Option<Arc<Barrier>>,
    hang_today: bool,
    holds: Mutex<HashMap<String, Hold>>,
    waiting: AtomicUsize,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn streak(self, reply: Reply) -> Self {
        self.streak.push(reply);
        self
    }

    pub(crate) fn today(self, reply: Reply) -> Self {
        self.today.push(reply);
        self
    }

    pub(crate) fn submit(self, reply: Reply) -> Self {
        self.submit.push(reply);
        self
    }

    pub(crate) fn list(self, reply: Reply) -> Self {
        self.list.push(reply);
        self
    }

    pub(crate) fn detail(self, reply: Reply) -> Self {
        self.detail.push(reply);
        self
    }

    /// Streak and today calls only answer once both are waiting, so a
    /// sequential caller would never finish.
    pub(crate) fn rendezvous(mut self) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(2)));
        self
    }

    /// Today's lookup never completes.
    pub(crate) fn hang_today(mut self) -> Self {
        self.hang_today = true;
        self
    }

    /// The first today lookup waits for [`Self::release_today`]; later
    /// ones answer straight away.
    pub(crate) fn hold_today(self) -> Self {
        self.hold("today")
    }

    /// The first detail lookup for `id` waits for [`Self::release_detail`].
    pub(crate) fn hold_detail(self, id: &str) -> Self {
        self.hold(&format!("entry:{id}"))
    }

    fn hold(self, key: &str) -> Self {
        let hold = Hold {
            gate: Arc::new(Notify::new()),
            armed: true,
        };
        self.holds.lock().unwrap().insert(key.to_string(), hold);
        self
    }

    pub(crate) fn release_today(&self) {
        self.release("today");
    }

    pub(crate) fn release_detail(&self, id: &str) {
        self.release(&format!("entry:{id}"));
    }

    fn release(&self, key: &str) {
        if let Some(hold) = self.holds.lock().unwrap().get(key) {
            hold.gate.notify_one();
        }
    }

    /// Calls currently parked on a hold.
    pub(crate) fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Yield until `n` calls are parked on holds.
    pub(crate) async fn parked(&self, n: usize) {
        while self.waiting() < n {
            tokio::task::yield_now().await;
        }
    }

    pub(crate) fn streak_calls(&self) -> usize {
        self.streak.calls()
    }

    pub(crate) fn today_calls(&self) -> usize {
        self.today.calls()
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submit.calls()
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail.calls()
    }

    pub(crate) fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    pub(crate) fn requested_ids(&self) -> Vec<String> {
        self.requested_ids.lock().unwrap().clone()
    }

    async fn wait_if_held(&self, key: &str) {
        let gate = {
            let mut holds = self.holds.lock().unwrap();
            match holds.get_mut(key) {
                Some(hold) if hold.armed => {
                    hold.armed = false;
                    Some(hold.gate.clone())
                }
                _ => None,
            }
        };
        if let Some(gate) = gate {
            self.waiting.fetch_add(1, Ordering::SeqCst);
            gate.notified().await;
            self.waiting.fetch_sub(1, Ordering::SeqCst);
        }
    }

    async fn meet(&self) {
        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
    }
}

#[async_trait]
impl JournalBackend for ScriptedBackend {
    async fn get_streak(&self) -> Result<Payload> {
        self.meet().await;
        self.streak.next()
    }

    async fn get_today_entry(&self) -> Result<Payload> {
        if self.hang_today {
            std::future::pending::<()>().await;
        }
        self.wait_if_held("today").await;
        self.meet().await;
        self.today.next()
    }

    async fn submit_entry(&self, content: &str) -> Result<Payload> {
        self.submitted.lock().unwrap().push(content.to_string());
        self.submit.next()
    }

    async fn list_entries(&self) -> Result<Payload> {
        self.list.next()
    }

    async fn get_entry_by_id(&self, id: &str) -> Result<Payload> {
        self.requested_ids.lock().unwrap().push(id.to_string());
        self.wait_if_held(&format!("entry:{id}")).await;
        self.detail.next()
    }
}

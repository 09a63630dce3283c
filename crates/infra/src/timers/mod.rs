use skolero_domain::ID;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

struct TimerEntry {
    record_id: ID,
    handle: JoinHandle<()>,
}

/// Process wide table of live, not yet fired notification timers, keyed by
/// the owning user's email. Only the notification usecases mutate it; the
/// persisted notification store remains the source of truth and this table
/// is a rebuildable projection of it.
#[derive(Clone)]
pub struct TimerRegistry {
    timers: Arc<Mutex<HashMap<String, Vec<TimerEntry>>>>,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers a timer bound to the given notification record. After
    /// `delay` the timer removes its own handle from the registry and then
    /// runs `task`. If a concurrent `cancel_all` removed the handle first,
    /// the fire is treated as cancelled and `task` never runs.
    pub fn register<F>(&self, email: &str, record_id: ID, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timers = self.timers.clone();
        let task_email = email.to_string();
        let task_record_id = record_id.clone();

        // The table lock is held across spawn + insert so that a timer with
        // a zero delay cannot attempt to deregister before it is inserted.
        let mut table = self.timers.lock().unwrap();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if Self::deregister(&timers, &task_email, &task_record_id) {
                task.await;
            } else {
                debug!(
                    "Timer for notification {} of {} was cancelled while firing",
                    task_record_id, task_email
                );
            }
        });
        table.entry(email.to_string()).or_default().push(TimerEntry { record_id, handle });
    }

    /// Cancels every live timer for the user. Idempotent and a no-op for
    /// users without entries. Cancelling an already fired handle has no
    /// effect.
    pub fn cancel_all(&self, email: &str) {
        let mut table = self.timers.lock().unwrap();
        if let Some(entries) = table.remove(email) {
            debug!("Cancelling {} live timer(s) for {}", entries.len(), email);
            for entry in entries {
                entry.handle.abort();
            }
        }
    }

    /// Number of live timers for the user
    pub fn count(&self, email: &str) -> usize {
        let table = self.timers.lock().unwrap();
        table.get(email).map(|entries| entries.len()).unwrap_or(0)
    }

    /// The mutation lock for a user's chain. Every mutating chain operation
    /// must hold it for its whole duration: the engine itself does not
    /// serialize concurrent mutations of the same chain.
    pub fn user_lock(&self, email: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(email.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn deregister(
        timers: &Arc<Mutex<HashMap<String, Vec<TimerEntry>>>>,
        email: &str,
        record_id: &ID,
    ) -> bool {
        let mut table = timers.lock().unwrap();
        match table.get_mut(email) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|e| e.record_id != *record_id);
                let removed = entries.len() != before;
                if entries.is_empty() {
                    table.remove(email);
                }
                removed
            }
            None => false,
        }
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

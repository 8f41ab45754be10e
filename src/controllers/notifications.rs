use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub created: Instant,
}

/// Transient, non-blocking messages shown in the status bar.
#[derive(Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

const MAX_QUEUED: usize = 16;

impl Notifications {
    pub fn push(&self, kind: NotificationKind, text: impl Into<String>) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.push_back(Notification {
            kind,
            text: text.into(),
            created: Instant::now(),
        });
        while queue.len() > MAX_QUEUED {
            queue.pop_front();
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text)
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NotificationKind::Error, text)
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NotificationKind::Info, text)
    }

    /// Newest notification still younger than `ttl`.
    pub fn current(&self, ttl: Duration) -> Option<Notification> {
        let queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue
            .back()
            .filter(|n| n.created.elapsed() < ttl)
            .cloned()
    }

    pub fn prune(&self, ttl: Duration) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.retain(|n| n.created.elapsed() < ttl);
    }

    pub fn all(&self) -> Vec<Notification> {
        let queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

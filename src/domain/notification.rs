//! Bounded, most-recent-first notification log.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "SUCCESS"),
            NotificationKind::Warning => write!(f, "WARNING"),
            NotificationKind::Error => write!(f, "ERROR"),
            NotificationKind::Info => write!(f, "INFO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.kind,
            self.message
        )
    }
}

#[derive(Debug, Clone)]
pub struct NotificationSink {
    events: VecDeque<NotificationEvent>,
    capacity: usize,
    next_id: u64,
}

impl Default for NotificationSink {
    fn default() -> Self {
        NotificationSink::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationSink {
    /// A zero capacity is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        NotificationSink {
            events: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &NotificationEvent {
        let event = NotificationEvent {
            id: self.next_id,
            kind,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;
        self.events.push_front(event);
        self.events.truncate(self.capacity);
        &self.events[0]
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a banner stays up before it dismisses itself.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Severity of a banner. Maps onto the usual alert styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl NotificationLevel {
    /// Style class name for rendering, e.g. `alert-danger`.
    pub fn style(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "alert-success",
            NotificationLevel::Info => "alert-info",
            NotificationLevel::Warning => "alert-warning",
            NotificationLevel::Danger => "alert-danger",
        }
    }
}

/// A transient banner that auto-dismisses after `ttl`.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            created_at: Instant::now(),
            ttl: DEFAULT_DISMISS_AFTER,
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, body)
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title, body)
    }

    pub fn danger(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Danger, title, body)
    }

    /// Override the dismiss delay.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns `true` if this banner has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

/// A bounded queue of banners that auto-evicts dismissed entries.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
    dismiss_after: Duration,
}

impl NotificationQueue {
    /// Creates a new queue with the given maximum capacity and the default
    /// dismiss delay.
    pub fn new(capacity: usize) -> Self {
        Self::with_dismiss_after(capacity, DEFAULT_DISMISS_AFTER)
    }

    /// Creates a queue that stamps every pushed banner with `dismiss_after`.
    pub fn with_dismiss_after(capacity: usize, dismiss_after: Duration) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            dismiss_after,
        }
    }

    /// Pushes a banner, evicting dismissed entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notification: Notification) {
        self.evict_expired(Instant::now());
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification.with_ttl(self.dismiss_after));
    }

    /// Returns all banners that are still showing.
    pub fn visible(&mut self) -> Vec<&Notification> {
        self.visible_at(Instant::now())
    }

    pub fn visible_at(&mut self, now: Instant) -> Vec<&Notification> {
        self.evict_expired(now);
        self.items.iter().collect()
    }

    /// Closes every banner at once.
    pub fn dismiss_all(&mut self) {
        self.items.clear();
    }

    /// Number of banners in the queue (including ones past their TTL that
    /// have not been evicted yet).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired_at(now));
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

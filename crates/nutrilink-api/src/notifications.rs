//! Notification list, read state and polling.
//!
//! The feed is refreshed from the backend on a fixed interval. Marking items
//! read goes to the backend first and is mirrored locally only on success.
//! A failed poll is classified, reported and otherwise ignored: the previous
//! list stays visible.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use nutrilink_core::{NotificationId, Timestamp};
use nutrilink_feedback::{ErrorClassifier, ProcessedError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A notification as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Backend identifier
    pub id: NotificationId,
    /// Headline
    pub title: String,
    /// Body text
    pub message: String,
    /// Whether the user has seen it
    #[serde(default)]
    pub read: bool,
    /// Creation time
    pub created_at: Timestamp,
    /// Optional in-app link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Where notifications come from.
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Fetch the current notification list.
    async fn fetch(&self) -> Result<Vec<Notification>>;

    /// Mark one notification read.
    async fn mark_read(&self, id: &NotificationId) -> Result<()>;

    /// Mark every notification read.
    async fn mark_all_read(&self) -> Result<()>;
}

/// [`NotificationSource`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct NotificationService {
    client: ApiClient,
    page_size: u32,
}

impl NotificationService {
    /// Create a service over an API client.
    #[must_use]
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl NotificationSource for NotificationService {
    async fn fetch(&self) -> Result<Vec<Notification>> {
        self.client
            .get(&format!("notifications?limit={}", self.page_size))
            .await
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<()> {
        self.client
            .patch(&format!("notifications/{id}/read"), &serde_json::json!({}))
            .await
    }

    async fn mark_all_read(&self) -> Result<()> {
        self.client
            .patch("notifications/read-all", &serde_json::json!({}))
            .await
    }
}

/// Local notification list, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    /// Empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh fetch.
    pub fn replace(&mut self, mut items: Vec<Notification>) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.items = items;
    }

    /// Notifications, newest first.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Look up one notification.
    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| &n.id == id)
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read. Returns whether anything changed.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.items.iter_mut().find(|n| &n.id == id) {
            Some(item) if !item.read => {
                item.read = true;
                true
            }
            _ => false,
        }
    }

    /// Mark everything read. Returns how many items changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|n| !n.read) {
            item.read = true;
            changed += 1;
        }
        changed
    }
}

/// Outcome of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The feed was refreshed
    Updated {
        /// Unread count after the refresh
        unread: usize,
    },
    /// The fetch failed; the feed is unchanged
    Failed(ProcessedError),
}

/// Shortest accepted poll interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Keeps a [`NotificationFeed`] in sync with a [`NotificationSource`].
pub struct NotificationPoller<S> {
    source: Arc<S>,
    feed: Arc<RwLock<NotificationFeed>>,
    interval: Duration,
    classifier: ErrorClassifier,
}

impl<S: NotificationSource> NotificationPoller<S> {
    /// Create a poller. Intervals shorter than [`MIN_POLL_INTERVAL`] are
    /// raised to it.
    #[must_use]
    pub fn new(source: Arc<S>, interval: Duration, classifier: ErrorClassifier) -> Self {
        if interval < MIN_POLL_INTERVAL {
            warn!(
                requested = ?interval,
                "poll interval too short, using {}s",
                MIN_POLL_INTERVAL.as_secs()
            );
        }
        Self {
            source,
            feed: Arc::new(RwLock::new(NotificationFeed::new())),
            interval: interval.max(MIN_POLL_INTERVAL),
            classifier,
        }
    }

    /// Effective poll interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Shared handle to the feed.
    #[must_use]
    pub fn feed(&self) -> Arc<RwLock<NotificationFeed>> {
        Arc::clone(&self.feed)
    }

    /// Fetch once and replace the feed. Returns the unread count.
    pub async fn refresh(&self) -> std::result::Result<usize, ProcessedError> {
        let items = self.source.fetch().await.map_err(|e| self.report(&e))?;
        let mut feed = self.feed.write().await;
        feed.replace(items);
        let unread = feed.unread_count();
        debug!(total = feed.items().len(), unread, "notifications refreshed");
        Ok(unread)
    }

    /// Mark one notification read on the backend, then locally.
    pub async fn mark_read(&self, id: &NotificationId) -> std::result::Result<bool, ProcessedError> {
        self.source
            .mark_read(id)
            .await
            .map_err(|e| self.report(&e))?;
        Ok(self.feed.write().await.mark_read(id))
    }

    /// Mark everything read on the backend, then locally.
    pub async fn mark_all_read(&self) -> std::result::Result<usize, ProcessedError> {
        self.source
            .mark_all_read()
            .await
            .map_err(|e| self.report(&e))?;
        Ok(self.feed.write().await.mark_all_read())
    }

    /// Poll immediately and then every interval until `cancel` fires.
    pub async fn run<F>(&self, cancel: CancellationToken, mut on_event: F)
    where
        F: FnMut(PollEvent),
    {
        info!(interval_secs = self.interval.as_secs(), "notification polling started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let event = match self.refresh().await {
                        Ok(unread) => PollEvent::Updated { unread },
                        Err(error) => PollEvent::Failed(error),
                    };
                    on_event(event);
                }
            }
        }

        info!("notification polling stopped");
    }

    fn report(&self, err: &ApiError) -> ProcessedError {
        let processed = self.classifier.classify(&err.to_raw_failure());
        warn!(kind = %processed.kind(), "notification request failed: {}", err);
        processed
    }
}

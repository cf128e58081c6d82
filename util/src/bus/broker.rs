//! An in-process topic broker for byte payloads.
//!
//! Uses one Tokio broadcast channel per topic. It stands in for the real
//! pub/sub transport in tests and single-process deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::{RwLock, broadcast};

use super::{Transport, TransportError};

/// Type alias for topic name.
type Topic = String;

/// Sender for a topic's broadcast channel.
type Sender = broadcast::Sender<Bytes>;

/// Receiver for a topic's broadcast channel.
pub type Receiver = broadcast::Receiver<Bytes>;

/// Default per-topic buffer; slow receivers past this lag and skip messages.
pub const DEFAULT_CAPACITY: usize = 100;

/// Routes byte payloads to subscribers by exact topic name.
///
/// - Lazily creates a channel per topic on first subscription
/// - Removes a topic when a send finds it has no receivers left
/// - Sending to a topic nobody subscribed to reaches zero receivers
#[derive(Clone)]
pub struct TopicBroker {
    inner: Arc<RwLock<HashMap<Topic, Sender>>>,
    capacity: usize,
}

impl Default for TopicBroker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TopicBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a broker whose per-topic channels buffer `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Returns `true` if a channel currently exists for `topic`.
    pub async fn has_topic(&self, topic: &str) -> bool {
        self.inner.read().await.contains_key(topic)
    }

    /// Number of live receivers on `topic`.
    pub async fn receiver_count(&self, topic: &str) -> usize {
        self.inner
            .read()
            .await
            .get(topic)
            .map_or(0, |s| s.receiver_count())
    }
}

#[async_trait]
impl Transport for TopicBroker {
    async fn send(&self, topic: &str, payload: Bytes) -> Result<usize, TransportError> {
        if topic.is_empty() {
            return Err(TransportError::EmptyTopic);
        }

        let mut map = self.inner.write().await;
        let Some(sender) = map.get(topic) else {
            return Ok(0);
        };

        match sender.send(payload) {
            Ok(n) => Ok(n),
            Err(_) => {
                tracing::debug!(topic, "removing topic with no subscribers");
                map.remove(topic);
                Ok(0)
            }
        }
    }

    async fn subscribe(&self, topic: &str) -> Result<Receiver, TransportError> {
        if topic.is_empty() {
            return Err(TransportError::EmptyTopic);
        }

        let mut map = self.inner.write().await;
        Ok(map
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe())
    }
}

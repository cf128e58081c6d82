//! Byte-level publish/subscribe transport.
//!
//! [`Transport`] is the seam the publisher writes resolved topics to.
//! [`TopicBroker`] is the in-process implementation.

pub mod broker;
pub use broker::{Receiver, TopicBroker};

use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("topic must not be empty")]
    EmptyTopic,
}

/// A pub/sub transport addressed by plain topic strings.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Publishes `payload` on `topic`, returning how many receivers it reached.
    ///
    /// Reaching zero receivers is not an error.
    async fn send(&self, topic: &str, payload: Bytes) -> Result<usize, TransportError>;

    /// Opens a receiver for every payload subsequently sent on `topic`.
    async fn subscribe(&self, topic: &str) -> Result<Receiver, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, topic: &str, payload: Bytes) -> Result<usize, TransportError> {
        (**self).send(topic, payload).await
    }

    async fn subscribe(&self, topic: &str) -> Result<Receiver, TransportError> {
        (**self).subscribe(topic).await
    }
}

//! Publishing events from a hub source onto the transport.
//!
//! The resolver never logs; dropped and unheard events are logged here.

use bytes::Bytes;
use tracing::{debug, warn};
use util::bus::{Receiver, Transport};

use crate::context::Context;
use crate::error::PublishError;
use crate::event::CloudEvent;
use crate::resolver::SourceTopicResolver;

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// The caller's context with the resolved topic attached.
    pub context: Context,
    /// How many subscribers received the event.
    pub receivers: usize,
}

impl Published {
    pub fn topic(&self) -> &str {
        self.context.topic().unwrap_or_default()
    }
}

pub struct SourcePublisher<T> {
    resolver: SourceTopicResolver,
    transport: T,
}

impl<T: Transport> SourcePublisher<T> {
    pub fn new(resolver: SourceTopicResolver, transport: T) -> Self {
        Self {
            resolver,
            transport,
        }
    }

    pub fn resolver(&self) -> &SourceTopicResolver {
        &self.resolver
    }

    /// Resolves the event's topic, encodes it as CloudEvents JSON and sends it.
    ///
    /// Events that cannot be routed are never sent.
    pub async fn publish(&self, ctx: &Context, event: &CloudEvent) -> Result<Published, PublishError> {
        let context = match self.resolver.with_context(ctx, event) {
            Ok(context) => context,
            Err(e) => {
                warn!(event_id = %event.id, event_type = %event.ty, error = %e, "dropping unroutable event");
                return Err(e.into());
            }
        };
        let topic = context.topic().unwrap_or_default();

        let payload = Bytes::from(serde_json::to_vec(event)?);
        let receivers = self.transport.send(topic, payload).await?;

        if receivers == 0 {
            warn!(event_id = %event.id, topic, "event published with no subscribers");
        } else {
            debug!(event_id = %event.id, topic, receivers, "event published");
        }

        Ok(Published { context, receivers })
    }

    /// Opens a receiver on the spec topic of `cluster_name`.
    pub async fn subscribe_spec(&self, cluster_name: &str) -> Result<Receiver, PublishError> {
        let topic = crate::topics::spec_topic(self.resolver.source_id(), cluster_name);
        Ok(self.transport.subscribe(&topic).await?)
    }

    /// Opens a receiver on this source's status resync topic.
    pub async fn subscribe_status_resync(&self) -> Result<Receiver, PublishError> {
        let topic = crate::topics::status_resync_topic(self.resolver.source_id());
        Ok(self.transport.subscribe(&topic).await?)
    }
}

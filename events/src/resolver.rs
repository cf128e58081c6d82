//! Topic resolution for events a hub source publishes.
//!
//! Two shapes are routable:
//!
//! | sub-resource | action           | topic                                   |
//! |--------------|------------------|-----------------------------------------|
//! | `status`     | `resync_request` | `sources/{source}/clusters/statusresync` |
//! | `spec`       | any other        | `sources/{source}/clusters/{cluster}/spec` |
//!
//! Everything else is rejected. Resolution is a pure function of the source
//! id, the event type and the `clustername` extension.

use crate::context::Context;
use crate::error::ResolveError;
use crate::event::CloudEvent;
use crate::topics::{spec_topic, status_resync_topic};
use crate::types::{CloudEventsType, EventAction, SubResource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTopicResolver {
    source_id: String,
}

impl SourceTopicResolver {
    /// Rejects empty or whitespace-only ids, matching what `Config` accepts.
    pub fn new(source_id: impl Into<String>) -> Result<Self, ResolveError> {
        let source_id = source_id.into();
        if source_id.trim().is_empty() {
            return Err(ResolveError::EmptySourceId);
        }
        Ok(Self { source_id })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Derives the topic for an already decoded event type.
    ///
    /// `cluster_name` is only consulted for spec events.
    pub fn topic_for<F>(
        &self,
        event_type: &CloudEventsType,
        cluster_name: F,
    ) -> Result<String, ResolveError>
    where
        F: FnOnce() -> Option<String>,
    {
        match (&event_type.sub_resource, &event_type.action) {
            (SubResource::Status, EventAction::ResyncRequest) => {
                Ok(status_resync_topic(&self.source_id))
            }
            (SubResource::Spec, EventAction::Custom(_)) => match cluster_name() {
                Some(name) if !name.is_empty() => Ok(spec_topic(&self.source_id, &name)),
                _ => Err(ResolveError::MissingClusterName),
            },
            (sub_resource, action) => Err(ResolveError::UnsupportedEventShape {
                sub_resource: *sub_resource,
                action: action.clone(),
            }),
        }
    }

    /// Decodes the event's type and derives its topic.
    pub fn resolve_topic(&self, event: &CloudEvent) -> Result<String, ResolveError> {
        let event_type = event
            .event_type()
            .map_err(|source| ResolveError::UnsupportedType {
                event_type: event.ty.clone(),
                source,
            })?;

        self.topic_for(&event_type, || event.cluster_name())
    }

    /// Returns a copy of `ctx` carrying the event's topic.
    ///
    /// `ctx` itself is left untouched whether or not resolution succeeds.
    pub fn with_context(
        &self,
        ctx: &Context,
        event: &CloudEvent,
    ) -> Result<Context, ResolveError> {
        let topic = self.resolve_topic(event)?;
        Ok(ctx.with_topic(topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EXTENSION_CLUSTER_NAME;
    use crate::types::CloudEventsDataType;
    use serde_json::json;

    fn event(sub_resource: SubResource, action: EventAction) -> CloudEvent {
        let ty = CloudEventsType::new(CloudEventsDataType::manifests(), sub_resource, action);
        CloudEvent::new("e1", "hub1", ty.to_string())
    }

    fn resolver() -> SourceTopicResolver {
        SourceTopicResolver::new("hub1").unwrap()
    }

    #[test]
    fn empty_source_id_is_rejected() {
        for id in ["", "   ", "\t\n"] {
            assert_eq!(
                SourceTopicResolver::new(id).unwrap_err(),
                ResolveError::EmptySourceId
            );
        }
    }

    #[test]
    fn status_resync_ignores_extensions() {
        let bare = event(SubResource::Status, EventAction::ResyncRequest);
        let with_cluster = bare.clone().with_extension(EXTENSION_CLUSTER_NAME, "cluster1");

        for evt in [bare, with_cluster] {
            assert_eq!(
                resolver().resolve_topic(&evt).unwrap(),
                "sources/hub1/clusters/statusresync"
            );
        }
    }

    #[test]
    fn spec_topic_uses_cluster_name_for_any_custom_action() {
        for action in ["create_request", "update_request", "delete_request", "test"] {
            let evt = event(SubResource::Spec, EventAction::custom(action).unwrap())
                .with_extension(EXTENSION_CLUSTER_NAME, "cluster-a");
            assert_eq!(
                resolver().resolve_topic(&evt).unwrap(),
                "sources/hub1/clusters/cluster-a/spec"
            );
        }
    }

    #[test]
    fn spec_without_cluster_name_fails() {
        let evt = event(SubResource::Spec, EventAction::custom("test").unwrap());
        assert_eq!(
            resolver().resolve_topic(&evt).unwrap_err(),
            ResolveError::MissingClusterName
        );
    }

    #[test]
    fn spec_with_empty_cluster_name_fails() {
        let evt = event(SubResource::Spec, EventAction::custom("test").unwrap())
            .with_extension(EXTENSION_CLUSTER_NAME, "");
        assert_eq!(
            resolver().resolve_topic(&evt).unwrap_err(),
            ResolveError::MissingClusterName
        );
    }

    #[test]
    fn non_string_cluster_name_uses_its_string_form() {
        let evt = event(SubResource::Spec, EventAction::custom("test").unwrap())
            .with_extension(EXTENSION_CLUSTER_NAME, json!(42));
        assert_eq!(
            resolver().resolve_topic(&evt).unwrap(),
            "sources/hub1/clusters/42/spec"
        );
    }

    #[test]
    fn spec_resync_is_unsupported() {
        let evt = event(SubResource::Spec, EventAction::ResyncRequest)
            .with_extension(EXTENSION_CLUSTER_NAME, "cluster1");
        assert_eq!(
            resolver().resolve_topic(&evt).unwrap_err(),
            ResolveError::UnsupportedEventShape {
                sub_resource: SubResource::Spec,
                action: EventAction::ResyncRequest,
            }
        );
    }

    #[test]
    fn status_update_is_unsupported() {
        let evt = event(SubResource::Status, EventAction::custom("update_request").unwrap())
            .with_extension(EXTENSION_CLUSTER_NAME, "cluster1");
        assert!(matches!(
            resolver().resolve_topic(&evt),
            Err(ResolveError::UnsupportedEventShape {
                sub_resource: SubResource::Status,
                ..
            })
        ));
    }

    #[test]
    fn undecodable_type_is_unsupported() {
        let evt = CloudEvent::new("e1", "hub1", "unsupported");
        assert!(matches!(
            resolver().resolve_topic(&evt),
            Err(ResolveError::UnsupportedType { ref event_type, .. }) if event_type == "unsupported"
        ));
    }

    #[test]
    fn cluster_name_is_not_read_for_status_events() {
        let ty = CloudEventsType::new(
            CloudEventsDataType::manifests(),
            SubResource::Status,
            EventAction::ResyncRequest,
        );
        let topic = resolver()
            .topic_for(&ty, || panic!("cluster name looked up for status resync"))
            .unwrap();
        assert_eq!(topic, "sources/hub1/clusters/statusresync");
    }

    #[test]
    fn resolution_is_repeatable() {
        let evt = event(SubResource::Spec, EventAction::custom("test").unwrap())
            .with_extension(EXTENSION_CLUSTER_NAME, "cluster1");
        let r = resolver();
        assert_eq!(r.resolve_topic(&evt).unwrap(), r.resolve_topic(&evt).unwrap());
    }

    #[test]
    fn with_context_derives_a_new_context() {
        let ctx = Context::new().with_value("request-id", "42");
        let evt = event(SubResource::Status, EventAction::ResyncRequest);

        let derived = resolver().with_context(&ctx, &evt).unwrap();
        assert_eq!(derived.topic(), Some("sources/hub1/clusters/statusresync"));
        assert_eq!(derived.value("request-id"), Some("42"));
        assert_eq!(ctx.topic(), None);
    }

    #[test]
    fn resolver_can_be_shared_across_threads() {
        let r = std::sync::Arc::new(resolver());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let r = r.clone();
                std::thread::spawn(move || {
                    let evt = event(SubResource::Spec, EventAction::custom("test").unwrap())
                        .with_extension(EXTENSION_CLUSTER_NAME, format!("cluster{i}"));
                    (i, r.resolve_topic(&evt).unwrap())
                })
            })
            .collect();

        for h in handles {
            let (i, topic) = h.join().unwrap();
            assert_eq!(topic, format!("sources/hub1/clusters/cluster{i}/spec"));
        }
    }
}

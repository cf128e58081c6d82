//! Error types for event type parsing, topic resolution and publishing.
//!
//! [`ResolveError`] is what callers branch on: each variant is terminal for a
//! single resolution attempt and is never retried internally.

use util::bus::TransportError;

use crate::types::{EventAction, SubResource};

/// Why an event type string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTypeError {
    #[error("expected at least 5 dot-separated segments, found {0}")]
    TooFewSegments(usize),

    #[error("segment {0} is empty")]
    EmptySegment(usize),

    #[error("unsupported sub-resource `{0}`")]
    UnknownSubResource(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unsupported event type `{event_type}`: {source}")]
    UnsupportedType {
        event_type: String,
        #[source]
        source: ParseTypeError,
    },

    #[error("no topic for sub-resource `{sub_resource}` with action `{action}`")]
    UnsupportedEventShape {
        sub_resource: SubResource,
        action: EventAction,
    },

    #[error("spec event has no `clustername` extension")]
    MissingClusterName,

    #[error("source id must not be empty")]
    EmptySourceId,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

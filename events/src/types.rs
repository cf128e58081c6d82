//! CloudEvents type strings.
//!
//! An event type is encoded as
//! `<group>.<version>.<resource>.<subresource>.<action>`, for example
//! `io.open-cluster-management.works.v1alpha1.manifests.spec.create_request`.
//! The group may itself contain dots; the last four segments never do.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseTypeError;

const SEPARATOR: char = '.';

/// Reserved action token asking the receiver to republish its full state.
pub const RESYNC_REQUEST_ACTION: &str = "resync_request";

/// Identifies the kind of resource an event carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CloudEventsDataType {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl CloudEventsDataType {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// `io.open-cluster-management.works.v1alpha1.manifests`
    pub fn manifests() -> Self {
        Self::new("io.open-cluster-management.works", "v1alpha1", "manifests")
    }

    /// `io.open-cluster-management.works.v1alpha1.manifestbundles`
    pub fn manifest_bundles() -> Self {
        Self::new(
            "io.open-cluster-management.works",
            "v1alpha1",
            "manifestbundles",
        )
    }
}

impl fmt::Display for CloudEventsDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.group, self.version, self.resource)
    }
}

/// Which facet of a resource the event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubResource {
    /// Desired state, sent hub → cluster.
    Spec,
    /// Observed state, sent cluster → hub.
    Status,
}

impl SubResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubResource::Spec => "spec",
            SubResource::Status => "status",
        }
    }
}

impl fmt::Display for SubResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubResource {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(SubResource::Spec),
            "status" => Ok(SubResource::Status),
            other => Err(ParseTypeError::UnknownSubResource(other.to_string())),
        }
    }
}

/// An action token other than [`RESYNC_REQUEST_ACTION`].
///
/// Can only be built through [`CustomAction::new`], so a `Custom` action never
/// carries the reserved token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomAction(String);

impl CustomAction {
    /// Returns `None` for the reserved resync token, empty strings, or
    /// strings containing the segment separator.
    pub fn new(action: impl Into<String>) -> Option<Self> {
        let action = action.into();
        if action.is_empty() || action == RESYNC_REQUEST_ACTION || action.contains(SEPARATOR) {
            return None;
        }
        Some(Self(action))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventAction {
    ResyncRequest,
    Custom(CustomAction),
}

impl EventAction {
    /// Convenience for building a custom action in code; `None` on reserved
    /// or malformed tokens.
    pub fn custom(action: impl Into<String>) -> Option<Self> {
        CustomAction::new(action).map(EventAction::Custom)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventAction::ResyncRequest => RESYNC_REQUEST_ACTION,
            EventAction::Custom(a) => a.as_str(),
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded event type: what resource, which facet, and what happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CloudEventsType {
    pub data_type: CloudEventsDataType,
    pub sub_resource: SubResource,
    pub action: EventAction,
}

impl CloudEventsType {
    pub fn new(data_type: CloudEventsDataType, sub_resource: SubResource, action: EventAction) -> Self {
        Self {
            data_type,
            sub_resource,
            action,
        }
    }
}

impl fmt::Display for CloudEventsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.data_type, self.sub_resource, self.action)
    }
}

impl FromStr for CloudEventsType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(SEPARATOR).collect();
        let len = segments.len();
        if len < 5 {
            return Err(ParseTypeError::TooFewSegments(len));
        }
        if let Some(i) = segments.iter().position(|seg| seg.is_empty()) {
            return Err(ParseTypeError::EmptySegment(i));
        }

        let sub_resource: SubResource = segments[len - 2].parse()?;
        let action = match segments[len - 1] {
            RESYNC_REQUEST_ACTION => EventAction::ResyncRequest,
            // non-empty and dot-free, checked above
            other => EventAction::Custom(CustomAction(other.to_string())),
        };

        Ok(CloudEventsType {
            data_type: CloudEventsDataType {
                group: segments[..len - 4].join("."),
                version: segments[len - 4].to_string(),
                resource: segments[len - 3].to_string(),
            },
            sub_resource,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_spec_type() {
        let t: CloudEventsType =
            "io.open-cluster-management.works.v1alpha1.manifests.spec.create_request"
                .parse()
                .unwrap();

        assert_eq!(t.data_type, CloudEventsDataType::manifests());
        assert_eq!(t.sub_resource, SubResource::Spec);
        assert_eq!(t.action, EventAction::custom("create_request").unwrap());
    }

    #[test]
    fn reserved_token_decodes_to_resync_request() {
        let t: CloudEventsType = "io.example.v1.widgets.status.resync_request"
            .parse()
            .unwrap();
        assert_eq!(t.sub_resource, SubResource::Status);
        assert_eq!(t.action, EventAction::ResyncRequest);
        assert_eq!(t.data_type.group, "io.example");
    }

    #[test]
    fn encoded_type_parses_back_to_itself() {
        let t = CloudEventsType::new(
            CloudEventsDataType::manifest_bundles(),
            SubResource::Status,
            EventAction::ResyncRequest,
        );
        let encoded = t.to_string();
        assert_eq!(
            encoded,
            "io.open-cluster-management.works.v1alpha1.manifestbundles.status.resync_request"
        );
        assert_eq!(encoded.parse::<CloudEventsType>().unwrap(), t);
    }

    #[test]
    fn rejects_short_type_strings() {
        assert_eq!(
            "unsupported".parse::<CloudEventsType>().unwrap_err(),
            ParseTypeError::TooFewSegments(1)
        );
        assert_eq!(
            "v1.widgets.spec.create".parse::<CloudEventsType>().unwrap_err(),
            ParseTypeError::TooFewSegments(4)
        );
    }

    #[test]
    fn rejects_unknown_sub_resource() {
        assert_eq!(
            "io.example.v1.widgets.metadata.update"
                .parse::<CloudEventsType>()
                .unwrap_err(),
            ParseTypeError::UnknownSubResource("metadata".into())
        );
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(
            "io.example.v1.widgets.spec."
                .parse::<CloudEventsType>()
                .unwrap_err(),
            ParseTypeError::EmptySegment(5)
        );
        assert_eq!(
            "io..v1.widgets.spec.update"
                .parse::<CloudEventsType>()
                .unwrap_err(),
            ParseTypeError::EmptySegment(1)
        );
    }

    #[test]
    fn custom_action_refuses_reserved_and_malformed_tokens() {
        assert!(CustomAction::new(RESYNC_REQUEST_ACTION).is_none());
        assert!(CustomAction::new("").is_none());
        assert!(CustomAction::new("a.b").is_none());
        assert_eq!(CustomAction::new("test").unwrap().as_str(), "test");
    }
}

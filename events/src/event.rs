//! CloudEvents descriptor in JSON structured mode.
//!
//! Only the attributes routing and publishing need are modelled; any other
//! top-level member is kept as an extension attribute.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseTypeError;
use crate::types::CloudEventsType;

pub const SPEC_VERSION: &str = "1.0";

/// Extension naming the managed cluster an event is addressed to or from.
pub const EXTENSION_CLUSTER_NAME: &str = "clustername";
/// Extension carrying the resource's stable identifier.
pub const EXTENSION_RESOURCE_ID: &str = "resourceid";
/// Extension carrying the resource version the event was produced from.
pub const EXTENSION_RESOURCE_VERSION: &str = "resourceversion";
/// Extension naming the source a status event answers.
pub const EXTENSION_ORIGINAL_SOURCE: &str = "originalsource";
/// Extension set when the resource is being deleted.
pub const EXTENSION_DELETION_TIMESTAMP: &str = "deletiontimestamp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudEvent {
    #[serde(rename = "specversion")]
    pub spec_version: String,
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(
        rename = "datacontenttype",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl CloudEvent {
    pub fn new(id: impl Into<String>, source: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            id: id.into(),
            source: source.into(),
            ty: ty.into(),
            data_content_type: None,
            time: None,
            data: None,
            extensions: BTreeMap::new(),
        }
    }

    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data_content_type = Some("application/json".to_string());
        self.data = Some(data);
        self
    }

    /// Decodes the `type` attribute.
    pub fn event_type(&self) -> Result<CloudEventsType, ParseTypeError> {
        self.ty.parse()
    }

    /// String form of a scalar extension attribute.
    ///
    /// Arrays, objects and nulls are not valid CloudEvents extension values
    /// and read as absent.
    pub fn extension(&self, name: &str) -> Option<String> {
        match self.extensions.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn cluster_name(&self) -> Option<String> {
        self.extension(EXTENSION_CLUSTER_NAME)
    }
}

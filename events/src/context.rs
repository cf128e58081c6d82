//! Request-scoped values carried alongside an event.
//!
//! A [`Context`] is never changed in place; every `with_*` call returns a
//! derived copy, so a context handed to the resolver stays as the caller
//! left it.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    topic: Option<String>,
    values: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topic the transport should publish to or subscribe from.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn with_topic(&self, topic: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived.topic = Some(topic.into());
        derived
    }

    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut derived = self.clone();
        derived.values.insert(key.into(), value.into());
        derived
    }
}

//! Topic resolution and publishing for CloudEvents sent from a hub to its
//! managed clusters.

pub mod batch;
pub mod context;
pub mod error;
pub mod event;
pub mod publisher;
pub mod resolver;
pub mod topics;
pub mod types;

pub use context::Context;
pub use error::{ParseTypeError, PublishError, ResolveError};
pub use event::CloudEvent;
pub use publisher::{Published, SourcePublisher};
pub use resolver::SourceTopicResolver;
pub use types::{CloudEventsDataType, CloudEventsType, CustomAction, EventAction, SubResource};

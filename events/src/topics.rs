//! Topic names a hub source publishes on.
//!
//! Both live under `sources/{source_id}/clusters/`, so subscribers never need
//! wildcard matching to tell spec delivery from status resync.

/// Per-cluster channel carrying resource specs from the hub.
pub fn spec_topic(source_id: &str, cluster_name: &str) -> String {
    format!("sources/{source_id}/clusters/{cluster_name}/spec")
}

/// Cluster-agnostic channel for status resync requests.
pub fn status_resync_topic(source_id: &str) -> String {
    format!("sources/{source_id}/clusters/statusresync")
}

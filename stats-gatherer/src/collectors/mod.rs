//! # Collectors
//!
//! Each collector fetches one kind of document and stores it in the cycle's
//! [`CollectionContext`](crate::context::CollectionContext):
//!
//! - **`cluster_health`**, **`cluster_stats`**, **`indices_stats`**: asked from the first admin node only
//! - **`nodes`**, **`nodes_stats`**: asked from every admin node, to compare their views
//! - **`proxy_status`**: asked from every proxy
//!
//! A node that cannot be reached leaves a failure marker in its place; it never stops the
//! remaining collectors.

pub mod collector;
pub mod endpoint_collector;

pub use collector::Collector;
pub use endpoint_collector::{
    default_collectors,
    EndpointCollector,
    Scope,
};

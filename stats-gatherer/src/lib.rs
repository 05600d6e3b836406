//! # find monitor stats gatherer
//!
//! Polls a search cluster's admin API and the proxies in front of it and turns the answers
//! into a handful of gauges.
//!
//! ## Architecture
//!
//! One cycle runs in three stages over a fresh [`CollectionContext`]:
//!
//! - **`collectors`**: fetch `_cluster/health`, `_cluster/stats`, `_nodes/stats`, `_nodes`,
//!   `_all/_stats` and the proxies' `/` through the [`Fetcher`]
//! - **`parsers`**: derive index totals, cluster splits and proxy availability
//! - **`dispatch`**: deliver the values, as collectd PUTVAL lines and optionally a JSON snapshot
//!
//! The [`Orchestrator`] wires the stages together. A node that cannot be reached only costs
//! the metrics that depend on it.

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod orchestrator;
pub mod parsers;

pub use collectors::Collector;
pub use context::{
    CollectionContext,
    CollectionKey,
    Fetched,
    Slot,
};
pub use dispatch::Dispatcher;
pub use fetcher::Fetcher;
pub use metrics::*;
pub use orchestrator::{
    CycleReport,
    Orchestrator,
};
pub use parsers::Parser;

//! # Parsers
//!
//! Parsers turn the documents of a cycle into gauges. They run in a fixed order and
//! append to a single results list:
//!
//! 1. **`indices_totals`**: `find.indices_count`, `find.docs_count`, `find.store_size`,
//!    `find.queries_current`, `find.indexing_current`
//! 2. **`cluster_splits`**: `find.splits`
//! 3. **`proxy_status`**: `find.proxies_available`, `find.proxies_missing`

pub mod cluster_splits;
pub mod indices_totals;
pub mod parser;
pub mod proxy_status;

pub use cluster_splits::ClusterSplitsParser;
pub use indices_totals::IndicesTotalsParser;
pub use parser::Parser;
pub use proxy_status::ProxyStatusParser;

/// The parsers of one cycle, in the order they run.
pub fn default_parsers() -> Vec<Box<dyn Parser>> {
    vec![
        Box::new(IndicesTotalsParser),
        Box::new(ClusterSplitsParser),
        Box::new(ProxyStatusParser),
    ]
}

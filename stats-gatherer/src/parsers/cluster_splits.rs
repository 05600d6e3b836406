use crate::{
    context::{
        CollectionContext,
        CollectionKey,
        Fetched,
    },
    error::ParseError,
    metrics::{
        MetricName,
        MetricValue,
    },
    parsers::Parser,
};
use find_monitor_config::EndpointSet;
use serde_json::Value;

/// Number of views of the cluster beyond the first one.
///
/// Views are compared structurally, so object key order does not matter. Unreachable nodes
/// are left out of the comparison. No nodes at all means no split; nodes that all failed
/// to answer is an error rather than an all-clear.
pub fn count_splits(views: &[Fetched]) -> Result<u64, ParseError> {
    if views.is_empty() {
        return Ok(0);
    }

    let mut distinct: Vec<&Value> = Vec::new();
    for view in views.iter().flatten() {
        if !distinct.contains(&view) {
            distinct.push(view);
        }
    }

    match distinct.len() {
        0 => Err(ParseError::NoReachableNodes(CollectionKey::Nodes)),
        n => Ok(n as u64 - 1),
    }
}

/// Detects admin nodes that disagree on what the cluster looks like.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterSplitsParser;

impl Parser for ClusterSplitsParser {
    fn parse(
        &self,
        ctx: &CollectionContext,
        endpoints: &EndpointSet,
        out: &mut Vec<MetricValue>,
    ) -> Result<(), ParseError> {
        let views = ctx.per_host(CollectionKey::Nodes)?;
        let unreachable: Vec<_> = views
            .iter()
            .zip(endpoints.admin_urls())
            .filter(|(view, _)| view.is_none())
            .map(|(_, url)| url.as_str())
            .collect();
        if !unreachable.is_empty() && unreachable.len() < views.len() {
            warn!(?unreachable, "Leaving unreachable nodes out of the split comparison");
        }

        let splits = count_splits(views)?;
        if splits > 0 {
            debug!(splits, nodes = views.len(), "Admin nodes report different cluster views");
        }
        out.push(MetricValue::gauge(MetricName::Splits, splits));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cluster_splits"
    }
}

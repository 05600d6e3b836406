use crate::{
    context::CollectionContext,
    error::ParseError,
    metrics::MetricValue,
};
use find_monitor_config::EndpointSet;

/// Derives metric values from the documents of one cycle.
///
/// A parser either appends all of its values or returns an error; callers drop whatever a
/// failing parser appended before giving up.
pub trait Parser: Send + Sync {
    fn parse(
        &self,
        ctx: &CollectionContext,
        endpoints: &EndpointSet,
        out: &mut Vec<MetricValue>,
    ) -> Result<(), ParseError>;

    fn name(&self) -> &'static str;
}

mod shared;

pub use shared::*;
use serde::Serialize;

/// One derived reading, produced by a parser and delivered by every dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricValue {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub name: MetricName,
    pub value: u64,
}

impl MetricValue {
    pub fn gauge(name: MetricName, value: u64) -> Self {
        Self {
            metric_type: MetricType::Gauge,
            name,
            value,
        }
    }
}

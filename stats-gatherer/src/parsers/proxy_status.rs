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

const STATUS_OK: u64 = 200;

/// The integer-like `status` field of a proxy's answer.
pub fn status_code(doc: &Value) -> Option<u64> {
    match doc.get("status")? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn is_available(answer: &Fetched) -> bool {
    answer.as_ref().and_then(status_code) == Some(STATUS_OK)
}

/// Counts the proxies that answer with status 200.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProxyStatusParser;

impl Parser for ProxyStatusParser {
    fn parse(
        &self,
        ctx: &CollectionContext,
        endpoints: &EndpointSet,
        out: &mut Vec<MetricValue>,
    ) -> Result<(), ParseError> {
        let answers = ctx.per_host(CollectionKey::ProxyStatus)?;
        for (answer, url) in answers.iter().zip(endpoints.proxy_urls()) {
            if let Some(doc) = answer {
                if status_code(doc).is_none() {
                    warn!(%url, "Proxy answered without a usable status");
                }
            }
        }

        let available = answers.iter().filter(|answer| is_available(answer)).count() as u64;
        let configured = endpoints.proxy_urls().len() as u64;
        out.push(MetricValue::gauge(MetricName::ProxiesAvailable, available));
        out.push(MetricValue::gauge(
            MetricName::ProxiesMissing,
            configured.saturating_sub(available),
        ));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "proxy_status"
    }
}

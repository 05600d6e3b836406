use crate::{
    context::{
        CollectionContext,
        CollectionKey,
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

/// Infrastructure indices that hold no user data.
const ADMIN_INDICES: &[&str] = &["@admin", "meta", "runners"];
/// Suffixes of the indices that back individual features.
const FEATURE_SUFFIXES: &[&str] = &["__stats", "__admin"];

const BYTES_PER_MEGABYTE: u64 = 1_000_000;

/// Whether `name` is counted in the totals.
pub fn is_user_index(name: &str) -> bool {
    !ADMIN_INDICES.contains(&name) && !FEATURE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Sums over every user index of `_all/_stats`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndicesTotals {
    pub indices_count: u64,
    pub docs_count: u64,
    /// Megabytes, each index truncated on its own.
    pub store_size: u64,
    pub queries_current: u64,
    pub indexing_current: u64,
}

impl IndicesTotals {
    pub fn from_indices_stats(doc: &Value) -> Result<Self, ParseError> {
        let indices = doc
            .get("indices")
            .and_then(Value::as_object)
            .ok_or_else(|| ParseError::InvalidField {
                key: CollectionKey::IndicesStats,
                path: "indices".to_string(),
            })?;

        let mut totals = Self::default();
        for (name, stats) in indices.iter().filter(|(name, _)| is_user_index(name)) {
            totals.add_index(name, stats)?;
        }
        Ok(totals)
    }

    fn add_index(&mut self, name: &str, stats: &Value) -> Result<(), ParseError> {
        let docs = field(name, stats, "/total/docs/count")?;
        let bytes = field(name, stats, "/total/store/size_in_bytes")?;
        let queries = field(name, stats, "/total/search/query_current")?;
        let indexing = field(name, stats, "/total/indexing/index_current")?;

        self.indices_count += 1;
        self.docs_count = self.docs_count.saturating_add(docs);
        self.store_size = self.store_size.saturating_add(bytes / BYTES_PER_MEGABYTE);
        self.queries_current = self.queries_current.saturating_add(queries);
        self.indexing_current = self.indexing_current.saturating_add(indexing);
        Ok(())
    }

    pub fn values(&self) -> [MetricValue; 5] {
        [
            MetricValue::gauge(MetricName::IndicesCount, self.indices_count),
            MetricValue::gauge(MetricName::DocsCount, self.docs_count),
            MetricValue::gauge(MetricName::StoreSize, self.store_size),
            MetricValue::gauge(MetricName::QueriesCurrent, self.queries_current),
            MetricValue::gauge(MetricName::IndexingCurrent, self.indexing_current),
        ]
    }
}

fn field(index: &str, stats: &Value, pointer: &str) -> Result<u64, ParseError> {
    stats
        .pointer(pointer)
        .and_then(Value::as_u64)
        .ok_or_else(|| ParseError::InvalidField {
            key: CollectionKey::IndicesStats,
            path: format!("indices.{index}{}", pointer.replace('/', ".")),
        })
}

/// Document, size and activity totals of the user indices.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndicesTotalsParser;

impl Parser for IndicesTotalsParser {
    fn parse(
        &self,
        ctx: &CollectionContext,
        _endpoints: &EndpointSet,
        out: &mut Vec<MetricValue>,
    ) -> Result<(), ParseError> {
        let totals = IndicesTotals::from_indices_stats(ctx.single(CollectionKey::IndicesStats)?)?;
        out.extend(totals.values());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "indices_totals"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn index(docs: u64, bytes: u64, queries: u64, indexing: u64) -> Value {
        json!({
            "primaries": { "docs": { "count": docs } },
            "total": {
                "docs": { "count": docs },
                "store": { "size_in_bytes": bytes },
                "search": { "query_current": queries },
                "indexing": { "index_current": indexing },
            }
        })
    }

    #[test]
    fn skips_administrative_and_feature_indices() {
        for name in ["@admin", "meta", "runners", "orders__stats", "orders__admin"] {
            assert!(!is_user_index(name), "{name}");
        }
        for name in ["orders", "meta2", "admin", "stats__orders", "__stats_x"] {
            assert!(is_user_index(name), "{name}");
        }
    }

    #[test]
    fn totals_only_count_user_indices() {
        let doc = json!({
            "_all": {},
            "indices": {
                "data1": index(10, 2_000_000, 1, 2),
                "@admin": index(5, 9_000_000, 7, 7),
                "data1__stats": index(3, 1_000_000, 7, 7),
            }
        });
        assert_eq!(
            IndicesTotals::from_indices_stats(&doc).unwrap(),
            IndicesTotals {
                indices_count: 1,
                docs_count: 10,
                store_size: 2,
                queries_current: 1,
                indexing_current: 2,
            }
        );
    }

    #[test]
    fn store_size_truncates_to_whole_megabytes() {
        let doc = json!({ "indices": { "data": index(0, 2_999_999, 0, 0) } });
        assert_eq!(IndicesTotals::from_indices_stats(&doc).unwrap().store_size, 2);

        let doc = json!({ "indices": { "a": index(0, 1_500_000, 0, 0), "b": index(0, 1_500_000, 0, 0) } });
        assert_eq!(IndicesTotals::from_indices_stats(&doc).unwrap().store_size, 2);
    }

    #[test]
    fn a_malformed_user_index_fails_the_parser() {
        let doc = json!({
            "indices": {
                "good": index(1, 0, 0, 0),
                "bad": { "total": { "docs": { "count": 1 } } },
            }
        });
        assert_eq!(
            IndicesTotals::from_indices_stats(&doc),
            Err(ParseError::InvalidField {
                key: CollectionKey::IndicesStats,
                path: "indices.bad.total.store.size_in_bytes".to_string(),
            })
        );
    }

    #[test]
    fn malformed_skipped_indices_are_ignored() {
        let doc = json!({ "indices": { "meta": {}, "data": index(4, 0, 0, 0) } });
        assert_eq!(IndicesTotals::from_indices_stats(&doc).unwrap().docs_count, 4);
    }

    #[test]
    fn missing_indices_object_is_an_error() {
        assert!(IndicesTotals::from_indices_stats(&json!({ "_shards": {} })).is_err());
    }

    #[test]
    fn emits_five_gauges_in_order() {
        let mut ctx = CollectionContext::new();
        ctx.insert(
            CollectionKey::IndicesStats,
            crate::context::Slot::Single(Some(json!({ "indices": { "data": index(3, 4_000_000, 5, 6) } }))),
        )
        .unwrap();
        let mut out = Vec::new();
        IndicesTotalsParser
            .parse(&ctx, &EndpointSet::new(vec![], vec![]), &mut out)
            .unwrap();
        let emitted: Vec<_> = out.iter().map(|v| (v.name.as_str(), v.value)).collect();
        assert_eq!(
            emitted,
            [
                ("find.indices_count", 1),
                ("find.docs_count", 3),
                ("find.store_size", 4),
                ("find.queries_current", 5),
                ("find.indexing_current", 6),
            ]
        );
    }

    #[test]
    fn failed_fetch_is_reported_not_zeroed() {
        let mut ctx = CollectionContext::new();
        ctx.insert(CollectionKey::IndicesStats, crate::context::Slot::Single(None))
            .unwrap();
        let mut out = Vec::new();
        assert_eq!(
            IndicesTotalsParser.parse(&ctx, &EndpointSet::new(vec![], vec![]), &mut out),
            Err(ParseError::Unavailable(CollectionKey::IndicesStats))
        );
        assert!(out.is_empty());
    }
}

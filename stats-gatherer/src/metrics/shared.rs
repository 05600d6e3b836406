use serde::Serialize;

/// Kind of a reported value. Everything this plugin reports is an instantaneous reading.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Gauge,
}

impl MetricType {
    pub fn metric_type_str(&self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
        }
    }
}

/// Every value name the parsers can produce.
#[derive(
    Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
pub enum MetricName {
    #[serde(rename = "find.indices_count")]
    #[strum(serialize = "find.indices_count")]
    IndicesCount,
    #[serde(rename = "find.docs_count")]
    #[strum(serialize = "find.docs_count")]
    DocsCount,
    #[serde(rename = "find.store_size")]
    #[strum(serialize = "find.store_size")]
    StoreSize,
    #[serde(rename = "find.queries_current")]
    #[strum(serialize = "find.queries_current")]
    QueriesCurrent,
    #[serde(rename = "find.indexing_current")]
    #[strum(serialize = "find.indexing_current")]
    IndexingCurrent,
    #[serde(rename = "find.splits")]
    #[strum(serialize = "find.splits")]
    Splits,
    #[serde(rename = "find.proxies_available")]
    #[strum(serialize = "find.proxies_available")]
    ProxiesAvailable,
    #[serde(rename = "find.proxies_missing")]
    #[strum(serialize = "find.proxies_missing")]
    ProxiesMissing,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator as _;

    #[test]
    fn names_share_the_plugin_prefix_and_match_serde() {
        for name in MetricName::iter() {
            assert!(name.as_str().starts_with("find."), "{name}");
            assert_eq!(serde_json::to_value(name).unwrap(), name.as_str());
        }
        assert_eq!(MetricName::iter().count(), 8);
    }
}

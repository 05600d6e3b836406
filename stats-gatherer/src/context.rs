use crate::error::{
    ContextError,
    ParseError,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Names of the documents gathered during one cycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CollectionKey {
    ClusterHealth,
    ClusterStats,
    Nodes,
    NodesStats,
    IndicesStats,
    ProxyStatus,
}

/// A decoded document, `None` when the fetch failed.
pub type Fetched = Option<Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    /// Answer of a single node.
    Single(Fetched),
    /// One answer per endpoint, in endpoint order.
    PerHost(Vec<Fetched>),
}

impl Slot {
    fn kind(&self) -> &'static str {
        match self {
            Slot::Single(_) => "a single document",
            Slot::PerHost(_) => "a per-host list",
        }
    }
}

/// Documents gathered during one cycle. Every key is written at most once.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CollectionContext {
    slots: BTreeMap<CollectionKey, Slot>,
}

impl CollectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: CollectionKey, slot: Slot) -> Result<(), ContextError> {
        if self.slots.contains_key(&key) {
            return Err(ContextError::AlreadyCollected(key));
        }
        self.slots.insert(key, slot);
        Ok(())
    }

    pub fn get(&self, key: CollectionKey) -> Option<&Slot> {
        self.slots.get(&key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The document stored under `key`, failing if it was never collected or the fetch failed.
    pub fn single(&self, key: CollectionKey) -> Result<&Value, ParseError> {
        match self.slots.get(&key) {
            None => Err(ParseError::NotCollected(key)),
            Some(Slot::Single(Some(value))) => Ok(value),
            Some(Slot::Single(None)) => Err(ParseError::Unavailable(key)),
            Some(other) => Err(ParseError::WrongShape {
                key,
                expected: "a single document",
                found: other.kind(),
            }),
        }
    }

    /// The per-host answers stored under `key`. Individual entries may be failure markers.
    pub fn per_host(&self, key: CollectionKey) -> Result<&[Fetched], ParseError> {
        match self.slots.get(&key) {
            None => Err(ParseError::NotCollected(key)),
            Some(Slot::PerHost(values)) => Ok(values),
            Some(other) => Err(ParseError::WrongShape {
                key,
                expected: "a per-host list",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_written_once() {
        let mut ctx = CollectionContext::new();
        ctx.insert(CollectionKey::ClusterHealth, Slot::Single(None)).unwrap();
        assert_eq!(
            ctx.insert(CollectionKey::ClusterHealth, Slot::Single(Some(json!({})))),
            Err(ContextError::AlreadyCollected(CollectionKey::ClusterHealth))
        );
        assert_eq!(ctx.get(CollectionKey::ClusterHealth), Some(&Slot::Single(None)));
    }

    #[test]
    fn typed_access_reports_why_a_document_is_unusable() {
        let mut ctx = CollectionContext::new();
        ctx.insert(CollectionKey::IndicesStats, Slot::Single(None)).unwrap();
        ctx.insert(CollectionKey::Nodes, Slot::PerHost(vec![None])).unwrap();

        assert_eq!(
            ctx.single(CollectionKey::IndicesStats),
            Err(ParseError::Unavailable(CollectionKey::IndicesStats))
        );
        assert_eq!(
            ctx.single(CollectionKey::ClusterStats),
            Err(ParseError::NotCollected(CollectionKey::ClusterStats))
        );
        assert!(matches!(
            ctx.single(CollectionKey::Nodes),
            Err(ParseError::WrongShape { .. })
        ));
        assert_eq!(ctx.per_host(CollectionKey::Nodes).unwrap(), &[None]);
    }

    #[test]
    fn keys_display_as_snake_case() {
        assert_eq!(CollectionKey::NodesStats.to_string(), "nodes_stats");
        assert_eq!(CollectionKey::ProxyStatus.to_string(), "proxy_status");
    }
}

use crate::{
    dispatch::Dispatcher,
    error::DispatchError,
    metrics::MetricValue,
};
use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    cluster: &'a str,
    collected_at: DateTime<Utc>,
    values: &'a [MetricValue],
}

/// Keeps the values of the latest cycle as a pretty-printed JSON file.
#[derive(Debug)]
pub struct JsonFileDispatcher {
    path: PathBuf,
    cluster_name: String,
    pending: Vec<MetricValue>,
}

impl JsonFileDispatcher {
    pub fn new(path: impl Into<PathBuf>, cluster_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cluster_name: cluster_name.into(),
            pending: Vec::new(),
        }
    }
}

impl Dispatcher for JsonFileDispatcher {
    fn deliver(&mut self, value: &MetricValue) -> Result<(), DispatchError> {
        self.pending.push(*value);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DispatchError> {
        let values = std::mem::take(&mut self.pending);
        let snapshot = Snapshot {
            cluster: &self.cluster_name,
            collected_at: Utc::now(),
            values: &values,
        };
        let json_string = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, json_string)?;
        debug!(path = ?self.path, values = values.len(), "Snapshot written");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

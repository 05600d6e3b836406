use crate::{
    dispatch::Dispatcher,
    error::DispatchError,
    metrics::MetricValue,
};
use find_monitor_config::Config;
use std::io::{
    self,
    Write,
};

/// Plugin part of every identifier.
pub const PLUGIN: &str = "find";

/// Writes values in the text protocol of collectd's exec plugin:
///
/// ```text
/// PUTVAL "<host>/find-<cluster>/gauge-find.docs_count" interval=60 N:1234
/// ```
pub struct PutvalDispatcher<W> {
    writer: W,
    host: String,
    plugin_instance: String,
    interval: u64,
}

impl PutvalDispatcher<io::Stdout> {
    pub fn stdout(config: &Config) -> Self {
        Self::new(io::stdout(), &config.hostname, &config.cluster_name, config.interval)
    }
}

impl<W: Write> PutvalDispatcher<W> {
    pub fn new(writer: W, host: &str, cluster_name: &str, interval: u64) -> Self {
        Self {
            writer,
            host: identifier_part(host),
            plugin_instance: identifier_part(cluster_name),
            interval,
        }
    }

    pub fn line(&self, value: &MetricValue) -> String {
        format!(
            "PUTVAL \"{}/{PLUGIN}-{}/{}-{}\" interval={} N:{}",
            self.host,
            self.plugin_instance,
            value.metric_type.metric_type_str(),
            value.name,
            self.interval,
            value.value
        )
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Identifier parts are separated by `/` and the whole identifier is quoted.
fn identifier_part(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '"' | '\\' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

impl<W: Write + Send + Sync> Dispatcher for PutvalDispatcher<W> {
    fn deliver(&mut self, value: &MetricValue) -> Result<(), DispatchError> {
        let line = self.line(value);
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DispatchError> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "putval"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricName;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_one_putval_line_per_value() {
        let mut dispatcher = PutvalDispatcher::new(Vec::new(), "mon1", "elasticsearch", 60);
        dispatcher
            .deliver(&MetricValue::gauge(MetricName::DocsCount, 1234))
            .unwrap();
        dispatcher
            .deliver(&MetricValue::gauge(MetricName::ProxiesMissing, 0))
            .unwrap();
        dispatcher.flush().unwrap();

        let output = String::from_utf8(dispatcher.into_inner()).unwrap();
        assert_eq!(
            output,
            "PUTVAL \"mon1/find-elasticsearch/gauge-find.docs_count\" interval=60 N:1234\n\
             PUTVAL \"mon1/find-elasticsearch/gauge-find.proxies_missing\" interval=60 N:0\n"
        );
    }

    #[test]
    fn separators_in_names_are_replaced() {
        let dispatcher = PutvalDispatcher::new(Vec::new(), "mon 1", "prod/eu\"west", 30);
        assert_eq!(
            dispatcher.line(&MetricValue::gauge(MetricName::Splits, 1)),
            "PUTVAL \"mon_1/find-prod_eu_west/gauge-find.splits\" interval=30 N:1"
        );
    }
}

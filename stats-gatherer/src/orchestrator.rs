use crate::{
    collectors::{
        default_collectors,
        Collector,
    },
    context::CollectionContext,
    dispatch::{
        default_dispatchers,
        Dispatcher,
    },
    fetcher::Fetcher,
    metrics::MetricValue,
    parsers::{
        default_parsers,
        Parser,
    },
};
use eyre::Result;
use find_monitor_config::{
    Config,
    EndpointSet,
};
use std::time::{
    Duration,
    Instant,
};

/// Outcome of one collection cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Every value handed to the dispatchers, in emission order.
    pub values: Vec<MetricValue>,
    /// Parsers whose values were skipped this cycle.
    pub failed_parsers: Vec<&'static str>,
    pub failed_deliveries: usize,
    pub elapsed: Duration,
}

/// Runs collectors, parsers and dispatchers, in that order, once per cycle.
///
/// `run_cycle` takes `&mut self`, so one orchestrator never runs two cycles at once.
pub struct Orchestrator {
    endpoints: EndpointSet,
    fetcher: Fetcher,
    collectors: Vec<Box<dyn Collector>>,
    parsers: Vec<Box<dyn Parser>>,
    dispatchers: Vec<Box<dyn Dispatcher>>,
    verbose: bool,
}

impl Orchestrator {
    /// Create a new orchestrator with the standard collectors, parsers and dispatchers
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_dispatchers(
            config.endpoints()?,
            Fetcher::new()?,
            default_dispatchers(config),
            config.verbose,
        ))
    }

    pub fn with_dispatchers(
        endpoints: EndpointSet,
        fetcher: Fetcher,
        dispatchers: Vec<Box<dyn Dispatcher>>,
        verbose: bool,
    ) -> Self {
        Self {
            endpoints,
            fetcher,
            collectors: default_collectors(),
            parsers: default_parsers(),
            dispatchers,
            verbose,
        }
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// Runs every collector in order. Every slot is assigned when this returns.
    pub async fn collect(&self) -> CollectionContext {
        let mut ctx = CollectionContext::new();
        for collector in &self.collectors {
            let started = Instant::now();
            if let Err(error) = collector.collect(&self.fetcher, &self.endpoints, &mut ctx).await {
                error!(collector = collector.name(), %error, "Collector failed");
            }
            trace!(collector = collector.name(), elapsed = ?started.elapsed(), "Collector done");
        }
        ctx
    }

    /// Runs every parser in order. A failing parser contributes no values; the others still do.
    pub fn parse(&self, ctx: &CollectionContext) -> (Vec<MetricValue>, Vec<&'static str>) {
        let mut values = Vec::new();
        let mut failed = Vec::new();
        for parser in &self.parsers {
            let mut produced = Vec::new();
            match parser.parse(ctx, &self.endpoints, &mut produced) {
                Ok(()) => values.append(&mut produced),
                Err(error) => {
                    error!(parser = parser.name(), %error, "Skipping metrics of parser");
                    failed.push(parser.name());
                }
            }
        }
        (values, failed)
    }

    /// Hands every value to every dispatcher, in order. Returns the number of failed deliveries.
    pub fn dispatch(&mut self, values: &[MetricValue]) -> usize {
        if self.verbose {
            for value in values {
                info!(
                    "Sending value[{}]: {}={}",
                    value.metric_type.metric_type_str(),
                    value.name,
                    value.value
                );
            }
        }

        let mut failed = 0;
        for dispatcher in &mut self.dispatchers {
            for value in values {
                if let Err(error) = dispatcher.deliver(value) {
                    error!(dispatcher = dispatcher.name(), metric = %value.name, %error, "Delivery failed");
                    failed += 1;
                }
            }
            if let Err(error) = dispatcher.flush() {
                error!(dispatcher = dispatcher.name(), %error, "Flush failed");
                failed += 1;
            }
        }
        failed
    }

    /// One full collect, parse and dispatch pass.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let started = Instant::now();
        let ctx = self.collect().await;
        let (values, failed_parsers) = self.parse(&ctx);
        drop(ctx);
        let failed_deliveries = self.dispatch(&values);

        let report = CycleReport {
            values,
            failed_parsers,
            failed_deliveries,
            elapsed: started.elapsed(),
        };
        debug!(
            values = report.values.len(),
            failed_parsers = ?report.failed_parsers,
            failed_deliveries = report.failed_deliveries,
            elapsed = ?report.elapsed,
            "Cycle finished"
        );
        report
    }
}

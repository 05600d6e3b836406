use clap::Parser;
use std::path::PathBuf;

/// Polls a search cluster and its proxies and prints health gauges as collectd PUTVAL lines.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Configuration file to read instead of `config.yaml` in the config directory.
    #[clap(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cluster name, reported as the plugin instance.
    #[clap(long, value_name = "NAME")]
    pub cluster_name: Option<String>,

    /// Cluster hostname. Repeat once per node; replaces the configured list.
    #[clap(long = "cluster-node", value_name = "HOST")]
    pub cluster_nodes: Vec<String>,

    /// Seconds between collection cycles.
    #[clap(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Host part of the PUTVAL identifier.
    #[clap(long, env = "COLLECTD_HOSTNAME", value_name = "HOST")]
    pub hostname: Option<String>,

    /// Also write a JSON snapshot of every cycle to this file.
    #[clap(long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Log every value before it is sent.
    #[clap(long, short, action)]
    pub verbose: bool,

    /// Run a single collection cycle and exit.
    #[clap(long, action)]
    pub once: bool,

    /// Print the effective configuration as YAML and exit.
    #[clap(long = "dump-config", action)]
    pub dump_config: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(cluster_name) = &self.cluster_name {
                cache.insert("cluster_name".to_string(), cluster_name.clone().into());
            }
            if !self.cluster_nodes.is_empty() {
                cache.insert("cluster_nodes".to_string(), self.cluster_nodes.clone().into());
            }
            if let Some(interval) = self.interval {
                cache.insert("interval".to_string(), interval.into());
            }
            if let Some(hostname) = &self.hostname {
                cache.insert("hostname".to_string(), hostname.clone().into());
            }
            if let Some(output_file) = &self.output_file {
                cache.insert("output_file".to_string(), output_file.display().to_string().into());
            }
            if self.verbose {
                cache.insert("verbose".to_string(), true.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "{}

Authors: {author}
Config directory: {config_dir_path}",
        clap::crate_version!()
    )
}

#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod endpoints;

pub use app_config::get_config_dir;
pub use args::Args;
use color_eyre::Result;
pub use endpoints::{
    EndpointSet,
    ADMIN_PORT,
    PROXY_PORT,
};
use eyre::Context as _;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

const KNOWN_KEYS: &[&str] = &[
    "cluster_name",
    "cluster_nodes",
    "verbose",
    "interval",
    "hostname",
    "output_file",
];

/// Settings fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub cluster_name: String,
    pub cluster_nodes: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
    /// Seconds between collection cycles.
    pub interval: u64,
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration for the given command line.
    ///
    /// Without `--config` the file `config.yaml` in [`get_config_dir`] is used if it exists.
    pub fn new(args: Args) -> Result<Self> {
        match args.config.clone() {
            Some(path) => Self::load(&path, true, args),
            None => Self::load(&get_config_dir().join("config.yaml"), false, args),
        }
    }

    /// Layers the built-in defaults, `config_file`, `FIND_MONITOR_*` environment variables and
    /// `args`, in increasing precedence.
    ///
    /// `FIND_MONITOR_CONFIG_DIR` also matches the prefix; it only locates the file and its
    /// `config_dir` key is ignored during deserialization.
    pub fn load(config_file: &Path, required: bool, args: Args) -> Result<Self> {
        let file = config::File::from(config_file)
            .format(config::FileFormat::Yaml)
            .required(required);
        warn_unknown_keys(&file, config_file);

        let builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("FIND_MONITOR")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cluster_nodes"),
            )
            .add_source(args);

        let cfg: Self = builder
            .build()
            .and_then(|raw| raw.try_deserialize())
            .wrap_err_with(|| format!("Failed to load configuration (file {:?})", config_file))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.cluster_nodes.is_empty() {
            eyre::bail!("cluster_nodes must name at least one host");
        }
        if self.interval == 0 {
            eyre::bail!("interval must be at least one second");
        }
        self.endpoints().map(|_| ())
    }

    /// Admin and proxy URLs derived from `cluster_nodes`.
    pub fn endpoints(&self) -> Result<EndpointSet> {
        EndpointSet::from_hosts(&self.cluster_nodes)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize config")
    }
}

/// Top-level keys of `source` that no setting reads, sorted.
fn unknown_keys(source: &impl config::Source) -> Vec<String> {
    let keys = match source.collect() {
        Ok(keys) => keys,
        // Reported with more context when the configuration is built.
        Err(_) => return Vec::new(),
    };
    let mut unknown: Vec<_> = keys.into_keys().filter(|key| !KNOWN_KEYS.contains(&key.as_str())).collect();
    unknown.sort();
    unknown
}

fn warn_unknown_keys(file: &impl config::Source, path: &Path) {
    for key in unknown_keys(file) {
        warn!(%key, file = ?path, "Unknown config key");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use temp_dir::TempDir;

    fn load_with(yaml: Option<&str>, args: Args) -> Result<Config> {
        let dir = TempDir::new().map_err(|e| eyre::eyre!(e))?;
        let path = dir.child("config.yaml");
        if let Some(yaml) = yaml {
            std::fs::write(&path, yaml)?;
        }
        Config::load(&path, false, args)
    }

    #[test]
    fn defaults_without_file_or_args() {
        let cfg = load_with(None, Args::default()).unwrap();
        assert_eq!(
            cfg,
            Config {
                cluster_name: "elasticsearch".to_string(),
                cluster_nodes: vec!["localhost".to_string()],
                verbose: false,
                interval: 60,
                hostname: "localhost".to_string(),
                output_file: None,
            }
        );
        assert_eq!(cfg.interval(), Duration::from_secs(60));
    }

    #[test]
    fn file_overrides_defaults_and_args_override_file() {
        let yaml = "cluster_name: find-prod\ncluster_nodes: [es1, es2, es3]\ninterval: 30\n";
        let args = Args {
            interval: Some(10),
            verbose: true,
            ..Default::default()
        };
        let cfg = load_with(Some(yaml), args).unwrap();
        assert_eq!(cfg.cluster_name, "find-prod");
        assert_eq!(cfg.cluster_nodes, ["es1", "es2", "es3"]);
        assert_eq!(cfg.interval, 10);
        assert!(cfg.verbose);
    }

    #[test]
    fn cluster_nodes_from_args_replace_the_list() {
        let args = Args {
            cluster_nodes: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        };
        let cfg = load_with(Some("cluster_nodes: [x, y, z]\n"), args).unwrap();
        assert_eq!(cfg.cluster_nodes, ["a", "b"]);
        let endpoints = cfg.endpoints().unwrap();
        assert_eq!(endpoints.admin_urls().len(), 2);
        assert_eq!(endpoints.proxy_urls()[1].as_str(), "http://b:8000/");
    }

    #[test]
    fn unknown_keys_are_not_fatal() {
        let cfg = load_with(Some("cluster_name: c1\nColor: blue\n"), Args::default()).unwrap();
        assert_eq!(cfg.cluster_name, "c1");
    }

    #[test]
    fn unknown_keys_are_detected() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("config.yaml");
        std::fs::write(&path, "cluster_name: c1\nColor: blue\n").unwrap();
        let file = config::File::from(path.as_path()).format(config::FileFormat::Yaml);
        assert_eq!(unknown_keys(&file), ["Color"]);

        std::fs::write(&path, "cluster_name: c1\ninterval: 5\n").unwrap();
        assert!(unknown_keys(&file).is_empty());
    }

    #[test]
    fn rejects_empty_node_list_and_zero_interval() {
        assert!(load_with(Some("cluster_nodes: []\n"), Args::default()).is_err());
        assert!(load_with(Some("interval: 0\n"), Args::default()).is_err());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(&dir.child("absent.yaml"), true, Args::default()).is_err());
    }

    #[test]
    fn yaml_dump_round_trips_through_the_loader() {
        let cfg = load_with(Some("cluster_name: dump\noutput_file: /tmp/find.json\n"), Args::default()).unwrap();
        let dumped = cfg.to_yaml().unwrap();
        assert_eq!(load_with(Some(&dumped), Args::default()).unwrap(), cfg);
    }
}

pub mod dispatcher;
pub mod json_file;
pub mod putval;

pub use dispatcher::Dispatcher;
use find_monitor_config::Config;
pub use json_file::JsonFileDispatcher;
pub use putval::PutvalDispatcher;

/// PUTVAL lines on stdout, plus the JSON snapshot when `output_file` is set.
pub fn default_dispatchers(config: &Config) -> Vec<Box<dyn Dispatcher>> {
    let mut dispatchers: Vec<Box<dyn Dispatcher>> = vec![Box::new(PutvalDispatcher::stdout(config))];
    if let Some(path) = &config.output_file {
        dispatchers.push(Box::new(JsonFileDispatcher::new(path, config.cluster_name.clone())));
    }
    dispatchers
}

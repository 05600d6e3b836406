#[macro_use]
extern crate tracing;

mod app;
mod logging;

pub use app::App;
pub use find_monitor_config::Args;
pub use logging::{
    init_errors,
    init_logging,
};

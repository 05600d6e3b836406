use clap::Parser;
use color_eyre::Result;
use find_monitor::{
    init_errors,
    init_logging,
    App,
    Args,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    init_logging()?;
    App::new(Args::parse())?.run().await
}

use color_eyre::Result;
use find_monitor_config::{
    Args,
    Config,
};
use find_monitor_stats_gatherer::Orchestrator;
use tokio::time::{
    interval,
    MissedTickBehavior,
};

pub struct App {
    config: Config,
    once: bool,
    dump_config: bool,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let once = args.once;
        let dump_config = args.dump_config;
        Ok(Self {
            config: Config::new(args)?,
            once,
            dump_config,
        })
    }

    /// Runs a cycle right away and then once per interval until interrupted.
    ///
    /// Cycles never overlap: a tick that falls due while a cycle is still running is skipped.
    pub async fn run(self) -> Result<()> {
        if self.dump_config {
            print!("{}", self.config.to_yaml()?);
            return Ok(());
        }

        info!("find plugin started with interval = {} seconds", self.config.interval);
        info!(
            "find plugin cluster {:?} nodes {:?}",
            self.config.cluster_name, self.config.cluster_nodes
        );
        info!("find plugin verbose logging = {}", self.config.verbose);

        let mut orchestrator = Orchestrator::new(&self.config)?;
        debug!(endpoints = ?orchestrator.endpoints(), "Endpoints derived");

        if self.once {
            orchestrator.run_cycle().await;
            return Ok(());
        }

        let period = self.config.interval();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Registered once so a Ctrl-C during a cycle ends the loop once that cycle is done.
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                // Polled first so the handler is installed before the first cycle starts.
                biased;
                result = &mut ctrl_c => {
                    result?;
                    info!("Interrupted, stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let report = orchestrator.run_cycle().await;
                    if report.elapsed > period {
                        warn!(elapsed = ?report.elapsed, ?period, "Cycle took longer than the interval, skipping missed ticks");
                    }
                }
            }
        }
        Ok(())
    }
}

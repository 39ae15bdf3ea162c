use crate::reports;
use clap::{ArgMatches, Args};
use std::path::PathBuf;
use tracing::info;
use vowelforge::config::SimConfig;
use vowelforge::error::SimResult;
use vowelforge::events::TracingObserver;
use vowelforge::game::runner::{ProgressCallback, Runner};
use vowelforge::game::RunSummary;
use vowelforge::snapshot::CsvSink;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// CSV file to write snapshots to
    pub output: PathBuf,

    #[command(flatten)]
    pub config: SimConfig,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_run_complete(&self, summary: &RunSummary) {
        info!(
            "run {} done: {:.1}% successful games, {:.2} vowels per agent",
            summary.run,
            summary.success_rate() * 100.0,
            summary.mean_inventory_size()
        );
    }
}

pub fn run(args: RunArgs, params: Option<&str>, matches: &ArgMatches) -> SimResult<()> {
    let config = match params {
        Some(path) => {
            info!("Loading parameters from: {}", path);
            let mut file_config = SimConfig::load_from_file(path)?;
            file_config.merge_from_cli(&args.config, matches);
            file_config
        }
        None => args.config,
    };

    // Validation happens here, before the output file is touched.
    let runner = Runner::new(&config)?;
    let mut sink = CsvSink::create(&args.output)?;

    let summaries = runner.execute(&mut sink, TracingObserver, &LogProgress)?;

    reports::print_run_summaries(&summaries);
    info!("Snapshots written to {}", args.output.display());
    Ok(())
}

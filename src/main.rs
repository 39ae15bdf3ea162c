use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Vowel system emergence in a population of imitating agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON parameter file; options given on the command line take precedence
    #[arg(global = true, long)]
    params: Option<String>,

    /// Report inventory additions, removals and merges
    #[arg(global = true, short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the imitation game and write inventory snapshots to CSV
    Run(cmd::run::RunArgs),
    /// Print synthesised formants for reference or custom articulations
    Synth(cmd::synth::SynthArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => {
            let sub_matches = matches.subcommand_matches("run").unwrap_or(&matches);
            cmd::run::run(args, cli.params.as_deref(), sub_matches)
        }
        Commands::Synth(args) => cmd::synth::run(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

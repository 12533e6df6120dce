mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use commands::sync::SyncArgs;

#[derive(Parser)]
#[command(name = "tinycal-holiday")]
#[command(about = "Mark Chinese public holidays and makeup workdays in TinyCal's calendars")]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Update one year's calendar files (the default when no command is given)
    Sync(SyncArgs),
    /// Show where configuration and calendars are read from
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Sync(args)) => commands::sync::run(args).await,
        Some(Commands::Config) => commands::config::run(),
        None => commands::sync::run(SyncArgs::default()).await,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

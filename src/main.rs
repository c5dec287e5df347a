mod commands;
mod publish;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fridaycal")]
#[command(about = "Publish the Bandcamp Friday dates as an iCalendar subscription")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the calendar file from the date list
    Generate {
        /// Date list (TOML)
        #[arg(short, long, default_value = "dates.toml")]
        dates: PathBuf,

        /// Where to write the calendar
        #[arg(short, long, default_value = "bandcamp-friday.ics")]
        output: PathBuf,

        /// Keep every event already published in the output file
        #[arg(long)]
        merge_existing: bool,

        /// Print the calendar instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// Validate the date list without writing anything
    Check {
        /// Date list (TOML)
        #[arg(short, long, default_value = "dates.toml")]
        dates: PathBuf,
    },
    /// Show the events of a published calendar file
    List {
        /// Calendar file (.ics)
        file: PathBuf,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            dates,
            output,
            merge_existing,
            stdout,
        } => commands::generate::run(&dates, &output, merge_existing, stdout),
        Commands::Check { dates } => commands::check::run(&dates),
        Commands::List { file, json } => commands::list::run(&file, json),
    }
}

/// Log to stderr so `--stdout` output stays a clean calendar document
fn init_logging(verbose: bool) {
    let default_level = if verbose { "fridaycal=debug,fridaycal_core=debug" } else { "fridaycal=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

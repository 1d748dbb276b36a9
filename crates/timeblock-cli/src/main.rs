use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "timeblock", version, about = "Timeblock CLI")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule / reschedule task lines
    Schedule {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Convert normalized lines back to informal task lines
    Unschedule {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Reorder task lines by completion marker
    Resort {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Schedule { file } => commands::schedule::run(file.as_deref()).await,
        Commands::Unschedule { file } => commands::unschedule::run(file.as_deref()),
        Commands::Resort { file } => commands::resort::run(file.as_deref()),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, sheep::SheepSubcommand, sleep::SleepSubcommand,
    wool::WoolSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sheepify",
    about = "Sleep better, earn sheep — a shepherd game driven by your nights",
    version,
    propagate_version = true
)]
struct Cli {
    /// Farm root (default: auto-detect from .sheepify/ or .git/)
    #[arg(long, global = true, env = "SHEEPIFY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a sheepify farm in the current project
    Init {
        /// Shepherd display name (defaults to your OS username)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the farm at a glance: streak, wool, flock, penalty
    Status,

    /// Track nights: start, wake, log, history, stats
    Sleep {
        #[command(subcommand)]
        subcommand: SleepSubcommand,
    },

    /// Manage the flock
    Sheep {
        #[command(subcommand)]
        subcommand: SheepSubcommand,
    },

    /// Wool balance, spending, and ledger
    Wool {
        #[command(subcommand)]
        subcommand: WoolSubcommand,
    },

    /// Clear accumulated bad-night debt
    PenaltyReset,

    /// Show or validate the farm configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Have Shleepy comment on your latest night
    Mascot {
        /// Also synthesize speech and write the audio to this file
        #[arg(long)]
        voice: Option<PathBuf>,
    },

    /// Run the JSON API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3141")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Sleep { subcommand } => cmd::sleep::run(&root, subcommand, cli.json),
        Commands::Sheep { subcommand } => cmd::sheep::run(&root, subcommand, cli.json),
        Commands::Wool { subcommand } => cmd::wool::run(&root, subcommand, cli.json),
        Commands::PenaltyReset => cmd::penalty::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Mascot { voice } => cmd::mascot::run(&root, voice.as_deref(), cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

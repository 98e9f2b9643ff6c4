//! TanDist CLI - offline host for the TanDist distortion.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tandist")]
#[command(author, version, about = "TanDist tanh distortion", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config, then built-in defaults)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show plugin metadata, the parameter list, and the effective config
    Info(commands::info::InfoArgs),

    /// Process a WAV file through the distortion
    Process(commands::process::ProcessArgs),

    /// Print the static transfer curve tanh(x * gain²)
    Curve(commands::curve::CurveArgs),

    /// Show or initialize the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Info(args) => commands::info::run(args, config),
        Commands::Process(args) => commands::process::run(args, config),
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Config(args) => commands::config::run(args, config),
    }
}

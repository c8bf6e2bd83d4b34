mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flow", about = "Geotagged 3D photo gallery tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a photo's dimensions and GPS location
    Info(commands::info::InfoArgs),
    /// Lay out a folder of photos and print their positions
    Layout(commands::layout::LayoutArgs),
    /// Simulate focusing one photo and print the animated positions
    Focus(commands::focus::FocusArgs),
    /// Print or save the default gallery config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Layout(args) => commands::layout::run(args),
        Commands::Focus(args) => commands::focus::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

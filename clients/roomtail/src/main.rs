//! Roomtail CLI Entry Point
//!
//! This is the main entry point for the roomtail binary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use roomtail::bundle::manifest::BundleManifest;
use roomtail::cli::config::Config;
use roomtail::connection::listener::RoomListener;
use roomtail::connection::sink::ConsoleSink;

#[derive(Parser)]
#[command(name = "roomtail")]
#[command(author, version, about = "Roomtail - WebSocket room feed listener")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the configured server and log its messages
    Listen,
    /// Show the bundle plan from a manifest
    Manifest {
        /// Path to the bundle manifest
        #[arg(short, long, default_value = "bundle.toml")]
        path: PathBuf,

        /// Validate the manifest before printing it
        #[arg(long)]
        check: bool,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Listen => {
            listen(&cli.config).await?;
        }
        Commands::Manifest { path, check } => {
            show_manifest(&path, check)?;
        }
        Commands::Version => {
            show_version();
        }
    }

    Ok(())
}

async fn listen(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    info!(url = %config.websocket_server, "Configuration loaded");

    let listener = RoomListener::new(&config.websocket_server);
    let mut sink = ConsoleSink;
    listener.run(&mut sink).await
}

fn show_manifest(path: &Path, check: bool) -> Result<()> {
    let manifest = BundleManifest::load(path)?;

    if check {
        manifest.validate()?;
        println!("Manifest OK: {}", path.display());
    }

    for (name, source) in &manifest.entry {
        println!(
            "  {}: {} -> {}",
            name,
            source.display(),
            manifest.output_path(name).display()
        );
    }
    println!("  watch: {}", manifest.watch);
    println!("  resolve: {}", manifest.resolve.extensions.join(", "));

    Ok(())
}

fn show_version() {
    println!("roomtail {}", env!("CARGO_PKG_VERSION"));
    println!("WebSocket room feed listener");
}

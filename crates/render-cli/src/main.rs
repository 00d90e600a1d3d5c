//! Bootstrap renderer CLI
//!
//! Renders controller manager bootstrap manifests and the merged runtime
//! configuration from a template tree and layered configuration overlays.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::Result;
use render_core::EmbeddedAssets;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    cli.validate()?;

    let opts = cli.to_render_opts();
    render_core::render(&opts, &EmbeddedAssets::new())?;
    Ok(())
}

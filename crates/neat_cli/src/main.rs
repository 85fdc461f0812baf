//! Neat Buttons CLI
//!
//! Mount the showcase headlessly, replay scenario scripts against it, and
//! inspect the artwork catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use neat_widgets::{Showcase, Snapshot};

mod config;
mod script;

use config::NeatConfig;
use script::Action;

#[derive(Parser)]
#[command(name = "neat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Neat Buttons headless showcase", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./neat.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the showcase view models as JSON
    Show {
        /// Let the page animate for this long first
        #[arg(long, default_value = "0")]
        advance_ms: u64,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Replay a scenario script, printing a frame after each step
    Run {
        /// Script file
        script: PathBuf,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the artwork catalog
    Catalog,

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = NeatConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Show { advance_ms, pretty } => cmd_show(&config, advance_ms, pretty),
        Commands::Run { script, pretty } => cmd_run(&config, &script, pretty),
        Commands::Catalog => cmd_catalog(&config),
        Commands::Config => cmd_config(&config),
    }
}

fn mount(config: &NeatConfig) -> Result<Showcase> {
    Ok(Showcase::new(config.showcase()?, config.measurer()))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn cmd_show(config: &NeatConfig, advance_ms: u64, pretty: bool) -> Result<()> {
    let mut showcase = mount(config)?;
    if advance_ms > 0 {
        showcase.advance(Duration::from_millis(advance_ms));
    }
    let snapshot: Snapshot = showcase.snapshot();
    print_json(&snapshot, pretty)?;
    showcase.unmount();
    Ok(())
}

fn cmd_run(config: &NeatConfig, path: &Path, pretty: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let steps = script::parse(&source)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    info!("Running {} ({} steps)", path.display(), steps.len());

    let mut showcase = mount(config)?;
    for (index, step) in steps.iter().enumerate() {
        match &step.action {
            Action::Input { widget, event } => showcase.dispatch(*widget, event),
            Action::Advance(dt) => showcase.advance(*dt),
        }

        let effects: Vec<serde_json::Value> = showcase
            .take_effects()
            .into_iter()
            .map(|(widget, effect)| serde_json::json!({ "widget": widget, "effect": effect }))
            .collect();

        print_json(
            &serde_json::json!({
                "step": index + 1,
                "line": step.line,
                "command": step.source,
                "effects": effects,
                "snapshot": showcase.snapshot(),
            }),
            pretty,
        )?;
    }
    showcase.unmount();

    info!("Done");
    Ok(())
}

fn cmd_catalog(config: &NeatConfig) -> Result<()> {
    let catalog = config.load_catalog()?;
    for (index, artwork) in catalog.iter().enumerate() {
        println!("{index:>3}  {}  by {}", artwork.title, artwork.creator_name);
        if artwork.has_image() {
            println!("     {}", artwork.image_url);
        }
    }
    info!("{} artworks", catalog.len());
    Ok(())
}

fn cmd_config(config: &NeatConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

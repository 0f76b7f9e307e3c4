//! Collection view inspector
//!
//! Loads a collection configuration (TOML or JSON), resolves it for an actor
//! and prints the table widget configuration, per-row actions and toolbar
//! state as JSON.
//!
//! Usage:
//!   colview products.toml --actor alice --role editor --records rows.json --select p1

use anyhow::Result;
use clap::Parser;
use colview_cli::{inspect, load_records};
use colview_core::LayoutWidth;
use colview_model::{Actor, CollectionConfiguration};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "colview")]
#[command(about = "Inspect how a collection configuration resolves for an actor")]
struct Args {
    /// Collection configuration file (.toml or .json)
    config: PathBuf,

    /// Actor id permission rules are evaluated against
    #[arg(short, long, default_value = "anonymous")]
    actor: String,

    /// Actor roles (repeatable)
    #[arg(short, long = "role")]
    roles: Vec<String>,

    /// JSON array of records to resolve row actions for
    #[arg(long)]
    records: Option<PathBuf>,

    /// Record ids to select before resolving the toolbar (repeatable)
    #[arg(short, long = "select")]
    selected: Vec<String>,

    /// Resolve the toolbar for a wide layout
    #[arg(long)]
    wide: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = CollectionConfiguration::load_from(&args.config)?;
    let records = match &args.records {
        Some(path) => load_records(&config, path)?,
        None => Vec::new(),
    };
    info!(records = records.len(), selected = args.selected.len(), "Resolving collection view");

    let actor = Actor {
        id: args.actor,
        roles: args.roles,
    };
    let layout = if args.wide {
        LayoutWidth::Wide
    } else {
        LayoutWidth::Narrow
    };

    let report = inspect(config, actor, &records, &args.selected, layout)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

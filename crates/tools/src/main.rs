use std::fs;
use std::path::PathBuf;

use catalog::DatasetCatalog;
use clap::Parser;
use explorer::{ExplorerConfig, ExplorerSession};
use tools::{parse_arguments, parse_script, run_script};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drive a TerraVision explorer session from the command line and print the
/// resulting state as JSON.
#[derive(Debug, Parser)]
#[command(name = "terravision", version)]
struct Args {
    /// JSON session config (layers, tab, region, years, cloud cover, sensors).
    #[arg(long, env = "TERRAVISION_CONFIG")]
    config: Option<PathBuf>,

    /// JSON dataset catalog replacing the built-in one.
    #[arg(long, env = "TERRAVISION_CATALOG")]
    catalog: Option<PathBuf>,

    /// Print the effective dataset catalog and exit.
    #[arg(long)]
    print_catalog: bool,

    /// Script file with one command per line.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `layers=debug`. Defaults to `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective config and exit.
    #[arg(long)]
    print_config: bool,

    /// Commands applied after the script, each as one quoted argument,
    /// e.g. "toggle satellite on" "reorder osm satellite".
    commands: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => ExplorerConfig::load(path).map_err(|e| e.to_string())?,
        None => ExplorerConfig::default(),
    };

    if args.print_config {
        println!("{}", config.to_json_pretty().map_err(|e| e.to_string())?);
        return Ok(());
    }

    let mut session = ExplorerSession::from_config(&config);
    if let Some(path) = &args.catalog {
        let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
        let catalog = DatasetCatalog::from_json(&raw).map_err(|e| format!("{path:?}: {e}"))?;
        info!(path = %path.display(), datasets = catalog.len(), "loaded dataset catalog");
        session = session.with_catalog(catalog);
    }

    if args.print_catalog {
        let json = session.catalog().to_json().map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    let (mut commands, script_lines) = match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            let parsed = parse_script(&text).map_err(|e| format!("{path:?}: {e}"))?;
            (parsed, text.lines().count())
        }
        None => (Vec::new(), 0),
    };
    let extra = parse_arguments(&args.commands, script_lines + 1)
        .map_err(|e| format!("argument {e}"))?;
    commands.extend(extra);

    let report = run_script(&mut session, &commands).map_err(|e| e.to_string())?;

    for event in session.drain_events() {
        info!(revision = event.revision.0, kind = event.kind, "{}", event.message);
    }

    let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

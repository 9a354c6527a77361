//! Traffic rule management CLI.
//!
//! ```text
//! traffic-rule --config traffic-rule.toml show
//! traffic-rule --config traffic-rule.toml alter --delta delta.toml [--dry-run]
//! traffic-rule --config traffic-rule.toml watch
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use traffic_rule::alter::PersistStatus;
use traffic_rule::config::watcher::{apply_reloads, ConfigWatcher};
use traffic_rule::config::{load_config, load_delta};
use traffic_rule::lifecycle::signals::shutdown_on_ctrl_c;
use traffic_rule::lifecycle::{bootstrap, Runtime, Shutdown};
use traffic_rule::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "traffic-rule")]
#[command(about = "Inspect and alter the proxy traffic rule", long_about = None)]
struct Cli {
    /// Application config file.
    #[arg(short, long, default_value = "traffic-rule.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the active traffic rule
    Show,
    /// Apply an alteration request
    Alter {
        /// TOML document with a [[segments]] array
        #[arg(short, long)]
        delta: PathBuf,

        /// Print the resulting rule without publishing or persisting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Serve the rule and hot-reload the config file until Ctrl+C
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!(config = %cli.config.display(), "traffic-rule v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = bootstrap(config)?;

    match cli.command {
        Commands::Show => {
            print_json(&*runtime.registry.configuration())?;
        }
        Commands::Alter { delta, dry_run } => {
            let segments = load_delta(&delta)?;
            let handler = runtime.handler();

            if dry_run {
                print_json(&handler.preview(&segments)?)?;
                return Ok(());
            }

            let outcome = handler.execute(&segments)?;
            if let PersistStatus::Failed(reason) = &outcome.persisted {
                eprintln!("Warning: alteration is live but was not persisted: {}", reason);
            }
            print_json(&serde_json::json!({
                "outcome": outcome,
                "configuration": &*runtime.registry.configuration(),
            }))?;
        }
        Commands::Watch => watch(&cli.config, runtime).await?,
    }

    Ok(())
}

async fn watch(path: &std::path::Path, runtime: Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let observability = &runtime.config.observability;
    if observability.metrics_enabled {
        if let Ok(addr) = observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let (watcher, updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    if let Some(persister) = &runtime.persister {
        tracing::info!(
            store = %persister.path().display(),
            "Metadata store is authoritative; [traffic] edits in the config file are ignored"
        );
    }
    let reloads = tokio::spawn(apply_reloads(
        updates,
        runtime.config.traffic.clone(),
        runtime.registry.clone(),
        runtime.persister.is_some(),
        shutdown.subscribe(),
    ));

    tracing::info!(version = runtime.registry.load().version, "Serving traffic rule");
    shutdown_on_ctrl_c(&shutdown).await?;
    reloads.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

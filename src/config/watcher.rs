//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;
use crate::registry::RuleRegistry;
use crate::rule::TrafficRuleConfig;

/// Monitors the configuration file and emits validated configs.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a watcher and the receiver its reloads are delivered on.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = %path.display(), "Config file change detected, reloading");
                    match load_config(&path) {
                        Ok(config) => {
                            let _ = tx.send(config);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Rejected config reload; keeping current traffic rule");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// Publish reloaded traffic sections until shutdown.
///
/// Only a change of the `[traffic]` section compared to the previously loaded
/// file republishes, so editing other sections does not undo alterations made
/// since startup.
///
/// With `store_backed` set the metadata store owns the live rule: `[traffic]`
/// edits are logged and ignored, and nothing is published or persisted.
pub async fn apply_reloads(
    mut updates: mpsc::UnboundedReceiver<AppConfig>,
    initial: TrafficRuleConfig,
    registry: Arc<RuleRegistry>,
    store_backed: bool,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut last_seen = initial;
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                if config.traffic == last_seen {
                    tracing::debug!("Traffic section unchanged; nothing to publish");
                    continue;
                }
                last_seen = config.traffic.clone();
                if store_backed {
                    tracing::warn!(
                        version = registry.load().version,
                        "Traffic section changed in config file; metadata store is authoritative, keeping live rule"
                    );
                    continue;
                }
                let snapshot = registry.publish(config.traffic);
                tracing::info!(version = snapshot.version, "Traffic rule reloaded from config file");
            }
            _ = shutdown.recv() => {
                tracing::info!("Reload loop received shutdown signal");
                break;
            }
        }
    }
}

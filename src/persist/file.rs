//! TOML file metadata store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persist::{ConfigPersister, PersistError};
use crate::rule::TrafficRuleConfig;

/// On-disk layout of the metadata document.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct MetadataDocument {
    traffic: TrafficRuleConfig,
}

/// Stores the traffic rule as a TOML document at a fixed path.
#[derive(Debug, Clone)]
pub struct FilePersister {
    path: PathBuf,
}

impl FilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored configuration. `Ok(None)` when nothing was stored yet.
    pub fn load(&self) -> Result<Option<TrafficRuleConfig>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let document: MetadataDocument = toml::from_str(&content)?;
        Ok(Some(document.traffic))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigPersister for FilePersister {
    /// Assumes a single writer per path, like `RuleRegistry::publish`. The
    /// `overwrite = false` existence check and the final rename are not
    /// atomic against another writer of the same file.
    fn persist(&self, configuration: &TrafficRuleConfig, overwrite: bool) -> Result<(), PersistError> {
        if !overwrite && self.path.exists() {
            return Err(PersistError::AlreadyExists(self.path.display().to_string()));
        }

        let document = MetadataDocument {
            traffic: configuration.clone(),
        };
        let content = toml::to_string_pretty(&document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write aside, then rename over the target so readers never see a torn file.
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            strategies = configuration.strategies.len(),
            "Traffic rule metadata written"
        );
        Ok(())
    }
}

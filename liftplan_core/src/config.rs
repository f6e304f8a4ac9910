//! Configuration file support for Liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::handoff::{DEFAULT_REPS, DEFAULT_SETS};
use crate::{Error, MuscleDivisions, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default)]
    pub handoff: HandoffConfig,

    #[serde(default)]
    pub substitution: SubstitutionConfig,

    /// Per-group division overrides layered over the standard table
    #[serde(default)]
    pub divisions: BTreeMap<String, Vec<String>>,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// External taxonomy and catalog files; bundled data is used when unset
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ResourcesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

/// Prescription written for every saved exercise
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandoffConfig {
    #[serde(default = "default_sets")]
    pub sets: u32,

    #[serde(default = "default_reps")]
    pub reps: u32,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            sets: default_sets(),
            reps: default_reps(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubstitutionConfig {
    /// Skip alternatives already placed elsewhere in the plan
    #[serde(default = "default_avoid_plan_duplicates")]
    pub avoid_plan_duplicates: bool,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            avoid_plan_duplicates: default_avoid_plan_duplicates(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("liftplan")
}

fn default_sets() -> u32 {
    DEFAULT_SETS
}

fn default_reps() -> u32 {
    DEFAULT_REPS
}

fn default_avoid_plan_duplicates() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("liftplan").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.handoff.sets == 0 || self.handoff.reps == 0 {
            return Err(Error::Config(
                "handoff sets and reps must be at least 1".into(),
            ));
        }
        if let Some((group, _)) = self.divisions.iter().find(|(_, d)| d.is_empty()) {
            return Err(Error::Config(format!(
                "division override for '{}' is empty",
                group
            )));
        }
        Ok(())
    }

    /// Standard division table with the configured overrides applied
    pub fn muscle_divisions(&self) -> MuscleDivisions {
        MuscleDivisions::standard().merged_with(&MuscleDivisions::new(self.divisions.clone()))
    }
}

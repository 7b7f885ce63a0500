//! Configuration for model searches.
//!
//! Config root resolution order:
//! 1. Explicit path passed to Config::with_root() / Config::load_from()
//! 2. SPECTRUM_FILTER_ROOT environment variable
//! 3. Default: XDG config dir, e.g. ~/.config/spectrum-filter

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::{normalize_attrs, DEFAULT_MODEL_ATTRS};
use crate::{Error, Result};

/// Environment variable overriding the config root.
pub const ROOT_ENV_VAR: &str = "SPECTRUM_FILTER_ROOT";

/// Largest number of models returned by a single search.
pub const DEFAULT_THROTTLE_SIZE: u32 = 9999;

/// Model search defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml.
    #[serde(skip)]
    pub root: PathBuf,

    /// Maximum number of models per search.
    #[serde(default = "default_throttle_size")]
    pub throttle_size: u32,

    /// Attributes requested on every search, by name or literal ID.
    #[serde(default = "default_attrs")]
    pub default_attrs: Vec<String>,

    /// Restrict searches to device models.
    #[serde(default)]
    pub devices_only: bool,
}

fn default_throttle_size() -> u32 {
    DEFAULT_THROTTLE_SIZE
}

fn default_attrs() -> Vec<String> {
    DEFAULT_MODEL_ATTRS
        .iter()
        .map(|attr| attr.name().to_string())
        .collect()
}

impl Config {
    /// Create a new config with the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            throttle_size: default_throttle_size(),
            default_attrs: default_attrs(),
            devices_only: false,
        }
    }

    /// Create a config using default root resolution.
    pub fn default_location() -> Result<Self> {
        let root = resolve_root()?;
        Ok(Self::with_root(root))
    }

    /// Load config from <root>/config.toml, or fall back to defaults.
    pub fn load() -> Result<Self> {
        let root = resolve_root()?;
        Self::load_from(&root)
    }

    /// Load config from a specific root.
    pub fn load_from(root: &Path) -> Result<Self> {
        let config_path = root.join("config.toml");

        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::with_root(root));
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.root = root.to_path_buf();
        config.validate()?;

        debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to <root>/config.toml.
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(self.config_path(), contents)?;
        debug!(path = %self.config_path().display(), "saved config");
        Ok(())
    }

    /// Check values that cannot be expressed in the TOML schema.
    pub fn validate(&self) -> Result<()> {
        if self.throttle_size == 0 {
            return Err(Error::Config("throttle_size must be greater than zero".to_string()));
        }
        normalize_attrs(&self.default_attrs)
            .map_err(|e| Error::Config(format!("Invalid default_attrs: {}", e)))?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }
}

/// Resolve the config root using the standard resolution order.
fn resolve_root() -> Result<PathBuf> {
    // 1. Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    // 2. XDG config directory (via directories crate)
    if let Some(proj_dirs) = ProjectDirs::from("", "", "spectrum-filter") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // 3. Fallback to ~/.config/spectrum-filter
    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".config/spectrum-filter"))
}

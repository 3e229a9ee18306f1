//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/animals/animals.toml`
//! 3. Environment variables: `ANIMALS_*` prefix
//! 4. Command line (`--data-file`), applied by the CLI layer

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_MAX_INPUT_LEN;
use crate::application::ApplicationError;
use crate::domain::DEFAULT_ANIMAL;

/// Default name of the game data file.
pub const DEFAULT_DATA_FILE: &str = "animals.dat";

/// Unified configuration for animals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File holding the learned tree (default: animals.dat in the working directory)
    pub data_file: PathBuf,
    /// Animal guessed by a brand-new tree (default: human)
    pub default_animal: String,
    /// Longest accepted animal name or question, in characters
    pub max_input_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            default_animal: DEFAULT_ANIMAL.to_string(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub default_animal: Option<String>,
    pub max_input_len: Option<usize>,
}

/// Get the XDG config directory for animals.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "animals").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("animals.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in the data file path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_file.to_string_lossy().as_ref());
        self.data_file = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            default_animal: overlay
                .default_animal
                .clone()
                .unwrap_or_else(|| self.default_animal.clone()),
            max_input_len: overlay.max_input_len.unwrap_or(self.max_input_len),
        }
    }

    /// Load settings from defaults, the global config file and the environment.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` instead of the global config path.
    ///
    /// A missing file is skipped; an unreadable or invalid one is an error.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Merge config file
        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Apply environment variables (replaces - explicit override)
        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply ANIMALS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("ANIMALS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("default_animal") {
            settings.default_animal = val;
        }
        match config.get_int("max_input_len") {
            Ok(val) => {
                settings.max_input_len =
                    usize::try_from(val).map_err(|_| ApplicationError::Config {
                        message: format!("ANIMALS_MAX_INPUT_LEN must not be negative: {val}"),
                    })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Reject values the game cannot work with.
    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_input_len == 0 {
            return Err(ApplicationError::Config {
                message: "max_input_len must be at least 1".into(),
            });
        }
        if self.default_animal.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "default_animal must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# animals configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/animals/animals.toml
#   Env:    ANIMALS_* environment variables (e.g. ANIMALS_DATA_FILE)
#   CLI:    --data-file

# File holding the learned questions (~ and $VAR are expanded)
# data_file = "animals.dat"

# Animal guessed by a brand-new tree
# default_animal = "human"

# Longest accepted animal name or question, in characters
# max_input_len = 255
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

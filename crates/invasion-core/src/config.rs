//! Configuration loading and typed config structures for the Invasion
//! simulation.
//!
//! The optional `invasion-config.yaml` in the working directory mirrors the
//! structs below. Every field has a default, so an absent file, an empty file
//! and a partial file are all valid.

use std::path::Path;

use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "invasion-config.yaml";

/// Environment variable that overrides `simulation.seed`.
pub const SEED_ENV_VAR: &str = "INVASION_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// The environment variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Run loop settings.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// What the binary prints besides destruction events.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// `INVASION_SEED` overrides `simulation.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults; apply
    /// environment overrides either way.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file).
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Parse configuration from a YAML string. No environment overrides are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override settings with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `INVASION_SEED` is set but is
    /// not an unsigned integer.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var(SEED_ENV_VAR) {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_parse_error| ConfigError::InvalidEnv {
                    var: SEED_ENV_VAR,
                    value: value.clone(),
                })?;
            self.simulation.seed = Some(seed);
        }
        Ok(())
    }
}

/// Run loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationSettings {
    /// Iteration ceiling.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Random seed for a reproducible run. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Stop before the ceiling once no further step can change anything.
    #[serde(default = "default_true")]
    pub early_exit: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            seed: None,
            early_exit: true,
        }
    }
}

/// Output toggles for the binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Print the surviving map in map file format after the run.
    #[serde(default = "default_true")]
    pub print_final_map: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            print_final_map: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_max_steps() -> u64 {
    crate::simulation::DEFAULT_MAX_STEPS
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

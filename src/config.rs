//! Configuration management for imageguard
//!
//! Settings are loaded from environment variables with defaults. Command-line
//! flags take precedence and are merged in by the CLI handlers.
//!
//! # Environment Variables
//!
//! - `IMAGEGUARD_ALLOWED_REGISTRIES`: allowed registry suffixes, separated by commas,
//!   semicolons or whitespace - default: empty (analysis is skipped)
//! - `IMAGEGUARD_BUILD_ARGS`: `docker build` argument fragment used to resolve
//!   `--build-arg` overrides - default: empty
//! - `IMAGEGUARD_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use imageguard::ImageGuardConfig;
//!
//! std::env::set_var("IMAGEGUARD_ALLOWED_REGISTRIES", ".azurecr.io,mcr.microsoft.com");
//!
//! let config = ImageGuardConfig::default();
//! config.validate().expect("Invalid configuration");
//! let detector = config.detector();
//! ```

use crate::compliance::AllowedRegistrySet;
use crate::detector::DockerDetector;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

pub const ENV_ALLOWED_REGISTRIES: &str = "IMAGEGUARD_ALLOWED_REGISTRIES";
pub const ENV_BUILD_ARGS: &str = "IMAGEGUARD_BUILD_ARGS";
pub const ENV_LOG_LEVEL: &str = "IMAGEGUARD_LOG_LEVEL";

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct ImageGuardConfig {
    /// Registry suffixes images may be pulled from
    pub allowed_registries: AllowedRegistrySet,

    /// `--build-arg` fragment applied to every analysed Dockerfile
    pub build_args: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ImageGuardConfig {
    fn default() -> Self {
        let allowed_registries = env::var(ENV_ALLOWED_REGISTRIES)
            .map(|v| AllowedRegistrySet::parse(&v))
            .unwrap_or_default();

        let build_args = env::var(ENV_BUILD_ARGS).unwrap_or_default();

        let log_level = env::var(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            allowed_registries,
            build_args,
            log_level,
        }
    }
}

impl ImageGuardConfig {
    /// Validates the configuration
    ///
    /// Allowed registries are host suffixes, so an entry containing `/` can never
    /// match and is rejected. An empty allow-list is valid and disables analysis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(entry) = self
            .allowed_registries
            .entries()
            .iter()
            .find(|entry| entry.contains('/'))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Allowed registry '{}' must be a host suffix without '/'",
                entry
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn detector(&self) -> DockerDetector {
        DockerDetector::new(self.allowed_registries.clone())
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(
            "allowed_registries".to_string(),
            self.allowed_registries.entries().join(","),
        );
        map.insert("build_args".to_string(), self.build_args.clone());
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for ImageGuardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "imageguard Configuration:")?;
        if self.allowed_registries.is_empty() {
            writeln!(f, "  Allowed Registries: (none, analysis disabled)")?;
        } else {
            writeln!(
                f,
                "  Allowed Registries: {}",
                self.allowed_registries.entries().join(", ")
            )?;
        }
        writeln!(f, "  Build Args: {}", self.build_args)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

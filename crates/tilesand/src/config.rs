//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `tilesand.ron` file (if exists)
//! 3. Environment variables prefixed with `TILESAND_`
//!
//! Example environment variable: `TILESAND_WORLD__WIDTH=320`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use tilesand_core::world::DEFAULT_SEED;

/// Main driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Grid size and random seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    /// Seed for the shuffled random table
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 90,
            seed: DEFAULT_SEED,
        }
    }
}

/// Headless run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Ticks to simulate when no scenario is given
    pub ticks: u64,
    /// Log a statistics report every N ticks (0 disables)
    pub report_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            report_interval: 60,
        }
    }
}

/// Material catalog source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// RON catalog file; the built-in catalog is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SimConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `tilesand.ron` in the working directory (if exists)
    /// 3. Environment variables prefixed with `TILESAND_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::with_name("tilesand")
                .format(FileFormat::Ron)
                .required(false),
        );
        Self::finish(builder)
    }

    /// Same layering, but with an explicit config file that must exist
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let builder = Self::defaults()?.add_source(
            File::from(path)
                .format(FileFormat::Ron)
                .required(true),
        );
        Self::finish(builder)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("world.width", i64::from(defaults.world.width))?
            .set_default("world.height", i64::from(defaults.world.height))?
            .set_default("world.seed", defaults.world.seed)?
            .set_default("run.ticks", defaults.run.ticks)?
            .set_default("run.report_interval", defaults.run.report_interval)?;
        Ok(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            // TILESAND_WORLD__WIDTH, TILESAND_RUN__TICKS, ...
            .add_source(
                Environment::with_prefix("TILESAND")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.world.width, 160);
        assert_eq!(config.world.height, 90);
        assert_eq!(config.world.seed, DEFAULT_SEED);
        assert_eq!(config.run.ticks, 600);
        assert_eq!(config.run.report_interval, 60);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_load_config_with_defaults() {
        // No tilesand.ron next to the test binary
        let config = SimConfig::load().expect("Failed to load config");
        assert_eq!(config.run.report_interval, 60);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        writeln!(
            file,
            r#"(
                world: (width: 32, height: 24),
                run: (ticks: 10),
                catalog: (path: Some("materials.ron")),
            )"#
        )
        .unwrap();

        let config = SimConfig::load_from(file.path()).unwrap();
        assert_eq!(config.world.width, 32);
        assert_eq!(config.world.height, 24);
        assert_eq!(config.world.seed, DEFAULT_SEED);
        assert_eq!(config.run.ticks, 10);
        assert_eq!(config.run.report_interval, 60);
        assert_eq!(config.catalog.path, Some(PathBuf::from("materials.ron")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SimConfig::load_from(dir.path().join("absent.ron"));
        assert!(result.is_err());
    }
}

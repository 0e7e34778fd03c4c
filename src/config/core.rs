use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parallel::{clamp_workers, default_workers};

/// Environment variables read on top of the file configuration
pub const ENV_KEYS: [&str; 3] = ["REPO_DIR", "OUTPUT_DIR", "MAX_JOBS"];

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root searched for repositories, and the default restore destination
    pub repo_dir: PathBuf,

    /// Where bundles are written, and the default restore source
    pub output_dir: PathBuf,

    /// Requested worker count; values below 1 run a single worker
    pub max_jobs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_dir: home_dir().join("git"),
            output_dir: std::env::temp_dir(),
            max_jobs: default_workers() as i64,
        }
    }
}

impl Config {
    /// Load using `custom_config` in place of the user config file
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(custom_config)?)
    }

    /// Provider stack, lowest priority first
    pub fn figment(custom_config: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match custom_config {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = Self::user_config_path() {
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        // Empty variables count as unset
        let env = Env::raw().only(&ENV_KEYS).filter(|key| {
            std::env::var_os(key.as_str()).is_some_and(|value| !value.is_empty())
        });

        Ok(figment.merge(env))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .context("Invalid configuration (check REPO_DIR, OUTPUT_DIR and MAX_JOBS)")?;

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Worker count actually used by the pool
    pub fn workers(&self) -> usize {
        clamp_workers(self.max_jobs)
    }

    /// `<config dir>/gb/config.toml`, e.g. `~/.config/gb/config.toml` on Linux
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gb").join("config.toml"))
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine home directory, using current directory");
            PathBuf::from(".")
        })
}

//! Configuration management for the command line.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::path::PathBuf;

/// Command line configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory for all stored data
    pub data_dir: PathBuf,
    /// Fixed seed for pair selection and shuffling
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup("RANKER_DATA_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .ok_or(ConfigError::MissingDataDir)?
                .join("ranker"),
        };

        let seed = lookup("RANKER_SEED")
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed(raw.clone()))
            })
            .transpose()?;

        Ok(Self { data_dir, seed })
    }

    /// Apply command line flags on top of the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, seed: Option<u64>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    /// Seeded when a seed is configured, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no data directory available, set RANKER_DATA_DIR")]
    MissingDataDir,

    #[error("invalid RANKER_SEED value: {0}")]
    InvalidSeed(String),
}

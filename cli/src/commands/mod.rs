//! Subcommand implementations.
//!
//! Every command takes its input and output streams as parameters so the
//! interactive parts run against in-memory buffers in tests.

pub mod results;
pub mod session;
pub mod vote;

use crate::config::Config;
use crate::error::Result;
use crate::store::FileStore;
use rand::rngs::StdRng;

/// Everything a command needs from the environment.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn store(&self) -> Result<FileStore> {
        Ok(FileStore::open(self.config.sessions_dir())?)
    }

    pub fn rng(&self) -> StdRng {
        self.config.rng()
    }
}

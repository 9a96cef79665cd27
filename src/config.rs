//! Runtime settings for the loader.
//!
//! Values are layered: built-in defaults, then an optional settings file,
//! then `SOS_LOADER_*` environment variables, then command-line overrides.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_BATCH_SIZE, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoaderConfig {
    /// Rows per `InsertResult` request
    #[validate(range(min = 1, max = 100000))]
    pub batch_size: usize,

    /// Upper bound on a whole request, in seconds
    #[validate(range(min = 1, max = 3600))]
    pub request_timeout_secs: u64,

    #[validate(range(min = 1, max = 600))]
    pub connect_timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl LoaderConfig {
    /// Build the layered configuration, reading `config_path` when given.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("batch_size", DEFAULT_BATCH_SIZE as i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64)?;

        if let Some(path) = config_path {
            debug!("Reading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: LoaderConfig = builder
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line values on top of the loaded layers.
    pub fn with_overrides(
        mut self,
        batch_size: Option<usize>,
        request_timeout_secs: Option<u64>,
    ) -> Result<Self> {
        if let Some(size) = batch_size {
            self.batch_size = size;
        }
        if let Some(secs) = request_timeout_secs {
            self.request_timeout_secs = secs;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

//! CLI runner for common setup.
//!
//! Loads the configuration and starts logging for commands that need them.

use tracing::info;

use courtfinder::config::ConfigFile;
use courtfinder::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file, with environment overrides applied
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Echo log events to stderr as well as the log file
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?.with_env_overrides();

        let logging_guard = init_logging(&config.log_directory(), &config.logging.file, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Court Finder v{}", courtfinder::VERSION);
        info!(command, "running command");
    }
}

//! Global context for rscan operations.
//!
//! Provides centralized access to the working directory, the rscan home
//! directory and the merged configuration.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, Config};

/// Environment variable overriding the rscan home directory.
pub const HOME_ENV: &str = "RSCAN_HOME";

/// Name of the per-user and per-project rscan directory.
const RSCAN_DIR: &str = ".rscan";

static BASE_DIRS: LazyLock<Option<BaseDirs>> = LazyLock::new(BaseDirs::new);

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global rscan data (~/.rscan/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = match std::env::var_os(HOME_ENV) {
            Some(home) => PathBuf::from(home),
            None => BASE_DIRS
                .as_ref()
                .map(|dirs| dirs.home_dir().join(RSCAN_DIR))
                .unwrap_or_else(|| PathBuf::from(RSCAN_DIR)),
        };

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Replace the home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the rscan home directory (~/.rscan/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.cwd.join(RSCAN_DIR).join("config.toml")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Load the merged configuration.
    ///
    /// Global and project files are optional. An explicitly requested file
    /// must exist and parse; it takes precedence over both.
    pub fn load_config(&self, explicit: Option<&Path>) -> Result<Config> {
        let mut config = load_config(&self.global_config_path(), &self.project_config_path());

        if let Some(path) = explicit {
            let path = self.cwd.join(path);
            tracing::debug!("Loading config from {}", path.display());
            config.merge(Config::load(&path)?);
        }

        Ok(config)
    }
}

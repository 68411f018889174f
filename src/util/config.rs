//! Configuration file support for rscan.
//!
//! Two configuration file locations are read:
//! - Global: `~/.rscan/config.toml` - User-wide defaults
//! - Project: `.rscan/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Capability, Encoding, Location, MigrationNaming, TypeCatalog, TypeDescriptor};

/// Location scanned when none is configured.
pub const DEFAULT_LOCATION: &str = "classpath:db/migration";

/// Capability discovered types must implement when none is configured.
pub const DEFAULT_CAPABILITY: &str = "migration";

/// rscan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan settings
    pub scan: ScanConfig,

    /// Migration naming settings
    pub migrations: MigrationsConfig,

    /// Type catalog entries
    pub types: Vec<TypeDescriptor>,
}

/// Scan settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Locations to scan, in order
    pub locations: Option<Vec<Location>>,

    /// Classpath roots (directories or archives)
    pub classpath: Option<Vec<PathBuf>>,

    /// Text encoding of resources
    pub encoding: Option<Encoding>,

    /// Capability discovered types must implement
    pub capability: Option<Capability>,
}

/// Migration naming overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationsConfig {
    pub versioned_prefix: Option<String>,
    pub undo_prefix: Option<String>,
    pub repeatable_prefix: Option<String>,
    pub separator: Option<String>,
    pub suffixes: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration from a file, or return defaults if it doesn't exist
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Lists replace rather than extend, except `types`, which are appended
    /// so a later descriptor with the same name overrides an earlier one.
    pub fn merge(&mut self, other: Config) {
        // Scan settings
        if other.scan.locations.is_some() {
            self.scan.locations = other.scan.locations;
        }
        if other.scan.classpath.is_some() {
            self.scan.classpath = other.scan.classpath;
        }
        if other.scan.encoding.is_some() {
            self.scan.encoding = other.scan.encoding;
        }
        if other.scan.capability.is_some() {
            self.scan.capability = other.scan.capability;
        }

        // Migration naming
        let migrations = other.migrations;
        if migrations.versioned_prefix.is_some() {
            self.migrations.versioned_prefix = migrations.versioned_prefix;
        }
        if migrations.undo_prefix.is_some() {
            self.migrations.undo_prefix = migrations.undo_prefix;
        }
        if migrations.repeatable_prefix.is_some() {
            self.migrations.repeatable_prefix = migrations.repeatable_prefix;
        }
        if migrations.separator.is_some() {
            self.migrations.separator = migrations.separator;
        }
        if migrations.suffixes.is_some() {
            self.migrations.suffixes = migrations.suffixes;
        }

        self.types.extend(other.types);
    }

    /// Configured locations, or the default migration location.
    pub fn locations(&self) -> Vec<Location> {
        self.scan
            .locations
            .clone()
            .unwrap_or_else(|| vec![Location::parse(DEFAULT_LOCATION)])
    }

    /// Configured classpath roots.
    pub fn classpath(&self) -> &[PathBuf] {
        self.scan.classpath.as_deref().unwrap_or_default()
    }

    /// Configured encoding, or UTF-8.
    pub fn encoding(&self) -> Encoding {
        self.scan.encoding.unwrap_or_default()
    }

    /// Configured capability, or `migration`.
    pub fn capability(&self) -> Capability {
        self.scan
            .capability
            .clone()
            .unwrap_or_else(|| Capability::new(DEFAULT_CAPABILITY))
    }

    /// Migration naming with configured overrides applied.
    pub fn migration_naming(&self) -> MigrationNaming {
        let mut naming = MigrationNaming::default();
        let overrides = &self.migrations;
        if let Some(prefix) = &overrides.versioned_prefix {
            naming.versioned_prefix = prefix.clone();
        }
        if let Some(prefix) = &overrides.undo_prefix {
            naming.undo_prefix = prefix.clone();
        }
        if let Some(prefix) = &overrides.repeatable_prefix {
            naming.repeatable_prefix = prefix.clone();
        }
        if let Some(separator) = &overrides.separator {
            naming.separator = separator.clone();
        }
        if let Some(suffixes) = &overrides.suffixes {
            naming.suffixes = suffixes.clone();
        }
        naming
    }

    /// The type catalog built from `[[types]]` entries.
    pub fn type_catalog(&self) -> TypeCatalog {
        self.types.iter().cloned().collect()
    }
}

/// Load merged configuration from global and project locations.
///
/// Missing files are skipped; unreadable ones are logged and skipped.
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

//! Location identification - WHERE resources come from.
//!
//! A Location is a scheme-qualified search root. `classpath:` locations are
//! resolved against every root of the scan environment (directories and
//! archives), `filesystem:` locations name a plain directory on disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix for classpath locations.
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Prefix for filesystem locations.
pub const FILESYSTEM_PREFIX: &str = "filesystem:";

/// The kind of search root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// Resolved against the classpath roots of the scan environment
    Classpath,
    /// A plain directory on disk
    Filesystem,
}

impl LocationKind {
    /// The scheme prefix used when displaying a location of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            LocationKind::Classpath => CLASSPATH_PREFIX,
            LocationKind::Filesystem => FILESYSTEM_PREFIX,
        }
    }
}

/// A logical search root.
///
/// Locations are immutable and ordered by kind, then path.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    kind: LocationKind,
    path: String,
}

impl Location {
    /// Create a classpath location.
    ///
    /// Package-style dots and backslashes become `/`; leading and trailing
    /// separators are dropped, so `db.migration` and `/db/migration/` both
    /// name `classpath:db/migration`.
    pub fn classpath(path: &str) -> Self {
        let normalized = path.replace(['\\', '.'], "/");
        Location {
            kind: LocationKind::Classpath,
            path: normalized.trim_matches('/').to_string(),
        }
    }

    /// Create a filesystem location for a directory.
    pub fn filesystem(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy().replace('\\', "/");
        let trimmed = path.trim_end_matches('/');
        Location {
            kind: LocationKind::Filesystem,
            // Keep a lone "/" rather than trimming the root away
            path: if trimmed.is_empty() && !path.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    /// Parse a location descriptor.
    ///
    /// Format: `classpath:<path>`, `filesystem:<path>`, or a bare path which
    /// is treated as a classpath location.
    pub fn parse(descriptor: &str) -> Self {
        if let Some(path) = descriptor.strip_prefix(FILESYSTEM_PREFIX) {
            Location::filesystem(path)
        } else if let Some(path) = descriptor.strip_prefix(CLASSPATH_PREFIX) {
            Location::classpath(path)
        } else {
            Location::classpath(descriptor)
        }
    }

    /// Get the location kind.
    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// Get the normalized path (without scheme).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the directory for a filesystem location.
    pub fn directory(&self) -> Option<PathBuf> {
        match self.kind {
            LocationKind::Filesystem => Some(PathBuf::from(&self.path)),
            LocationKind::Classpath => None,
        }
    }

    /// Check if this is a classpath location.
    pub fn is_classpath(&self) -> bool {
        matches!(self.kind, LocationKind::Classpath)
    }

    /// Check if this is a filesystem location.
    pub fn is_filesystem(&self) -> bool {
        matches!(self.kind, LocationKind::Filesystem)
    }

    /// Resolve a relative resource path against this location.
    pub fn join(&self, relative: &str) -> String {
        if self.path.is_empty() {
            relative.to_string()
        } else if self.path.ends_with('/') {
            format!("{}{}", self.path, relative)
        } else {
            format!("{}/{}", self.path, relative)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.path)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self)
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Location::parse(s))
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Location::parse(&s))
    }
}

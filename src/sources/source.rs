//! Scanner traits - common interfaces for all backing media.

use std::fmt;
use std::path::Path;

use crate::core::{DiscoveredType, LoadableResource, ResourceOrigin};
use crate::sources::{BackendError, Stamp};

/// The storage kind of a classpath root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    /// A plain directory
    Directory,
    /// A zip, jar or war archive
    Zip,
    /// An uncompressed tar archive
    Tar,
    /// A gzip-compressed tar archive
    TarGz,
}

impl Medium {
    /// Determine the medium of an existing root, or `None` if unsupported.
    pub fn detect(root: &Path) -> Option<Medium> {
        if root.is_dir() {
            return Some(Medium::Directory);
        }

        let name = root.file_name()?.to_string_lossy().to_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Medium::TarGz)
        } else if name.ends_with(".tar") {
            Some(Medium::Tar)
        } else if name.ends_with(".zip") || name.ends_with(".jar") || name.ends_with(".war") {
            Some(Medium::Zip)
        } else {
            None
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Medium::Directory => "directory",
            Medium::Zip => "zip",
            Medium::Tar => "tar",
            Medium::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lists resource names under a location path of one root.
pub trait LocationScanner: Send + Sync + fmt::Debug {
    /// The medium this scanner reads.
    fn medium(&self) -> Medium;

    /// Find all file names below `location_path` in `root`.
    ///
    /// Names are relative to the root, use `/` separators, and include the
    /// location path itself (`db/migration/V1__init.sql`). An empty
    /// location path lists the whole root. A location path that does not
    /// exist in the root yields no names.
    fn find_resource_names(
        &self,
        root: &Path,
        location_path: &str,
    ) -> Result<Vec<String>, BackendError>;

    /// Describe how to read `name` from `root`.
    fn origin(&self, root: &Path, name: &str) -> ResourceOrigin;

    /// Freshness marker for cached names of `location_path` in `root`.
    ///
    /// Archives are single files, so the file's own metadata covers every
    /// entry in them.
    fn stamp(&self, root: &Path, _location_path: &str) -> Option<Stamp> {
        Stamp::of(root)
    }
}

/// Produces the resources and types of one location.
pub trait ResourceAndTypeScanner {
    /// All resources under the location, in a stable order.
    fn scan_for_resources(&mut self) -> Result<Vec<LoadableResource>, BackendError>;

    /// All concrete types under the location implementing the requested
    /// capability.
    fn scan_for_types(&mut self) -> Result<Vec<DiscoveredType>, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_medium() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Medium::detect(tmp.path()), Some(Medium::Directory));
        assert_eq!(Medium::detect(Path::new("lib/app.jar")), Some(Medium::Zip));
        assert_eq!(Medium::detect(Path::new("lib/app.WAR")), Some(Medium::Zip));
        assert_eq!(Medium::detect(Path::new("dist/sql.tar")), Some(Medium::Tar));
        assert_eq!(Medium::detect(Path::new("dist/sql.tar.gz")), Some(Medium::TarGz));
        assert_eq!(Medium::detect(Path::new("dist/sql.tgz")), Some(Medium::TarGz));
        assert_eq!(Medium::detect(Path::new("notes.txt")), None);
    }
}

//! Scan caches shared across scanner instances.
//!
//! Both caches are owned by the caller and passed into construction, so a
//! test can start cold, share a warm cache between scans, or inspect the
//! hit/miss counters afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::core::Location;
use crate::sources::{BackendError, DirectoryScanner, LocationScanner, Medium, TarScanner, ZipScanner};

/// Freshness marker of a scanned archive or directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl Stamp {
    /// Read the stamp of a path, or `None` if it does not exist.
    pub fn of(path: &Path) -> Option<Stamp> {
        let meta = std::fs::metadata(path).ok()?;
        Some(Stamp {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }

    /// Read the stamp of a whole directory tree, or `None` if `dir` does
    /// not exist.
    ///
    /// A directory's modification time only moves when its direct children
    /// change, so the stamp takes the newest time of every directory in the
    /// tree and counts every entry below `dir`.
    pub fn of_tree(dir: &Path) -> Option<Stamp> {
        let mut stamp = Stamp::of(dir)?;
        stamp.len = 0;

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            stamp.len += 1;
            if entry.file_type().is_dir() {
                let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
                stamp.modified = stamp.modified.max(modified);
            }
        }

        Some(stamp)
    }
}

/// Hit and miss counters of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Counters {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
struct NameEntry {
    stamp: Option<Stamp>,
    names: Arc<Vec<String>>,
}

type NameKey = (Location, PathBuf);

/// Resource names found under a location in one root.
#[derive(Debug, Default)]
pub struct ResourceNameCache {
    entries: RwLock<HashMap<NameKey, NameEntry>>,
    counters: Counters,
}

impl ResourceNameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the names for `(location, root)`, computing them on a miss.
    ///
    /// An entry whose stamp differs from `stamp` is stale and recomputed.
    /// A failed computation stores nothing.
    pub fn get_or_compute<F>(
        &self,
        location: &Location,
        root: &Path,
        stamp: Option<Stamp>,
        compute: F,
    ) -> Result<Arc<Vec<String>>, BackendError>
    where
        F: FnOnce() -> Result<Vec<String>, BackendError>,
    {
        let key = (location.clone(), root.to_path_buf());

        // Fast path: read lock only
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(&key) {
                if entry.stamp == stamp {
                    self.counters.hit();
                    return Ok(Arc::clone(&entry.names));
                }
            }
        }

        self.counters.miss();
        tracing::debug!("Computing resource names for {} in {}", location, root.display());
        let names = Arc::new(compute()?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have stored a current entry meanwhile
        if let Some(entry) = entries.get(&key) {
            if entry.stamp == stamp {
                return Ok(Arc::clone(&entry.names));
            }
        }

        entries.insert(
            key,
            NameEntry {
                stamp,
                names: Arc::clone(&names),
            },
        );
        Ok(names)
    }

    /// Drop every entry of a location, across all roots.
    pub fn invalidate(&self, location: &Location) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|(loc, _), _| loc != location);
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached `(location, root)` entries.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

/// Location scanner instances, one per medium.
#[derive(Debug, Default)]
pub struct LocationScannerCache {
    scanners: RwLock<HashMap<Medium, Arc<dyn LocationScanner>>>,
    counters: Counters,
}

impl LocationScannerCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the scanner for a medium.
    pub fn get_or_create(&self, medium: Medium) -> Arc<dyn LocationScanner> {
        {
            let scanners = self.scanners.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(scanner) = scanners.get(&medium) {
                self.counters.hit();
                return Arc::clone(scanner);
            }
        }

        let mut scanners = self.scanners.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(scanner) = scanners.get(&medium) {
            self.counters.hit();
            return Arc::clone(scanner);
        }

        self.counters.miss();
        let scanner = Self::create_scanner(medium);
        scanners.insert(medium, Arc::clone(&scanner));
        scanner
    }

    /// Create a scanner for the given medium.
    fn create_scanner(medium: Medium) -> Arc<dyn LocationScanner> {
        match medium {
            Medium::Directory => Arc::new(DirectoryScanner::new()),
            Medium::Zip => Arc::new(ZipScanner::new()),
            Medium::Tar => Arc::new(TarScanner::plain()),
            Medium::TarGz => Arc::new(TarScanner::gzip()),
        }
    }

    /// Hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

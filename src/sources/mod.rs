//! Resource sources.
//!
//! Location scanners list resource names on one medium (directory, zip,
//! tar). The classpath scanner combines them with the caches to produce
//! the resources and types of one location.

pub mod archive;
pub mod cache;
pub mod classpath;
pub mod error;
pub mod path;
pub mod source;

pub use archive::{TarScanner, ZipScanner};
pub use cache::{CacheStats, LocationScannerCache, ResourceNameCache, Stamp};
pub use classpath::ClassPathScanner;
pub use error::BackendError;
pub use path::DirectoryScanner;
pub use source::{LocationScanner, Medium, ResourceAndTypeScanner};

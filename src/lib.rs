//! rscan - discovers and indexes resources and implementing types
//!
//! This crate scans an ordered list of locations (filesystem directories or
//! classpath paths resolved against directory and archive roots), collects
//! the resources and capability-implementing types found under them, and
//! answers lookups by name, by file name pattern, and by type.

pub mod core;
pub mod ops;
pub mod scanner;
pub mod sources;
pub mod util;

/// Test utilities and fixtures for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides directory and archive fixtures plus a mock
/// location backend.
#[cfg(test)]
pub mod test_support;

pub use core::{
    Capability, DiscoveredType, Encoding, LoadableResource, Location, LocationKind,
    MigrationNaming, MigrationType, ScanEnvironment, TypeCatalog, TypeDescriptor, TypeKind,
    TypeResolver,
};
pub use scanner::{ResourceProvider, ScanError, Scanner, TypeProvider};
pub use sources::{BackendError, LocationScannerCache, ResourceNameCache};
pub use util::context::GlobalContext;

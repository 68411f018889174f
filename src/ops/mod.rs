//! High-level operations.
//!
//! This module contains the implementation of rscan commands.

pub mod migrations;
pub mod scan;

pub use migrations::{list_migrations, MigrationEntry};
pub use scan::{scan, ScanOptions, ScanPlan};

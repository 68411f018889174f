//! Scan operations.
//!
//! Turns configuration plus command-line overrides into a [`Scanner`].

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::core::{Capability, Encoding, Location, ScanEnvironment};
use crate::scanner::Scanner;
use crate::sources::{LocationScannerCache, ResourceNameCache};
use crate::util::fs::resolve_against;
use crate::util::{Config, GlobalContext};

/// Command-line overrides for a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Locations to scan instead of the configured ones
    pub locations: Vec<Location>,

    /// Classpath roots to use instead of the configured ones
    pub classpath: Vec<PathBuf>,

    /// Encoding override
    pub encoding: Option<Encoding>,

    /// Capability override
    pub capability: Option<Capability>,
}

/// Everything needed to construct a scanner, with paths resolved.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub capability: Capability,
    pub locations: Vec<Location>,
    pub environment: ScanEnvironment,
    pub encoding: Encoding,
}

impl ScanPlan {
    /// Combine config and overrides. Relative classpath roots and
    /// filesystem locations resolve against the working directory.
    pub fn new(ctx: &GlobalContext, config: &Config, opts: &ScanOptions) -> Self {
        let locations = if opts.locations.is_empty() {
            config.locations()
        } else {
            opts.locations.clone()
        };
        let locations = locations
            .into_iter()
            .map(|location| match location.directory() {
                Some(dir) => Location::filesystem(resolve_against(ctx.cwd(), &dir)),
                None => location,
            })
            .collect();

        let roots = if opts.classpath.is_empty() {
            config.classpath().to_vec()
        } else {
            opts.classpath.clone()
        };
        let roots = roots
            .into_iter()
            .map(|root| resolve_against(ctx.cwd(), &root));

        let environment = ScanEnvironment::new()
            .with_classpath(roots)
            .with_resolver(Arc::new(config.type_catalog()));

        ScanPlan {
            capability: opts.capability.clone().unwrap_or_else(|| config.capability()),
            locations,
            environment,
            encoding: opts.encoding.unwrap_or_else(|| config.encoding()),
        }
    }

    /// Run the scan with caller-owned caches.
    pub fn scan_with_caches(
        &self,
        resource_name_cache: &ResourceNameCache,
        location_scanner_cache: &LocationScannerCache,
    ) -> Result<Scanner> {
        tracing::debug!(
            "Scanning {} location(s) over {} classpath root(s)",
            self.locations.len(),
            self.environment.classpath().len()
        );

        let scanner = Scanner::new(
            &self.capability,
            &self.locations,
            &self.environment,
            self.encoding,
            resource_name_cache,
            location_scanner_cache,
        )?;
        Ok(scanner)
    }

    /// Run the scan with fresh caches.
    pub fn scan(&self) -> Result<Scanner> {
        self.scan_with_caches(&ResourceNameCache::new(), &LocationScannerCache::new())
    }
}

/// Load config, apply overrides and scan.
pub fn scan(ctx: &GlobalContext, config: &Config, opts: &ScanOptions) -> Result<Scanner> {
    ScanPlan::new(ctx, config, opts).scan()
}

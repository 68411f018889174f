//! The scan aggregator.
//!
//! A [`Scanner`] enumerates each location exactly once at construction,
//! keeps every resource and type in discovery order, and answers lookups
//! from case-insensitive indices. The relative-path index is built eagerly;
//! the absolute-path index is built on the first absolute lookup, at most
//! once per scanner even under concurrent first use.

mod errors;
mod index;
pub mod provider;

pub use errors::ScanError;
pub use provider::{starts_and_ends_with, ResourceProvider, TypeProvider};

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::core::{
    Capability, DiscoveredType, Encoding, LoadableResource, Location, ScanEnvironment,
};
use crate::sources::{
    BackendError, ClassPathScanner, LocationScannerCache, ResourceAndTypeScanner,
    ResourceNameCache,
};
use index::PathIndex;

/// Frozen view over the resources and types of a set of locations.
#[derive(Debug)]
pub struct Scanner {
    resources: Vec<LoadableResource>,
    types: Vec<DiscoveredType>,
    relative_index: PathIndex,
    absolute_index: OnceLock<PathIndex>,
    absolute_index_builds: AtomicUsize,
}

impl Scanner {
    /// Scan `locations` in order with the classpath backend.
    ///
    /// Fails with the identity of the first location whose backend fails;
    /// no partially populated scanner is returned.
    pub fn new(
        capability: &Capability,
        locations: &[Location],
        environment: &ScanEnvironment,
        encoding: Encoding,
        resource_name_cache: &ResourceNameCache,
        location_scanner_cache: &LocationScannerCache,
    ) -> Result<Scanner, ScanError> {
        Self::scan_with(locations, |location| {
            let backend: Box<dyn ResourceAndTypeScanner + '_> = Box::new(ClassPathScanner::new(
                capability,
                location.clone(),
                environment,
                encoding,
                resource_name_cache,
                location_scanner_cache,
            ));
            Ok(backend)
        })
    }

    /// Scan `locations` in order, creating one backend per location with
    /// `factory`.
    pub fn scan_with<'a, F>(locations: &[Location], mut factory: F) -> Result<Scanner, ScanError>
    where
        F: FnMut(&Location) -> Result<Box<dyn ResourceAndTypeScanner + 'a>, BackendError>,
    {
        let mut resources = Vec::new();
        let mut types = Vec::new();

        for location in locations {
            let backend_error = |source| ScanError::Backend {
                location: location.clone(),
                source,
            };

            let mut backend = factory(location).map_err(backend_error)?;
            let found_resources = backend.scan_for_resources().map_err(backend_error)?;
            let found_types = backend.scan_for_types().map_err(backend_error)?;

            tracing::debug!(
                "Scanned {}: {} resource(s), {} type(s)",
                location,
                found_resources.len(),
                found_types.len()
            );

            resources.extend(found_resources);
            types.extend(found_types);
        }

        let relative_index = PathIndex::build(resources.iter().map(|r| r.relative_path()));
        tracing::debug!("Indexed {} distinct relative path(s)", relative_index.len());

        tracing::info!(
            "Scanned {} location(s): {} resource(s), {} type(s)",
            locations.len(),
            resources.len(),
            types.len()
        );

        Ok(Scanner {
            resources,
            types,
            relative_index,
            absolute_index: OnceLock::new(),
            absolute_index_builds: AtomicUsize::new(0),
        })
    }

    /// All resources, in discovery order.
    pub fn resources(&self) -> &[LoadableResource] {
        &self.resources
    }

    /// How many times the absolute-path index has been built (0 or 1).
    pub fn absolute_index_builds(&self) -> usize {
        self.absolute_index_builds.load(Ordering::SeqCst)
    }

    /// Check if the absolute-path index exists yet.
    pub fn is_absolute_index_built(&self) -> bool {
        self.absolute_index.get().is_some()
    }

    fn absolute_index(&self) -> &PathIndex {
        self.absolute_index.get_or_init(|| {
            self.absolute_index_builds.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Building absolute path index over {} resource(s)", self.resources.len());
            PathIndex::build(self.resources.iter().map(|r| r.absolute_path()))
        })
    }
}

impl ResourceProvider for Scanner {
    fn get_resource(&self, name: &str) -> Option<&LoadableResource> {
        if let Some(position) = self.relative_index.get(name) {
            return Some(&self.resources[position]);
        }

        if !Path::new(name).is_absolute() {
            return None;
        }

        self.absolute_index()
            .get(name)
            .map(|position| &self.resources[position])
    }

    fn get_resources(
        &self,
        prefix: &str,
        suffixes: &[&str],
    ) -> Result<Vec<&LoadableResource>, ScanError> {
        if suffixes.is_empty() {
            return Err(ScanError::EmptySuffixes);
        }

        let mut matching = Vec::new();
        for resource in &self.resources {
            if starts_and_ends_with(resource.filename(), prefix, suffixes) {
                matching.push(resource);
            } else {
                tracing::debug!(
                    "Filtering out resource: {} (filename: {})",
                    resource.absolute_path(),
                    resource.filename()
                );
            }
        }
        Ok(matching)
    }
}

impl TypeProvider for Scanner {
    fn get_types(&self) -> &[DiscoveredType] {
        &self.types
    }
}

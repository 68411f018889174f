//! Backend scanner for one location.
//!
//! `filesystem:` locations walk a single directory. `classpath:` locations
//! are looked up in every root of the scan environment; a name present in
//! several roots is bound to the first root that has it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{
    Capability, DiscoveredType, Encoding, LoadableResource, Location, ScanEnvironment,
};
use crate::sources::{
    BackendError, LocationScanner, LocationScannerCache, Medium, ResourceAndTypeScanner,
    ResourceNameCache,
};

/// File suffix of a type unit.
const TYPE_UNIT_SUFFIX: &str = ".class";

/// Scans one location for resources and capability-implementing types.
pub struct ClassPathScanner<'a> {
    capability: &'a Capability,
    location: Location,
    environment: &'a ScanEnvironment,
    encoding: Encoding,
    resource_name_cache: &'a ResourceNameCache,
    location_scanner_cache: &'a LocationScannerCache,
    resources: Option<Vec<LoadableResource>>,
}

impl<'a> ClassPathScanner<'a> {
    /// Create a scanner bound to `location`.
    pub fn new(
        capability: &'a Capability,
        location: Location,
        environment: &'a ScanEnvironment,
        encoding: Encoding,
        resource_name_cache: &'a ResourceNameCache,
        location_scanner_cache: &'a LocationScannerCache,
    ) -> Self {
        ClassPathScanner {
            capability,
            location,
            environment,
            encoding,
            resource_name_cache,
            location_scanner_cache,
            resources: None,
        }
    }

    /// The location this scanner is bound to.
    pub fn location(&self) -> &Location {
        &self.location
    }

    fn resources(&mut self) -> Result<&[LoadableResource], BackendError> {
        if self.resources.is_none() {
            let found = if self.location.is_filesystem() {
                self.scan_directory()?
            } else {
                self.scan_classpath()?
            };
            self.resources = Some(found);
        }
        Ok(self.resources.as_deref().unwrap_or_default())
    }

    fn scan_directory(&self) -> Result<Vec<LoadableResource>, BackendError> {
        let dir = match self.location.directory() {
            Some(dir) => dir,
            None => return Ok(Vec::new()),
        };

        if !dir.exists() {
            tracing::warn!("Skipping filesystem location: {} (not found)", dir.display());
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(BackendError::NotADirectory { path: dir });
        }

        let scanner = self.location_scanner_cache.get_or_create(Medium::Directory);
        let stamp = scanner.stamp(&dir, "");
        let names = self
            .resource_name_cache
            .get_or_compute(&self.location, &dir, stamp, || {
                scanner.find_resource_names(&dir, "")
            })?;

        Ok(names
            .iter()
            .map(|name| {
                LoadableResource::new(
                    self.location.clone(),
                    name.as_str(),
                    scanner.origin(&dir, name),
                    self.encoding,
                )
            })
            .collect())
    }

    fn scan_classpath(&self) -> Result<Vec<LoadableResource>, BackendError> {
        let location_path = self.location.path();
        let mut roots: Vec<(&PathBuf, Arc<dyn LocationScanner>)> = Vec::new();
        let mut found: BTreeMap<String, usize> = BTreeMap::new();

        for root in self.environment.classpath() {
            if !root.exists() {
                tracing::warn!("Skipping classpath root: {} (not found)", root.display());
                continue;
            }
            let Some(medium) = Medium::detect(root) else {
                tracing::debug!("Skipping classpath root: {} (unsupported medium)", root.display());
                continue;
            };

            let scanner = self.location_scanner_cache.get_or_create(medium);
            let stamp = scanner.stamp(root, location_path);
            let names = self
                .resource_name_cache
                .get_or_compute(&self.location, root, stamp, || {
                    scanner.find_resource_names(root, location_path)
                })?;

            tracing::debug!(
                "Found {} resource(s) for {} in {} root {}",
                names.len(),
                self.location,
                medium,
                root.display()
            );

            let index = roots.len();
            for name in names.iter() {
                found.entry(name.clone()).or_insert(index);
            }
            roots.push((root, scanner));
        }

        if found.is_empty() {
            tracing::warn!("Unable to resolve location {}", self.location);
            return Ok(Vec::new());
        }

        Ok(found
            .into_iter()
            .map(|(name, index)| {
                let (root, scanner) = &roots[index];
                LoadableResource::new(
                    self.location.clone(),
                    strip_location(&name, location_path),
                    scanner.origin(root, &name),
                    self.encoding,
                )
            })
            .collect())
    }

    fn discover_type(&self, resource: &LoadableResource) -> Option<DiscoveredType> {
        let unit = resource.location_path().strip_suffix(TYPE_UNIT_SUFFIX)?;
        if resource.filename().contains('$') {
            tracing::debug!("Skipping nested type unit: {}", resource.location_path());
            return None;
        }

        let qualified_name = unit.replace('/', ".");
        let Some(descriptor) = self.environment.resolver().resolve(&qualified_name) else {
            tracing::debug!("Skipping unresolvable type: {}", qualified_name);
            return None;
        };

        if !self.capability.is_satisfied_by(&descriptor) {
            tracing::debug!(
                "Skipping type {} ({:?}, not an instantiable {})",
                qualified_name,
                descriptor.kind,
                self.capability
            );
            return None;
        }

        Some(DiscoveredType::new(descriptor, self.location.clone()))
    }
}

impl ResourceAndTypeScanner for ClassPathScanner<'_> {
    fn scan_for_resources(&mut self) -> Result<Vec<LoadableResource>, BackendError> {
        Ok(self.resources()?.to_vec())
    }

    fn scan_for_types(&mut self) -> Result<Vec<DiscoveredType>, BackendError> {
        if !self.location.is_classpath() {
            return Ok(Vec::new());
        }

        self.resources()?;
        let resources = self.resources.as_deref().unwrap_or_default();
        Ok(resources
            .iter()
            .filter_map(|resource| self.discover_type(resource))
            .collect())
    }
}

/// Strip `<location_path>/` from a root-relative name.
fn strip_location<'n>(name: &'n str, location_path: &str) -> &'n str {
    if location_path.is_empty() {
        return name;
    }
    name.strip_prefix(location_path)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
}

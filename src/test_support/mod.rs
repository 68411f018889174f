//! Test utilities for scanner unit tests.
//!
//! Fixtures build real directories and archives; `MockBackend` stands in
//! for a location backend so the aggregator can be tested without any
//! medium at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::core::Location;
//! use crate::test_support::{resource, MockBackend};
//!
//! let loc = Location::classpath("sqls");
//! let backend = MockBackend::new().with_resource(resource(&loc, "V1__init.sql"));
//! ```

pub mod fixtures;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::core::{DiscoveredType, Encoding, LoadableResource, Location, ResourceOrigin};
use crate::sources::{BackendError, ResourceAndTypeScanner};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Build a resource under a location whose bytes would live at
/// `/srv/<location path>/<relative path>`.
pub fn resource(location: &Location, relative_path: &str) -> LoadableResource {
    let disk = PathBuf::from("/srv")
        .join(location.path().trim_start_matches('/'))
        .join(relative_path);
    LoadableResource::new(
        location.clone(),
        relative_path,
        ResourceOrigin::File(disk),
        Encoding::Utf8,
    )
}

/// Which backend call a mock should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Resources,
    Types,
}

/// Mock location backend returning canned results.
///
/// Calls are recorded in a shared log so a test can check how often the
/// aggregator asked for each location.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    resources: Vec<LoadableResource>,
    types: Vec<DiscoveredType>,
    fail_on: Option<FailOn>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    /// Create a backend that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to return.
    pub fn with_resource(mut self, resource: LoadableResource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Add a type to return.
    pub fn with_type(mut self, ty: DiscoveredType) -> Self {
        self.types.push(ty);
        self
    }

    /// Fail the given call with a `NotADirectory` error.
    pub fn failing(mut self, fail_on: FailOn) -> Self {
        self.fail_on = Some(fail_on);
        self
    }

    /// Share a call log with other mocks.
    pub fn with_log(mut self, calls: Arc<Mutex<Vec<String>>>) -> Self {
        self.calls = calls;
        self
    }

    /// Recorded calls, e.g. `resources` or `types`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn check(&self, call: FailOn) -> Result<(), BackendError> {
        if self.fail_on == Some(call) {
            return Err(BackendError::NotADirectory {
                path: PathBuf::from("/srv/broken"),
            });
        }
        Ok(())
    }
}

impl ResourceAndTypeScanner for MockBackend {
    fn scan_for_resources(&mut self) -> Result<Vec<LoadableResource>, BackendError> {
        self.record("resources");
        self.check(FailOn::Resources)?;
        Ok(self.resources.clone())
    }

    fn scan_for_types(&mut self) -> Result<Vec<DiscoveredType>, BackendError> {
        self.record("types");
        self.check(FailOn::Types)?;
        Ok(self.types.clone())
    }
}

/// Assertion helpers for testing.
pub mod assertions {
    use crate::core::LoadableResource;

    /// Relative paths of resources, in order.
    pub fn relative_paths<'a, I>(resources: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a LoadableResource>,
    {
        resources
            .into_iter()
            .map(|r| r.relative_path().to_string())
            .collect()
    }

    /// Assert that an error's display chain contains a substring.
    pub fn assert_error_contains(err: &dyn std::error::Error, substring: &str) {
        let mut msg = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        assert!(
            msg.contains(substring),
            "error '{}' does not contain '{}'",
            msg,
            substring
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_helper_paths() {
        let loc = Location::classpath("sqls");
        let res = resource(&loc, "V1__init.sql");
        assert_eq!(res.location_path(), "sqls/V1__init.sql");
        assert_eq!(res.absolute_path(), "/srv/sqls/V1__init.sql");
    }

    #[test]
    fn test_mock_backend_records_calls() {
        let loc = Location::classpath("sqls");
        let mut backend = MockBackend::new().with_resource(resource(&loc, "a.sql"));

        assert_eq!(backend.scan_for_resources().unwrap().len(), 1);
        assert!(backend.scan_for_types().unwrap().is_empty());
        assert_eq!(backend.calls(), vec!["resources", "types"]);
    }

    #[test]
    fn test_mock_backend_failure() {
        let mut backend = MockBackend::new().failing(FailOn::Types);
        assert!(backend.scan_for_resources().is_ok());
        assert!(backend.scan_for_types().is_err());
    }
}

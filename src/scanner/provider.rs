//! Query surface over scanned resources and types.

use crate::core::{DiscoveredType, LoadableResource};
use crate::scanner::ScanError;

/// Lookup of resources by name or by file name pattern.
pub trait ResourceProvider {
    /// Find a resource by relative path, or by absolute path on its medium.
    ///
    /// Matching ignores case. Returns `None` when nothing matches.
    fn get_resource(&self, name: &str) -> Option<&LoadableResource>;

    /// Find every resource whose file name starts with `prefix` and ends
    /// with one of `suffixes`, in discovery order.
    ///
    /// A file name made of nothing but the prefix and a suffix does not
    /// match. `suffixes` must not be empty.
    fn get_resources(
        &self,
        prefix: &str,
        suffixes: &[&str],
    ) -> Result<Vec<&LoadableResource>, ScanError>;
}

/// Listing of discovered capability-implementing types.
pub trait TypeProvider {
    /// All discovered types, in discovery order.
    fn get_types(&self) -> &[DiscoveredType];
}

/// Check `s` against a prefix and a set of suffixes.
///
/// An empty prefix matches anything. A suffix only counts when `s` is
/// strictly longer than prefix and suffix together.
pub fn starts_and_ends_with(s: &str, prefix: &str, suffixes: &[&str]) -> bool {
    if !prefix.is_empty() && !s.starts_with(prefix) {
        return false;
    }
    suffixes
        .iter()
        .any(|suffix| s.ends_with(suffix) && s.len() > prefix.len() + suffix.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_suffix() {
        assert!(starts_and_ends_with("V1__init.sql", "V", &[".sql"]));
        assert!(!starts_and_ends_with("R__view.sql", "V", &[".sql"]));
        assert!(!starts_and_ends_with("V1__init.txt", "V", &[".sql"]));
    }

    #[test]
    fn test_bare_prefix_plus_suffix_rejected() {
        assert!(!starts_and_ends_with("V.sql", "V", &[".sql"]));
        assert!(starts_and_ends_with("V1.sql", "V", &[".sql"]));
    }

    #[test]
    fn test_empty_prefix_and_any_suffix() {
        assert!(starts_and_ends_with("a.conf", "", &[".sql", ".conf"]));
        assert!(!starts_and_ends_with(".sql", "", &[".sql"]));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!starts_and_ends_with("v1__init.sql", "V", &[".sql"]));
        assert!(!starts_and_ends_with("V1__init.SQL", "V", &[".sql"]));
    }
}

//! The scan environment: classpath roots plus a type resolver.
//!
//! This plays the role a class loader plays for a JVM scanner. Classpath
//! locations are looked up in every root, and type units found under them
//! are resolved to descriptors through the [`TypeResolver`].

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::TypeDescriptor;

/// Resolves qualified type names to descriptors.
pub trait TypeResolver: Send + Sync {
    /// Look up a descriptor by fully qualified name.
    fn resolve(&self, qualified_name: &str) -> Option<Arc<TypeDescriptor>>;
}

/// In-memory type resolver.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one with the same name.
    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        self.types
            .insert(descriptor.name.clone(), Arc::new(descriptor));
    }

    /// Builder-style registration.
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for TypeCatalog {
    fn resolve(&self, qualified_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.get(qualified_name).cloned()
    }
}

impl FromIterator<TypeDescriptor> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = TypeCatalog::new();
        for descriptor in iter {
            catalog.insert(descriptor);
        }
        catalog
    }
}

/// Classpath roots and type resolution shared by every backend scan.
#[derive(Clone)]
pub struct ScanEnvironment {
    classpath: Vec<PathBuf>,
    resolver: Arc<dyn TypeResolver>,
}

impl ScanEnvironment {
    /// Create an environment with no roots and an empty catalog.
    pub fn new() -> Self {
        ScanEnvironment {
            classpath: Vec::new(),
            resolver: Arc::new(TypeCatalog::new()),
        }
    }

    /// Append a classpath root (directory or archive).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.classpath.push(root.into());
        self
    }

    /// Replace the classpath roots.
    pub fn with_classpath(mut self, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        self.classpath = roots.into_iter().collect();
        self
    }

    /// Replace the type resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn TypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Classpath roots in search order.
    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    /// The type resolver.
    pub fn resolver(&self) -> &dyn TypeResolver {
        self.resolver.as_ref()
    }
}

impl Default for ScanEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScanEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanEnvironment")
            .field("classpath", &self.classpath)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TypeKind;

    #[test]
    fn test_catalog_resolve() {
        let catalog = TypeCatalog::new()
            .with(TypeDescriptor::concrete("db.migration.V2__Seed").with_capability("migration"))
            .with(TypeDescriptor::new("db.migration.Base", TypeKind::Abstract));

        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve("db.migration.V2__Seed").is_some());
        assert!(catalog.resolve("db.migration.Missing").is_none());
    }

    #[test]
    fn test_catalog_last_insert_wins() {
        let catalog: TypeCatalog = vec![
            TypeDescriptor::new("a.B", TypeKind::Abstract),
            TypeDescriptor::concrete("a.B"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.resolve("a.B").unwrap().is_instantiable());
    }

    #[test]
    fn test_environment_roots_in_order() {
        let env = ScanEnvironment::new()
            .with_root("target/classes")
            .with_root("lib/app.jar");

        assert_eq!(
            env.classpath(),
            &[PathBuf::from("target/classes"), PathBuf::from("lib/app.jar")]
        );
    }
}

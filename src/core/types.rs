//! Type descriptors and capability markers.
//!
//! Type discovery never inspects code: a scan environment supplies
//! descriptors through a [`TypeResolver`](crate::core::environment::TypeResolver)
//! and the backend keeps the ones that satisfy the requested [`Capability`].

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::Location;

/// The interface a discovered type must implement to be reported.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Create a capability marker.
    pub fn new(name: impl Into<String>) -> Self {
        Capability(name.into())
    }

    /// Get the capability name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a descriptor implements this capability and can be
    /// instantiated.
    pub fn is_satisfied_by(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.implements(self) && descriptor.is_instantiable()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        Capability::new(s)
    }
}

/// What kind of type a descriptor describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A concrete, instantiable type
    #[default]
    Concrete,
    /// An abstract type that cannot be instantiated
    Abstract,
    /// An interface
    Interface,
}

/// Description of a candidate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Fully qualified, dot-separated name
    pub name: String,

    /// Capabilities the type implements
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,

    /// Kind of the type
    #[serde(default)]
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a descriptor with no capabilities.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeDescriptor {
            name: name.into(),
            capabilities: BTreeSet::new(),
            kind,
        }
    }

    /// Create a concrete descriptor.
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Concrete)
    }

    /// Add an implemented capability.
    pub fn with_capability(mut self, capability: impl Into<Capability>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Check if the type implements a capability.
    pub fn implements(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Check if the type can be instantiated.
    pub fn is_instantiable(&self) -> bool {
        matches!(self.kind, TypeKind::Concrete)
    }

    /// The simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// A concrete type found under a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredType {
    descriptor: Arc<TypeDescriptor>,
    location: Location,
}

impl DiscoveredType {
    /// Create a discovered type.
    pub fn new(descriptor: Arc<TypeDescriptor>, location: Location) -> Self {
        DiscoveredType {
            descriptor,
            location,
        }
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The type descriptor.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// The location the type was found under.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_satisfied_by_concrete_implementor() {
        let cap = Capability::new("migration");
        let ty = TypeDescriptor::concrete("db.migration.V2__Seed").with_capability("migration");
        assert!(cap.is_satisfied_by(&ty));
    }

    #[test]
    fn test_capability_rejects_abstract_and_non_implementors() {
        let cap = Capability::new("migration");

        let abstract_ty =
            TypeDescriptor::new("db.migration.Base", TypeKind::Abstract).with_capability("migration");
        let interface_ty =
            TypeDescriptor::new("db.migration.Api", TypeKind::Interface).with_capability("migration");
        let other = TypeDescriptor::concrete("db.migration.Helper").with_capability("callback");

        assert!(!cap.is_satisfied_by(&abstract_ty));
        assert!(!cap.is_satisfied_by(&interface_ty));
        assert!(!cap.is_satisfied_by(&other));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(TypeDescriptor::concrete("a.b.C").simple_name(), "C");
        assert_eq!(TypeDescriptor::concrete("C").simple_name(), "C");
    }

    #[test]
    fn test_descriptor_from_toml() {
        let ty: TypeDescriptor = toml::from_str(
            r#"
name = "db.migration.V3__Backfill"
capabilities = ["migration"]
kind = "concrete"
"#,
        )
        .unwrap();

        assert_eq!(ty.simple_name(), "V3__Backfill");
        assert!(ty.implements(&Capability::new("migration")));
        assert!(ty.is_instantiable());
    }
}

//! Core data types: locations, resources, type descriptors.

pub mod environment;
pub mod location;
pub mod migration;
pub mod resource;
pub mod types;

pub use environment::{ScanEnvironment, TypeCatalog, TypeResolver};
pub use location::{Location, LocationKind};
pub use migration::{MigrationNaming, MigrationType};
pub use resource::{Encoding, LoadableResource, ResourceOrigin};
pub use types::{Capability, DiscoveredType, TypeDescriptor, TypeKind};

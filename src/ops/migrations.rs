//! Migration listing.

use anyhow::Result;
use serde::Serialize;

use crate::core::{Location, MigrationNaming, MigrationType};
use crate::scanner::{Scanner, TypeProvider};

/// One discovered migration, SQL script or code-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationEntry {
    /// Migration type
    #[serde(rename = "type")]
    pub kind: MigrationType,

    /// Whether it is a repeatable migration
    pub repeatable: bool,

    /// Script file name or simple type name
    pub name: String,

    /// Classpath-style script path or qualified type name
    pub path: String,

    /// Location it was found under
    pub location: Location,
}

/// Classify the scanner's resources and types as migrations.
///
/// SQL scripts come first (versioned, undo, repeatable), then code-based
/// migrations in discovery order. Types whose names follow no migration
/// convention are skipped.
pub fn list_migrations(scanner: &Scanner, naming: &MigrationNaming) -> Result<Vec<MigrationEntry>> {
    let mut entries: Vec<MigrationEntry> = naming
        .sql_migrations(scanner)?
        .into_iter()
        .map(|m| MigrationEntry {
            kind: m.kind,
            repeatable: m.repeatable,
            name: m.resource.filename().to_string(),
            path: m.resource.location_path().to_string(),
            location: m.resource.location().clone(),
        })
        .collect();

    for ty in scanner.get_types() {
        let simple_name = ty.descriptor().simple_name();
        let Some(kind) = naming.classify_type(simple_name) else {
            tracing::debug!("Type {} does not follow migration naming", ty.name());
            continue;
        };
        entries.push(MigrationEntry {
            kind,
            repeatable: naming.is_repeatable(simple_name),
            name: simple_name.to_string(),
            path: ty.name().to_string(),
            location: ty.location().clone(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::{DiscoveredType, TypeDescriptor};
    use crate::sources::ResourceAndTypeScanner;
    use crate::test_support::{resource, MockBackend};

    #[test]
    fn test_sql_then_code_migrations() {
        let loc = Location::classpath("db/migration");
        let locations = vec![loc.clone()];
        let scanner = Scanner::scan_with(&locations, |location| {
            let mut backend = MockBackend::new()
                .with_resource(resource(location, "V1__init.sql"))
                .with_resource(resource(location, "R__views.sql"));
            for name in ["db.migration.V2__Seed", "db.migration.R__Refresh", "db.migration.Helper"] {
                backend = backend.with_type(DiscoveredType::new(
                    Arc::new(TypeDescriptor::concrete(name).with_capability("migration")),
                    location.clone(),
                ));
            }
            let backend: Box<dyn ResourceAndTypeScanner> = Box::new(backend);
            Ok(backend)
        })
        .unwrap();

        let entries = list_migrations(&scanner, &MigrationNaming::default()).unwrap();
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.kind, e.repeatable))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("V1__init.sql", MigrationType::Sql, false),
                ("R__views.sql", MigrationType::Sql, true),
                ("V2__Seed", MigrationType::Jdbc, false),
                ("R__Refresh", MigrationType::Jdbc, true),
            ]
        );
        assert_eq!(entries[2].path, "db.migration.V2__Seed");
        assert_eq!(entries[0].location, loc);
    }
}

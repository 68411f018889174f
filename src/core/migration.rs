//! Migration types and SQL migration naming.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::LoadableResource;
use crate::scanner::{ResourceProvider, ScanError};

/// Type of migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationType {
    /// Schema creation migration
    Schema,
    /// Baseline migration
    Baseline,
    /// SQL migrations
    Sql,
    /// Undo SQL migrations
    UndoSql,
    /// Code-based migrations
    Jdbc,
    /// Undo code-based migrations
    UndoJdbc,
    /// Spring JDBC code-based migrations (superseded by `Jdbc`)
    SpringJdbc,
    /// Undo Spring JDBC code-based migrations (superseded by `UndoJdbc`)
    UndoSpringJdbc,
    /// Migrations from custom resolvers
    Custom,
    /// Undo migrations from custom resolvers
    UndoCustom,
}

impl MigrationType {
    /// The upper-case name used in reports (`SQL`, `UNDO_JDBC`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationType::Schema => "SCHEMA",
            MigrationType::Baseline => "BASELINE",
            MigrationType::Sql => "SQL",
            MigrationType::UndoSql => "UNDO_SQL",
            MigrationType::Jdbc => "JDBC",
            MigrationType::UndoJdbc => "UNDO_JDBC",
            MigrationType::SpringJdbc => "SPRING_JDBC",
            MigrationType::UndoSpringJdbc => "UNDO_SPRING_JDBC",
            MigrationType::Custom => "CUSTOM",
            MigrationType::UndoCustom => "UNDO_CUSTOM",
        }
    }

    /// Whether this type only ever appears in the schema history table and
    /// is never discovered by a scan.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, MigrationType::Schema | MigrationType::Baseline)
    }

    /// Whether this migration undoes an earlier one.
    pub fn is_undo(&self) -> bool {
        matches!(
            self,
            MigrationType::UndoSql
                | MigrationType::UndoJdbc
                | MigrationType::UndoSpringJdbc
                | MigrationType::UndoCustom
        )
    }
}

impl fmt::Display for MigrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Naming conventions for SQL migration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationNaming {
    /// Prefix of versioned migrations (e.g. `V1__init.sql`)
    pub versioned_prefix: String,

    /// Prefix of undo migrations (e.g. `U1__init.sql`)
    pub undo_prefix: String,

    /// Prefix of repeatable migrations (e.g. `R__views.sql`)
    pub repeatable_prefix: String,

    /// Separator between version and description
    pub separator: String,

    /// Accepted file suffixes
    pub suffixes: Vec<String>,
}

impl Default for MigrationNaming {
    fn default() -> Self {
        MigrationNaming {
            versioned_prefix: "V".to_string(),
            undo_prefix: "U".to_string(),
            repeatable_prefix: "R".to_string(),
            separator: "__".to_string(),
            suffixes: vec![".sql".to_string()],
        }
    }
}

/// A resource classified as a SQL migration.
#[derive(Debug, Clone, Copy)]
pub struct SqlMigration<'a> {
    /// The migration type
    pub kind: MigrationType,
    /// Whether it is a repeatable migration
    pub repeatable: bool,
    /// The backing resource
    pub resource: &'a LoadableResource,
}

impl MigrationNaming {
    /// Classify a file name, returning `None` for non-migrations.
    pub fn classify(&self, filename: &str) -> Option<MigrationType> {
        let suffix = self.suffixes.iter().find(|s| filename.ends_with(s.as_str()))?;
        let stem = &filename[..filename.len() - suffix.len()];
        self.classify_stem(stem, MigrationType::UndoSql, MigrationType::Sql)
    }

    /// Classify a code-based migration by its simple type name.
    pub fn classify_type(&self, simple_name: &str) -> Option<MigrationType> {
        self.classify_stem(simple_name, MigrationType::UndoJdbc, MigrationType::Jdbc)
    }

    fn classify_stem(
        &self,
        stem: &str,
        undo: MigrationType,
        forward: MigrationType,
    ) -> Option<MigrationType> {
        // Undo is checked first so a custom prefix that extends the
        // versioned one still classifies correctly.
        for (prefix, kind) in [
            (&self.undo_prefix, undo),
            (&self.versioned_prefix, forward),
            (&self.repeatable_prefix, forward),
        ] {
            if let Some(rest) = stem.strip_prefix(prefix.as_str()) {
                if rest.contains(self.separator.as_str()) {
                    return Some(kind);
                }
            }
        }
        None
    }

    /// Whether a name carries the repeatable prefix.
    pub fn is_repeatable(&self, name: &str) -> bool {
        name.strip_prefix(self.repeatable_prefix.as_str())
            .is_some_and(|rest| rest.starts_with(self.separator.as_str()))
    }

    /// Collect SQL migrations from a resource provider, versioned first,
    /// then undo, then repeatable.
    pub fn sql_migrations<'a>(
        &self,
        provider: &'a dyn ResourceProvider,
    ) -> Result<Vec<SqlMigration<'a>>, ScanError> {
        let suffixes: Vec<&str> = self.suffixes.iter().map(String::as_str).collect();
        let mut migrations = Vec::new();

        for (prefix, kind, repeatable) in [
            (&self.versioned_prefix, MigrationType::Sql, false),
            (&self.undo_prefix, MigrationType::UndoSql, false),
            (&self.repeatable_prefix, MigrationType::Sql, true),
        ] {
            for resource in provider.get_resources(prefix, &suffixes)? {
                if self.classify(resource.filename()) == Some(kind) {
                    migrations.push(SqlMigration {
                        kind,
                        repeatable,
                        resource,
                    });
                }
            }
        }

        Ok(migrations)
    }
}

//! Filesystem utilities.

use std::path::{Component, Path, PathBuf};

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_to_slash() {
        let base = Path::new("/srv/app/classes");
        let file = Path::new("/srv/app/classes/db/migration/V1__init.sql");

        let rel = relative_path(base, file);
        assert_eq!(to_slash(&rel), "db/migration/V1__init.sql");
    }

    #[test]
    fn test_resolve_against() {
        let base = Path::new("/work");
        assert_eq!(resolve_against(base, Path::new("lib/a.jar")), PathBuf::from("/work/lib/a.jar"));
        assert_eq!(resolve_against(base, Path::new("/opt/a.jar")), PathBuf::from("/opt/a.jar"));
    }
}

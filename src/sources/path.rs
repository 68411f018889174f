//! Directory scanner - resources stored as plain files.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::ResourceOrigin;
use crate::sources::{BackendError, LocationScanner, Medium, Stamp};
use crate::util::fs::{relative_path, to_slash};

/// Walks a directory tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Create a directory scanner.
    pub fn new() -> Self {
        DirectoryScanner
    }
}

fn location_dir(root: &Path, location_path: &str) -> PathBuf {
    if location_path.is_empty() {
        root.to_path_buf()
    } else {
        root.join(location_path)
    }
}

impl LocationScanner for DirectoryScanner {
    fn medium(&self) -> Medium {
        Medium::Directory
    }

    fn find_resource_names(
        &self,
        root: &Path,
        location_path: &str,
    ) -> Result<Vec<String>, BackendError> {
        let dir = location_dir(root, location_path);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        tracing::debug!("Scanning directory {} for resources", dir.display());

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_broken_link(&err) => {
                    tracing::warn!("Skipping unresolvable link: {}", err);
                    continue;
                }
                Err(source) => {
                    return Err(BackendError::Walk {
                        path: dir.clone(),
                        source,
                    })
                }
            };

            // Links are followed, so a link to a file reports as a file
            if !entry.file_type().is_file() {
                continue;
            }

            names.push(to_slash(&relative_path(root, entry.path())));
        }

        names.sort();
        Ok(names)
    }

    fn origin(&self, root: &Path, name: &str) -> ResourceOrigin {
        ResourceOrigin::File(root.join(name))
    }

    fn stamp(&self, root: &Path, location_path: &str) -> Option<Stamp> {
        Stamp::of_tree(&location_dir(root, location_path))
    }
}

/// A dangling link or a link cycle.
fn is_broken_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_tree;
    use tempfile::TempDir;

    #[test]
    fn test_finds_nested_files_sorted() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[
                ("db/migration/V2__add.sql", "b"),
                ("db/migration/V1__init.sql", "a"),
                ("db/migration/sub/R__view.sql", "c"),
                ("db/other/ignored.sql", "d"),
            ],
        );

        let names = DirectoryScanner::new()
            .find_resource_names(tmp.path(), "db/migration")
            .unwrap();

        assert_eq!(
            names,
            vec![
                "db/migration/V1__init.sql",
                "db/migration/V2__add.sql",
                "db/migration/sub/R__view.sql",
            ]
        );
    }

    #[test]
    fn test_missing_location_path_is_empty() {
        let tmp = TempDir::new().unwrap();
        let names = DirectoryScanner::new()
            .find_resource_names(tmp.path(), "nowhere")
            .unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_empty_location_path_lists_root() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("a.sql", "a"), ("dir/b.sql", "b")]);

        let names = DirectoryScanner::new()
            .find_resource_names(tmp.path(), "")
            .unwrap();
        assert_eq!(names, vec!["a.sql", "dir/b.sql"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_found() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("real/V1__a.sql", "a"), ("shared/R__v.sql", "v")]);
        std::fs::create_dir_all(tmp.path().join("loc")).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("real/V1__a.sql"),
            tmp.path().join("loc/V1__a.sql"),
        )
        .unwrap();
        std::os::unix::fs::symlink(tmp.path().join("shared"), tmp.path().join("loc/shared")).unwrap();

        let names = DirectoryScanner::new()
            .find_resource_names(tmp.path(), "loc")
            .unwrap();
        assert_eq!(names, vec!["loc/V1__a.sql", "loc/shared/R__v.sql"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("loc/V1__a.sql", "a")]);
        std::os::unix::fs::symlink(tmp.path().join("gone.sql"), tmp.path().join("loc/V2__b.sql"))
            .unwrap();

        let names = DirectoryScanner::new()
            .find_resource_names(tmp.path(), "loc")
            .unwrap();
        assert_eq!(names, vec!["loc/V1__a.sql"]);
    }

    #[test]
    fn test_stamp_covers_nested_directories() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("sqls/sub/V1__a.sql", "a")]);
        let scanner = DirectoryScanner::new();

        let before = scanner.stamp(tmp.path(), "sqls");
        write_tree(tmp.path(), &[("sqls/sub/V2__b.sql", "b")]);

        assert!(before.is_some());
        assert_ne!(before, scanner.stamp(tmp.path(), "sqls"));
        assert_eq!(scanner.stamp(tmp.path(), "nowhere"), None);
    }

    #[test]
    fn test_origin_points_into_root() {
        let origin = DirectoryScanner::new().origin(Path::new("/srv/classes"), "sqls/a.sql");
        assert_eq!(origin, ResourceOrigin::File(PathBuf::from("/srv/classes/sqls/a.sql")));
    }
}

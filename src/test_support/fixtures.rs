//! Test fixtures for common scan scenarios.
//!
//! Fixtures write real directory trees and archives into a temp dir so the
//! location scanners run against the same media they see in production.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write `(relative path, content)` files below `dir`.
pub fn write_tree(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        std::fs::write(&path, content).expect("failed to write fixture file");
    }
}

/// Set a directory's modification time, so a later change to it is seen
/// even within the filesystem's timestamp granularity.
pub fn set_dir_modified(dir: &Path, time: SystemTime) {
    File::open(dir)
        .expect("failed to open fixture dir")
        .set_modified(time)
        .expect("failed to set fixture dir mtime");
}

/// Write a zip (or jar) archive with the given entries.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).expect("failed to create zip fixture");
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        zip.start_file(*name, options).expect("failed to start zip entry");
        zip.write_all(content.as_bytes())
            .expect("failed to write zip entry");
    }
    zip.finish().expect("failed to finish zip fixture");
}

/// Write a tar archive, gzip-compressed when `gzip` is set.
pub fn write_tar(path: &Path, entries: &[(&str, &str)], gzip: bool) {
    let file = File::create(path).expect("failed to create tar fixture");
    if gzip {
        let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
        append_tar_entries(&mut builder, entries);
        builder
            .into_inner()
            .expect("failed to finish tar fixture")
            .finish()
            .expect("failed to finish gzip stream");
    } else {
        let mut builder = Builder::new(file);
        append_tar_entries(&mut builder, entries);
        builder.finish().expect("failed to finish tar fixture");
    }
}

fn append_tar_entries<W: Write>(builder: &mut Builder<W>, entries: &[(&str, &str)]) {
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, content.as_bytes())
            .expect("failed to append tar entry");
    }
}

/// A set of files that can be laid out on any supported medium.
#[derive(Debug, Clone, Default)]
pub struct ResourceFixture {
    /// Files (root-relative path -> content).
    pub files: BTreeMap<String, String>,
}

impl ResourceFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// A migration folder with two versioned scripts and one repeatable one.
    pub fn migrations(location_path: &str) -> Self {
        ResourceFixture::new()
            .file(
                &format!("{location_path}/V1__init.sql"),
                "create table person (id int);",
            )
            .file(
                &format!("{location_path}/V2__add.sql"),
                "alter table person add name varchar(64);",
            )
            .file(
                &format!("{location_path}/R__view.sql"),
                "create or replace view people as select * from person;",
            )
    }

    /// Add a file.
    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
            .collect()
    }

    /// Lay the files out below a directory.
    pub fn write_dir(&self, dir: &Path) {
        write_tree(dir, &self.entries());
    }

    /// Pack the files into a zip archive.
    pub fn write_zip(&self, path: &Path) {
        write_zip(path, &self.entries());
    }

    /// Pack the files into a tar archive.
    pub fn write_tar(&self, path: &Path, gzip: bool) {
        write_tar(path, &self.entries(), gzip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_migration_fixture_files() {
        let fixture = ResourceFixture::migrations("db/migration");
        assert_eq!(fixture.files.len(), 3);
        assert!(fixture.files.contains_key("db/migration/R__view.sql"));
    }

    #[test]
    fn test_write_dir() {
        let tmp = TempDir::new().unwrap();
        ResourceFixture::migrations("sqls").write_dir(tmp.path());
        assert!(tmp.path().join("sqls/V1__init.sql").is_file());
    }
}

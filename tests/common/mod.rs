//! Fixture helpers shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Write `(relative path, content)` files below `root`.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Write a jar (zip) archive with the given entries.
pub fn write_jar(path: &Path, files: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    for (name, content) in files {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Write a gzip-compressed tar archive with the given entries.
pub fn write_tar_gz(path: &Path, files: &[(&str, &str)]) {
    let encoder = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Backdate a directory's modification time.
pub fn backdate_dir(dir: &Path) {
    fs::File::open(dir)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH)
        .unwrap();
}

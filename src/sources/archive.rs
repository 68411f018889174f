//! Archive scanners - resources stored as zip/jar or tar entries.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::ResourceOrigin;
use crate::sources::{BackendError, LocationScanner, Medium};
use crate::util::fs::to_slash;

/// Check whether an entry name lies below a location path.
fn is_under(name: &str, location_path: &str) -> bool {
    location_path.is_empty()
        || name
            .strip_prefix(location_path)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn open_zip(path: &Path) -> Result<ZipArchive<BufReader<File>>, BackendError> {
    let file = File::open(path).map_err(|source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(BufReader::new(file)).map_err(|source| BackendError::Zip {
        path: path.to_path_buf(),
        source,
    })
}

fn open_tar(path: &Path, gzip: bool) -> io::Result<Archive<Box<dyn Read>>> {
    let file = BufReader::new(File::open(path)?);
    let reader: Box<dyn Read> = if gzip {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Archive::new(reader))
}

/// Lists entries of zip, jar and war archives.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipScanner;

impl ZipScanner {
    /// Create a zip scanner.
    pub fn new() -> Self {
        ZipScanner
    }
}

impl LocationScanner for ZipScanner {
    fn medium(&self) -> Medium {
        Medium::Zip
    }

    fn find_resource_names(
        &self,
        root: &Path,
        location_path: &str,
    ) -> Result<Vec<String>, BackendError> {
        tracing::debug!("Scanning zip archive {} for resources", root.display());

        let archive = open_zip(root)?;
        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .filter(|name| is_under(name, location_path))
            .map(str::to_string)
            .collect();

        names.sort();
        Ok(names)
    }

    fn origin(&self, root: &Path, name: &str) -> ResourceOrigin {
        ResourceOrigin::Zip {
            archive: root.to_path_buf(),
            entry: name.to_string(),
        }
    }
}

/// Lists entries of tar archives, plain or gzip-compressed.
#[derive(Debug, Clone, Copy)]
pub struct TarScanner {
    gzip: bool,
}

impl TarScanner {
    /// Scanner for uncompressed `.tar` archives.
    pub fn plain() -> Self {
        TarScanner { gzip: false }
    }

    /// Scanner for `.tar.gz` / `.tgz` archives.
    pub fn gzip() -> Self {
        TarScanner { gzip: true }
    }
}

impl LocationScanner for TarScanner {
    fn medium(&self) -> Medium {
        if self.gzip {
            Medium::TarGz
        } else {
            Medium::Tar
        }
    }

    fn find_resource_names(
        &self,
        root: &Path,
        location_path: &str,
    ) -> Result<Vec<String>, BackendError> {
        tracing::debug!("Scanning tar archive {} for resources", root.display());

        let io_err = |source| BackendError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut archive = open_tar(root, self.gzip).map_err(io_err)?;
        let mut names = Vec::new();
        for entry in archive.entries().map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !matches!(
                entry.header().entry_type(),
                tar::EntryType::Regular | tar::EntryType::Continuous
            ) {
                continue;
            }
            let name = to_slash(&entry.path().map_err(io_err)?);
            if is_under(&name, location_path) {
                names.push(name);
            }
        }

        names.sort();
        names.dedup();
        Ok(names)
    }

    fn origin(&self, root: &Path, name: &str) -> ResourceOrigin {
        ResourceOrigin::Tar {
            archive: root.to_path_buf(),
            entry: name.to_string(),
            gzip: self.gzip,
        }
    }
}

/// Read one entry of a zip archive.
pub fn read_zip_entry(archive: &Path, entry: &str) -> io::Result<Vec<u8>> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(zip_to_io)?;
    let mut file = zip.by_name(entry).map_err(zip_to_io)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Read one entry of a tar archive by scanning it sequentially.
pub fn read_tar_entry(archive: &Path, entry: &str, gzip: bool) -> io::Result<Vec<u8>> {
    let mut tar = open_tar(archive, gzip)?;
    for candidate in tar.entries()? {
        let mut candidate = candidate?;
        if to_slash(&candidate.path()?) == entry {
            let mut bytes = Vec::new();
            candidate.read_to_end(&mut bytes)?;
            return Ok(bytes);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("entry `{}` not found in {}", entry, archive.display()),
    ))
}

fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(e) => e,
        ZipError::FileNotFound => io::Error::new(io::ErrorKind::NotFound, err),
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

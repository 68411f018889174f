//! Loadable resources.
//!
//! A resource records where it was found and how to read it. Content is
//! never read during a scan; `open` goes back to the backing medium.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Location;
use crate::sources::archive;
use crate::util::hash::sha256_reader;

/// Text encoding used by `read_to_string`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-8; invalid data is an error
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
    /// ISO-8859-1
    #[serde(rename = "iso-8859-1", alias = "latin1", alias = "ISO-8859-1")]
    Latin1,
}

impl Encoding {
    /// Decode raw bytes.
    pub fn decode(&self, bytes: Vec<u8>) -> io::Result<String> {
        match self {
            Encoding::Utf8 => {
                String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "iso-8859-1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            _ => Err(format!("unsupported encoding: {s}")),
        }
    }
}

/// Where a resource's bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceOrigin {
    /// A plain file
    File(PathBuf),
    /// An entry of a zip/jar archive
    Zip { archive: PathBuf, entry: String },
    /// An entry of a tar archive, optionally gzip-compressed
    Tar {
        archive: PathBuf,
        entry: String,
        gzip: bool,
    },
}

impl ResourceOrigin {
    /// The file on disk holding the resource (the archive for entries).
    pub fn disk_path(&self) -> &Path {
        match self {
            ResourceOrigin::File(path) => path,
            ResourceOrigin::Zip { archive, .. } | ResourceOrigin::Tar { archive, .. } => archive,
        }
    }
}

/// A named, lazily readable artifact found under a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadableResource {
    location: Location,
    relative_path: String,
    location_path: String,
    origin: ResourceOrigin,
    encoding: Encoding,
}

impl LoadableResource {
    /// Create a resource. `relative_path` must already use `/` separators.
    pub fn new(
        location: Location,
        relative_path: impl Into<String>,
        origin: ResourceOrigin,
        encoding: Encoding,
    ) -> Self {
        let relative_path = relative_path.into();
        let location_path = location.join(&relative_path);
        LoadableResource {
            location,
            relative_path,
            location_path,
            origin,
            encoding,
        }
    }

    /// The location this resource was found under.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Path relative to the location.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Location path joined with the relative path (e.g. `db/migration/V1__init.sql`).
    pub fn location_path(&self) -> &str {
        &self.location_path
    }

    /// The final path segment.
    pub fn filename(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// The backing medium.
    pub fn origin(&self) -> &ResourceOrigin {
        &self.origin
    }

    /// The configured text encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Absolute path on the backing medium.
    ///
    /// Archive entries use `<archive>!/<entry>`.
    pub fn absolute_path(&self) -> String {
        let disk = absolute(self.origin.disk_path());
        match &self.origin {
            ResourceOrigin::File(_) => disk.to_string_lossy().into_owned(),
            ResourceOrigin::Zip { entry, .. } | ResourceOrigin::Tar { entry, .. } => {
                format!("{}!/{}", disk.display(), entry)
            }
        }
    }

    /// Open the resource for reading.
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        match &self.origin {
            ResourceOrigin::File(path) => Ok(Box::new(File::open(path)?)),
            ResourceOrigin::Zip { archive, entry } => {
                Ok(Box::new(io::Cursor::new(archive::read_zip_entry(archive, entry)?)))
            }
            ResourceOrigin::Tar {
                archive,
                entry,
                gzip,
            } => Ok(Box::new(io::Cursor::new(archive::read_tar_entry(
                archive, entry, *gzip,
            )?))),
        }
    }

    /// Read the whole resource as bytes.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open()?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Read the whole resource as text using its encoding.
    pub fn read_to_string(&self) -> io::Result<String> {
        self.encoding.decode(self.read_bytes()?)
    }

    /// SHA-256 of the content, hex encoded.
    pub fn checksum(&self) -> io::Result<String> {
        sha256_reader(self.open()?)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl fmt::Display for LoadableResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.location_path, self.location)
    }
}

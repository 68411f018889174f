//! Hashing utilities for resource checksums.

use std::io::{self, BufReader, Read};

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of everything a reader yields.
pub fn sha256_reader(reader: impl Read) -> io::Result<String> {
    let mut reader = BufReader::new(reader);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

//! Checksummed snapshot file for the catalog
//!
//! Layout: one JSON header line carrying the crc32 of the payload,
//! followed by the JSON serialization of the tables. The payload checksum
//! is verified on every load; a mismatch or a missing payload is a hard
//! error, never a silent reset.
//!
//! Writes go to a sibling temp file first, then rename over the target,
//! so a crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};
use super::tables::Tables;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    checksum: u32,
}

/// Serializes the tables and writes the snapshot atomically.
pub fn save(path: &Path, tables: &Tables) -> CatalogResult<()> {
    let payload = serde_json::to_vec(tables)?;
    let header = serde_json::to_vec(&Header {
        checksum: crc32fast::hash(&payload),
    })?;

    let mut bytes = Vec::with_capacity(header.len() + 1 + payload.len());
    bytes.extend_from_slice(&header);
    bytes.push(b'\n');
    bytes.extend_from_slice(&payload);

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads and checksum-verifies a snapshot.
pub fn load(path: &Path) -> CatalogResult<Tables> {
    let bytes = fs::read(path)?;
    let split = bytes
        .iter()
        .position(|b| *b == b'\n')
        .ok_or(CatalogError::Truncated)?;

    let header: Header = serde_json::from_slice(&bytes[..split])?;
    let payload = &bytes[split + 1..];
    if payload.is_empty() {
        return Err(CatalogError::Truncated);
    }

    let computed = crc32fast::hash(payload);
    if computed != header.checksum {
        return Err(CatalogError::ChecksumMismatch {
            stored: header.checksum,
            computed,
        });
    }

    Ok(serde_json::from_slice(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tables() -> Tables {
        let mut tables = Tables::default();
        let book = tables.insert_book("Dune", None, Some(9.99), None);
        let author = tables.insert_author("Frank", "Herbert", None, None);
        tables.link_author(book, author);
        tables.insert_client("John", "Smith");
        tables
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.snapshot");
        let tables = sample_tables();

        save(&path, &tables).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, tables);
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.snapshot");
        save(&path, &sample_tables()).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        fs::write(&path, &bytes).unwrap();

        match load(&path) {
            Err(CatalogError::ChecksumMismatch { .. }) => {}
            other => panic!("expected checksum mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.snapshot");
        fs::write(&path, b"{\"checksum\":0}").unwrap();

        match load(&path) {
            Err(CatalogError::Truncated) => {}
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.snapshot");

        save(&path, &Tables::default()).unwrap();
        let tables = sample_tables();
        save(&path, &tables).unwrap();

        assert_eq!(load(&path).unwrap(), tables);
    }
}

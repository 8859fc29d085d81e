//! Archive decoding
//!
//! Entries that are too short for a resource header, or whose type tag is not
//! in the registry, are skipped with a debug log. Archives routinely carry
//! foreign files and one bad entry must not hide the rest.

use crate::error::Result;
use crate::resource::{HEADER_SIZE, ResourceEntry};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Turn `(path, bytes)` pairs into resources, dropping anything that is not
/// a recognizable resource.
pub fn decode_entries<I, S>(entries: I) -> Vec<ResourceEntry>
where
    I: IntoIterator<Item = (S, Vec<u8>)>,
    S: Into<String>,
{
    let mut resources = Vec::new();

    for (path, data) in entries {
        let path = path.into();
        if data.len() < HEADER_SIZE {
            tracing::debug!(
                "Skipping {}: too small for resource header ({} bytes)",
                path,
                data.len()
            );
            continue;
        }

        match ResourceEntry::from_bytes(path.clone(), data) {
            Ok(entry) => resources.push(entry),
            Err(err) => tracing::debug!("Skipping {}: {}", path, err),
        }
    }

    resources
}

/// Decode an `.o2r`/`.otr` archive held in memory.
///
/// # Errors
///
/// Returns [`Error::Zip`] if the container itself cannot be opened.
/// Individual entries that fail to read are skipped.
///
/// [`Error::Zip`]: crate::Error::Zip
pub fn read_o2r(bytes: &[u8]) -> Result<Vec<ResourceEntry>> {
    read_o2r_from(Cursor::new(bytes))
}

/// Decode an archive from any seekable reader.
///
/// # Errors
///
/// Returns [`Error::Zip`] if the container itself cannot be opened.
///
/// [`Error::Zip`]: crate::Error::Zip
pub fn read_o2r_from<R: Read + Seek>(reader: R) -> Result<Vec<ResourceEntry>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut raw = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = match archive.by_index(i) {
            Ok(file) => file,
            Err(err) => {
                tracing::debug!("Skipping archive entry {}: {}", i, err);
                continue;
            }
        };
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        let mut data = Vec::new();
        if let Err(err) = file.read_to_end(&mut data) {
            tracing::debug!("Skipping {}: {}", name, err);
            continue;
        }
        raw.push((name, data));
    }

    let total = raw.len();
    let resources = decode_entries(raw);
    tracing::info!(
        "Decoded {} resources ({} entries skipped)",
        resources.len(),
        total - resources.len()
    );
    Ok(resources)
}

/// Decode an archive file from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened and [`Error::Zip`] if
/// it is not a valid archive.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::Zip`]: crate::Error::Zip
pub fn read_o2r_file<P: AsRef<Path>>(path: P) -> Result<Vec<ResourceEntry>> {
    tracing::info!("Reading archive: {:?}", path.as_ref());
    let file = std::fs::File::open(path)?;
    read_o2r_from(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ResourceHeader, ResourceType};

    fn resource_bytes(ty: ResourceType, payload: &[u8]) -> Vec<u8> {
        let mut data = ResourceHeader::new(ty).to_bytes().to_vec();
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_decode_skips_short_and_unknown() {
        let mut unknown = vec![0u8; HEADER_SIZE];
        unknown[4..8].copy_from_slice(b"ZZZZ");

        let resources = decode_entries(vec![
            ("text/a", resource_bytes(ResourceType::Text, &[1, 2])),
            ("readme.txt", b"hello".to_vec()),
            ("foreign.bin", unknown),
            ("tex/b", resource_bytes(ResourceType::Texture, &[])),
        ]);

        let paths: Vec<_> = resources.iter().map(ResourceEntry::path).collect();
        assert_eq!(paths, vec!["text/a", "tex/b"]);
        assert_eq!(resources[0].payload(), &[1, 2]);
    }

    #[test]
    fn test_read_rejects_non_zip() {
        assert!(read_o2r(b"not an archive").is_err());
    }
}

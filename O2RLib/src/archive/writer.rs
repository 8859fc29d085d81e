//! Archive encoding

use super::{ArchiveCompression, ArchiveWriteOptions};
use crate::error::Result;
use crate::resource::ResourceEntry;
use indexmap::IndexMap;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Flatten resources into an ordered `path -> bytes` map.
///
/// Later entries with a duplicate path replace earlier ones but keep the
/// position of the first occurrence.
#[must_use]
pub fn encode_entries(entries: &[ResourceEntry]) -> IndexMap<String, Vec<u8>> {
    let mut files = IndexMap::with_capacity(entries.len());
    for entry in entries {
        if files
            .insert(entry.path().to_string(), entry.data().to_vec())
            .is_some()
        {
            tracing::debug!("Duplicate path {} overwritten", entry.path());
        }
    }
    files
}

/// Encode resources into archive bytes.
///
/// # Errors
///
/// Returns [`Error::Zip`] or [`Error::Io`] if the container cannot be written.
///
/// [`Error::Zip`]: crate::Error::Zip
/// [`Error::Io`]: crate::Error::Io
pub fn write_o2r(entries: &[ResourceEntry], options: &ArchiveWriteOptions) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_o2r_to(&mut cursor, entries, options)?;
    Ok(cursor.into_inner())
}

/// Encode resources into any seekable writer.
///
/// # Errors
///
/// Returns [`Error::Zip`] or [`Error::Io`] if the container cannot be written.
///
/// [`Error::Zip`]: crate::Error::Zip
/// [`Error::Io`]: crate::Error::Io
pub fn write_o2r_to<W: Write + Seek>(
    writer: W,
    entries: &[ResourceEntry],
    options: &ArchiveWriteOptions,
) -> Result<()> {
    let files = encode_entries(entries);
    let file_options =
        SimpleFileOptions::default().compression_method(match options.compression {
            ArchiveCompression::Stored => zip::CompressionMethod::Stored,
            ArchiveCompression::Deflated => zip::CompressionMethod::Deflated,
        });

    let mut zip = ZipWriter::new(writer);
    for (path, data) in &files {
        zip.start_file(path.as_str(), file_options)?;
        zip.write_all(data)?;
    }
    zip.finish()?;

    tracing::info!("Wrote {} resources", files.len());
    Ok(())
}

/// Encode resources into an archive file on disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created, or [`Error::Zip`] if
/// writing the container fails.
///
/// [`Error::Zip`]: crate::Error::Zip
/// [`Error::Io`]: crate::Error::Io
pub fn write_o2r_file<P: AsRef<Path>>(
    path: P,
    entries: &[ResourceEntry],
    options: &ArchiveWriteOptions,
) -> Result<()> {
    tracing::info!("Writing archive: {:?}", path.as_ref());
    let file = std::fs::File::create(path)?;
    write_o2r_to(std::io::BufWriter::new(file), entries, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::read_o2r;
    use crate::resource::{ResourceHeader, ResourceType};

    #[test]
    fn test_encode_entries_duplicate_overwrites() {
        let first = ResourceEntry::from_parts("a", ResourceHeader::new(ResourceType::Text), &[1]);
        let other = ResourceEntry::from_parts("b", ResourceHeader::new(ResourceType::Text), &[2]);
        let second = ResourceEntry::from_parts("a", ResourceHeader::new(ResourceType::Text), &[3]);

        let files = encode_entries(&[first, other, second.clone()]);
        assert_eq!(files.len(), 2);
        assert_eq!(files.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
        assert_eq!(files["a"], second.data());
    }

    #[test]
    fn test_write_then_read() {
        let entries = vec![
            ResourceEntry::from_parts(
                "objects/x/gAnim",
                ResourceHeader::new(ResourceType::Animation),
                &[0, 0, 0, 0],
            ),
            ResourceEntry::from_parts("text/msg", ResourceHeader::new(ResourceType::Text), &[]),
        ];

        for compression in [ArchiveCompression::Stored, ArchiveCompression::Deflated] {
            let options = ArchiveWriteOptions::default().with_compression(compression);
            let bytes = write_o2r(&entries, &options).unwrap();
            let decoded = read_o2r(&bytes).unwrap();
            assert_eq!(decoded, entries);
        }
    }
}

//! `.o2r` / `.otr` archive operations
//!
//! Archives are ZIP containers whose files are resources (64-byte header plus
//! payload). Decoding goes through a plain `path -> bytes` seam
//! ([`decode_entries`] / [`encode_entries`]) so callers that bring their own
//! container can skip the ZIP layer entirely.

mod disk;
mod reader;
mod relocate;
pub mod tree;
mod writer;

pub use disk::{extract_to_dir, pack_dir};
pub use reader::{decode_entries, read_o2r, read_o2r_file, read_o2r_from};
pub use relocate::{find_resource, move_resource};
pub use tree::{TreeNode, build_tree, render_tree};
pub use writer::{encode_entries, write_o2r, write_o2r_file, write_o2r_to};

/// Compression applied to each file when writing an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveCompression {
    /// No compression.
    Stored,
    /// DEFLATE compression.
    #[default]
    Deflated,
}

impl ArchiveCompression {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveCompression::Stored => "stored",
            ArchiveCompression::Deflated => "deflated",
        }
    }
}

/// Options for [`write_o2r`].
#[derive(Debug, Clone, Default)]
pub struct ArchiveWriteOptions {
    pub compression: ArchiveCompression,
}

impl ArchiveWriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_compression(mut self, compression: ArchiveCompression) -> Self {
        self.compression = compression;
        self
    }
}

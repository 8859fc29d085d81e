//! Archive resource headers, type registry and entries
//!
//! Every file inside an `.o2r`/`.otr` archive starts with a fixed 64-byte
//! header naming its type by `FourCC`. Anything after the header is the
//! type-specific payload handled by [`crate::formats`].

pub mod entry;
pub mod header;
pub mod types;

pub use entry::{ResourceEntry, create_resource};
pub use header::{
    HEADER_SIZE, ResourceHeader, SENTINEL_UNIQUE_ID, build_header, parse_header, try_parse_header,
};
pub use types::{ResourceType, resource_type_name};

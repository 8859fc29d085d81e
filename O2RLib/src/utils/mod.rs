//! Utility functions

pub mod binary;
pub mod hexdump;
pub mod path;

pub use binary::{ByteReader, fourcc_to_string, string_to_fourcc};
pub use hexdump::format_hex;
pub use path::{normalize_path, resource_name, strip_otr_prefix};

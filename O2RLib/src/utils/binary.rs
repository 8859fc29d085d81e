//! Fixed-width integer reading and `FourCC` conversion
//!
//! Every codec in this crate reads through [`ByteReader`], which turns a short
//! buffer into [`Error::Truncated`] naming the field that could not be read
//! instead of panicking on an out-of-range slice.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Bounds-checked cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the current offset.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn take(&mut self, len: usize, context: &'static str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::truncated(context, len, self.remaining()));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize, context: &'static str) -> Result<()> {
        self.take(len, context).map(|_| ())
    }

    pub fn read_u8(&mut self, context: &'static str) -> Result<u8> {
        Ok(self.take(1, context)?[0])
    }

    pub fn read_u16_le(&mut self, context: &'static str) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2, context)?))
    }

    pub fn read_i16_le(&mut self, context: &'static str) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2, context)?))
    }

    pub fn read_u16_be(&mut self, context: &'static str) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2, context)?))
    }

    pub fn read_i16_be(&mut self, context: &'static str) -> Result<i16> {
        Ok(BigEndian::read_i16(self.take(2, context)?))
    }

    pub fn read_u32_le(&mut self, context: &'static str) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4, context)?))
    }

    pub fn read_u64_le(&mut self, context: &'static str) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8, context)?))
    }

    /// Ensure a declared element count fits in the remaining bytes before
    /// allocating for it.
    pub fn check_count(
        &self,
        count: usize,
        element_size: usize,
        context: &'static str,
    ) -> Result<()> {
        let needed = count.saturating_mul(element_size);
        if needed > self.remaining() {
            return Err(Error::truncated(context, needed, self.remaining()));
        }
        Ok(())
    }
}

/// Convert a `FourCC` value to its tag string.
///
/// The most significant byte is the first character, so the value read
/// little-endian from bytes `M N A O` yields `"OANM"`.
#[must_use]
pub fn fourcc_to_string(value: u32) -> String {
    value.to_be_bytes().iter().map(|&b| char::from(b)).collect()
}

/// Convert a four-character tag string to its `FourCC` value.
pub fn string_to_fourcc(tag: &str) -> Result<u32> {
    let bytes = tag.as_bytes();
    if bytes.len() != 4 || !tag.is_ascii() {
        return Err(Error::InvalidFourCC(tag.to_string()));
    }
    Ok(BigEndian::read_u32(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_little_endian() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xFF, 0xFF];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16_le("a").unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le("b").unwrap(), 0x12345678);
        assert_eq!(reader.read_i16_le("c").unwrap(), -1);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_reader_big_endian() {
        let data = [0x80, 0x00, 0xFF, 0xFE];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16_be("a").unwrap(), 0x8000);
        assert_eq!(reader.read_i16_be("b").unwrap(), -2);
    }

    #[test]
    fn test_reader_truncated_names_field() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&data);
        let err = reader.read_u32_le("frame count").unwrap_err();
        match err {
            Error::Truncated {
                context,
                needed,
                available,
            } => {
                assert_eq!(context, "frame count");
                assert_eq!(needed, 4);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        // A failed read does not advance
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_check_count_overflow() {
        let reader = ByteReader::new(&[0u8; 4]);
        assert!(reader.check_count(usize::MAX, 6, "joints").is_err());
        assert!(reader.check_count(2, 2, "values").is_ok());
    }

    #[test]
    fn test_fourcc_conversion() {
        let value = string_to_fourcc("OANM").unwrap();
        assert_eq!(value.to_le_bytes(), *b"MNAO");
        assert_eq!(fourcc_to_string(value), "OANM");
        assert_eq!(fourcc_to_string(u32::from_le_bytes(*b"TXTO")), "OTXT");
    }

    #[test]
    fn test_fourcc_rejects_bad_length() {
        assert!(string_to_fourcc("OAN").is_err());
        assert!(string_to_fourcc("OANMX").is_err());
    }
}

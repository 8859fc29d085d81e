//! Texture resources (`Texture` / `OTEX`)
//!
//! The payload starts with a 16-byte sub-header, all little-endian:
//!
//! ```text
//! u32 texture_type
//! u32 width
//! u32 height
//! u32 data_size
//! u8[data_size] pixel data
//! ```
//!
//! Textures are decoded to RGBA8 for viewing and PNG export only; there is
//! no encode direction.

mod decode;

pub use decode::{MISSING_PALETTE_COLOR, decode_texture, palette_colors};

use crate::error::{Error, Result};
use crate::resource::{ResourceEntry, ResourceType};
use crate::utils::binary::ByteReader;
use image::{ImageBuffer, RgbaImage};
use serde::Serialize;

/// Size of the texture sub-header.
pub const TEXTURE_HEADER_SIZE: usize = 16;

/// Marker in the path of palette (TLUT) textures.
const PALETTE_PATH_MARKER: &str = "TLUT";

/// Pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextureType {
    Error,
    Rgba32,
    Rgba16,
    Palette4,
    Palette8,
    Grayscale4,
    Grayscale8,
    GrayscaleAlpha4,
    GrayscaleAlpha8,
    GrayscaleAlpha16,
}

impl TextureType {
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => TextureType::Error,
            1 => TextureType::Rgba32,
            2 => TextureType::Rgba16,
            3 => TextureType::Palette4,
            4 => TextureType::Palette8,
            5 => TextureType::Grayscale4,
            6 => TextureType::Grayscale8,
            7 => TextureType::GrayscaleAlpha4,
            8 => TextureType::GrayscaleAlpha8,
            9 => TextureType::GrayscaleAlpha16,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TextureType::Error => "Error",
            TextureType::Rgba32 => "RGBA32bpp",
            TextureType::Rgba16 => "RGBA16bpp",
            TextureType::Palette4 => "Palette4bpp",
            TextureType::Palette8 => "Palette8bpp",
            TextureType::Grayscale4 => "Grayscale4bpp",
            TextureType::Grayscale8 => "Grayscale8bpp",
            TextureType::GrayscaleAlpha4 => "GrayscaleAlpha4bpp",
            TextureType::GrayscaleAlpha8 => "GrayscaleAlpha8bpp",
            TextureType::GrayscaleAlpha16 => "GrayscaleAlpha16bpp",
        }
    }

    /// Bits per pixel in the raw payload.
    #[must_use]
    pub fn bits_per_pixel(self) -> usize {
        match self {
            TextureType::Error => 0,
            TextureType::Palette4 | TextureType::Grayscale4 | TextureType::GrayscaleAlpha4 => 4,
            TextureType::Palette8 | TextureType::Grayscale8 | TextureType::GrayscaleAlpha8 => 8,
            TextureType::Rgba16 | TextureType::GrayscaleAlpha16 => 16,
            TextureType::Rgba32 => 32,
        }
    }

    /// Bytes needed for `pixels` pixels of this format, or `None` on
    /// overflow.
    #[must_use]
    pub fn bytes_for(self, pixels: usize) -> Option<usize> {
        pixels
            .checked_mul(self.bits_per_pixel())
            .map(|bits| bits.div_ceil(8))
    }

    /// Indexed formats that need a palette texture to decode.
    #[must_use]
    pub fn needs_palette(self) -> bool {
        matches!(self, TextureType::Palette4 | TextureType::Palette8)
    }

    /// Direct-color formats that can serve as a palette.
    #[must_use]
    pub fn is_palette_source(self) -> bool {
        matches!(self, TextureType::Rgba32 | TextureType::Rgba16)
    }
}

impl std::fmt::Display for TextureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed texture payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub texture_type: TextureType,
    pub width: u32,
    pub height: u32,
    pub pixel_data: Vec<u8>,
}

impl TextureData {
    /// `width * height`, or `None` if it does not fit in `usize`.
    #[must_use]
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// One-line summary for listings.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} {}x{} ({} bytes)",
            self.texture_type,
            self.width,
            self.height,
            self.pixel_data.len()
        )
    }
}

/// Parse the sub-header and pixel data of a texture payload (resource header
/// already stripped).
///
/// A `data_size` larger than the remaining payload is clamped to what is
/// present; decoding reports the shortfall if the pixels do not fit.
///
/// # Errors
///
/// - [`Error::TextureTooShort`] if the payload cannot hold the sub-header
/// - [`Error::UnknownTextureType`] for type values above 9
pub fn parse_texture(payload: &[u8]) -> Result<TextureData> {
    if payload.len() < TEXTURE_HEADER_SIZE {
        return Err(Error::TextureTooShort(payload.len()));
    }

    let mut reader = ByteReader::new(payload);
    let raw_type = reader.read_u32_le("texture type")?;
    let width = reader.read_u32_le("texture width")?;
    let height = reader.read_u32_le("texture height")?;
    let data_size = reader.read_u32_le("texture data size")? as usize;

    let texture_type = TextureType::from_u32(raw_type).ok_or(Error::UnknownTextureType(raw_type))?;

    let available = reader.remaining();
    if data_size > available {
        tracing::debug!(
            "Texture declares {} bytes of pixel data but only {} are present",
            data_size,
            available
        );
    }
    let pixel_data = reader.take(data_size.min(available), "texture pixels")?.to_vec();

    Ok(TextureData {
        texture_type,
        width,
        height,
        pixel_data,
    })
}

/// Parse a texture from a resource entry.
///
/// # Errors
///
/// See [`parse_texture`].
pub fn parse_texture_resource(resource: &ResourceEntry) -> Result<TextureData> {
    parse_texture(resource.payload())
}

/// Textures that can be offered as a palette for the texture at
/// `texture_path`: other `Texture` resources at or below the same folder
/// whose path contains `TLUT`.
#[must_use]
pub fn palette_candidates<'a>(
    resources: &'a [ResourceEntry],
    texture_path: &str,
) -> Vec<&'a ResourceEntry> {
    let folder = match texture_path.rfind('/') {
        Some(idx) => &texture_path[..=idx],
        None => "",
    };

    resources
        .iter()
        .filter(|r| {
            r.resource_type() == ResourceType::Texture
                && r.path() != texture_path
                && r.path().starts_with(folder)
                && r.path().contains(PALETTE_PATH_MARKER)
        })
        .collect()
}

/// Encode an RGBA8 buffer as PNG.
///
/// # Errors
///
/// Returns [`Error::TextureDataTooShort`] if `rgba` does not hold
/// `width * height` pixels, [`Error::TextureTooLarge`] if that size
/// overflows, or [`Error::Image`] if encoding fails.
pub fn rgba_to_png(rgba: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let needed = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or(Error::TextureTooLarge { width, height })?;
    let available = rgba.len();
    let img: RgbaImage =
        ImageBuffer::from_raw(width, height, rgba).ok_or(Error::TextureDataTooShort {
            format: "RGBA8",
            needed,
            available,
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
    img.write_with_encoder(encoder)?;

    Ok(png_data)
}

/// Decode a texture payload straight to PNG bytes.
///
/// # Errors
///
/// Any parse or decode error, or a PNG encoding failure.
pub fn texture_to_png(texture: &TextureData, palette: Option<&TextureData>) -> Result<Vec<u8>> {
    let rgba = decode_texture(texture, palette)?;
    rgba_to_png(rgba, texture.width, texture.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceHeader;

    fn texture_payload(ty: u32, width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut payload = Vec::new();
        for value in [ty, width, height, pixels.len() as u32] {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        payload.extend_from_slice(pixels);
        payload
    }

    fn texture_resource(path: &str) -> ResourceEntry {
        ResourceEntry::from_parts(
            path,
            ResourceHeader::new(ResourceType::Texture),
            &texture_payload(1, 1, 1, &[0; 4]),
        )
    }

    #[test]
    fn test_parse_sub_header() {
        let tex = parse_texture(&texture_payload(6, 2, 1, &[10, 20])).unwrap();
        assert_eq!(tex.texture_type, TextureType::Grayscale8);
        assert_eq!((tex.width, tex.height), (2, 1));
        assert_eq!(tex.pixel_data, vec![10, 20]);
        assert_eq!(tex.description(), "Grayscale8bpp 2x1 (2 bytes)");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_texture(&[0; 15]), Err(Error::TextureTooShort(15))));
        assert!(matches!(
            parse_texture(&texture_payload(10, 1, 1, &[0])),
            Err(Error::UnknownTextureType(10))
        ));
    }

    #[test]
    fn test_declared_size_clamped() {
        let mut payload = texture_payload(6, 4, 1, &[1, 2, 3, 4]);
        payload.truncate(payload.len() - 2);
        let tex = parse_texture(&payload).unwrap();
        assert_eq!(tex.pixel_data, vec![1, 2]);
        assert!(matches!(
            decode_texture(&tex, None),
            Err(Error::TextureDataTooShort { needed: 4, available: 2, .. })
        ));
    }

    #[test]
    fn test_oversized_header_fails_on_decode() {
        let tex = parse_texture(&texture_payload(1, u32::MAX, u32::MAX, &[0; 4])).unwrap();
        assert!(matches!(
            decode_texture(&tex, None),
            Err(Error::TextureTooLarge { .. })
        ));
        assert!(texture_to_png(&tex, None).is_err());
        assert!(matches!(
            rgba_to_png(vec![0; 4], u32::MAX, u32::MAX),
            Err(Error::TextureTooLarge { .. })
        ));
    }

    #[test]
    fn test_type_flags() {
        assert!(TextureType::Palette4.needs_palette());
        assert!(TextureType::Palette8.needs_palette());
        assert!(!TextureType::Rgba16.needs_palette());
        assert!(TextureType::Rgba32.is_palette_source());
        assert!(TextureType::Rgba16.is_palette_source());
        assert!(!TextureType::Grayscale8.is_palette_source());
        assert_eq!(TextureType::Palette4.bytes_for(3), Some(2));
        assert_eq!(TextureType::Rgba16.bytes_for(3), Some(6));
        assert_eq!(TextureType::Rgba32.bytes_for(usize::MAX), None);
    }

    #[test]
    fn test_palette_candidates() {
        let resources = vec![
            texture_resource("objects/obj/gTex"),
            texture_resource("objects/obj/gTexTLUT"),
            texture_resource("objects/obj/sub/gOtherTLUT"),
            texture_resource("objects/other/gTLUT"),
            ResourceEntry::from_parts(
                "objects/obj/gTextTLUT",
                ResourceHeader::new(ResourceType::Text),
                &[],
            ),
        ];
        let paths: Vec<_> = palette_candidates(&resources, "objects/obj/gTex")
            .iter()
            .map(|r| r.path())
            .collect();
        assert_eq!(paths, vec!["objects/obj/gTexTLUT", "objects/obj/sub/gOtherTLUT"]);
    }

    #[test]
    fn test_png_export() {
        let tex = parse_texture(&texture_payload(1, 1, 1, &[1, 2, 3, 4])).unwrap();
        let png = texture_to_png(&tex, None).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.as_raw(), &vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_png_size_mismatch() {
        assert!(matches!(
            rgba_to_png(vec![0; 4], 2, 2),
            Err(Error::TextureDataTooShort { needed: 16, available: 4, .. })
        ));
    }
}

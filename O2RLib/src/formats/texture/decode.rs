//! Pixel format decoding to RGBA8

use super::{TextureData, TextureType};
use crate::error::{Error, Result};

/// Color used for palette indices beyond the palette's color count.
pub const MISSING_PALETTE_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Maximum number of colors read from a palette texture.
const MAX_PALETTE_COLORS: usize = 256;

/// Scale a 5-bit channel to 8 bits, rounding to nearest.
fn scale5(value: u16) -> u8 {
    ((u32::from(value) * 255 + 15) / 31) as u8
}

/// RGB5A1 big-endian word to RGBA8.
fn rgba16_to_rgba8(hi: u8, lo: u8) -> [u8; 4] {
    let pixel = u16::from_be_bytes([hi, lo]);
    [
        scale5((pixel >> 11) & 0x1F),
        scale5((pixel >> 6) & 0x1F),
        scale5((pixel >> 1) & 0x1F),
        (pixel & 1) as u8 * 255,
    ]
}

/// The `i`th 4-bit value of packed data, high nibble first.
fn nibble(data: &[u8], i: usize) -> u8 {
    let byte = data[i / 2];
    if i % 2 == 0 { byte >> 4 } else { byte & 0x0F }
}

/// Colors of a palette texture, at most 256.
///
/// The count comes from the palette's pixel data length, not its
/// dimensions.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPaletteFormat`] unless the palette is
/// `RGBA32bpp` or `RGBA16bpp`.
pub fn palette_colors(palette: &TextureData) -> Result<Vec<[u8; 4]>> {
    let data = &palette.pixel_data;
    let colors = match palette.texture_type {
        TextureType::Rgba32 => data
            .chunks_exact(4)
            .take(MAX_PALETTE_COLORS)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect(),
        TextureType::Rgba16 => data
            .chunks_exact(2)
            .take(MAX_PALETTE_COLORS)
            .map(|c| rgba16_to_rgba8(c[0], c[1]))
            .collect(),
        other => return Err(Error::UnsupportedPaletteFormat(other.name().to_string())),
    };
    Ok(colors)
}

/// Decode a texture to `width * height` RGBA8 pixels.
///
/// Palette formats need `palette`; indices past the end of the palette
/// render as [`MISSING_PALETTE_COLOR`].
///
/// # Errors
///
/// - [`Error::PaletteRequired`] for a palette format without a palette
/// - [`Error::UnsupportedPaletteFormat`] if the palette is not direct color
/// - [`Error::TextureDataTooShort`] if the pixel data is too small
/// - [`Error::TextureTooLarge`] if `width * height` overflows
/// - [`Error::UnknownTextureType`] for the `Error` texture type
pub fn decode_texture(texture: &TextureData, palette: Option<&TextureData>) -> Result<Vec<u8>> {
    let ty = texture.texture_type;
    if ty == TextureType::Error {
        return Err(Error::UnknownTextureType(ty.as_u32()));
    }

    let too_large = || Error::TextureTooLarge {
        width: texture.width,
        height: texture.height,
    };
    let count = texture.pixel_count().ok_or_else(too_large)?;
    let data = texture.pixel_data.as_slice();

    let colors = if ty.needs_palette() {
        let palette = palette.ok_or(Error::PaletteRequired)?;
        Some(palette_colors(palette)?)
    } else {
        None
    };

    let needed = ty.bytes_for(count).ok_or_else(too_large)?;
    if data.len() < needed {
        return Err(Error::TextureDataTooShort {
            format: ty.name(),
            needed,
            available: data.len(),
        });
    }

    let lookup = |index: u8| -> [u8; 4] {
        colors
            .as_ref()
            .and_then(|c| c.get(usize::from(index)).copied())
            .unwrap_or(MISSING_PALETTE_COLOR)
    };

    let mut rgba = Vec::with_capacity(count.checked_mul(4).ok_or_else(too_large)?);
    for i in 0..count {
        let pixel = match ty {
            TextureType::Rgba32 => {
                let p = &data[i * 4..i * 4 + 4];
                [p[0], p[1], p[2], p[3]]
            }
            TextureType::Rgba16 => rgba16_to_rgba8(data[i * 2], data[i * 2 + 1]),
            TextureType::Palette4 => lookup(nibble(data, i)),
            TextureType::Palette8 => lookup(data[i]),
            TextureType::Grayscale4 => {
                let gray = nibble(data, i) * 17;
                [gray, gray, gray, 255]
            }
            TextureType::Grayscale8 => {
                let gray = data[i];
                [gray, gray, gray, 255]
            }
            TextureType::GrayscaleAlpha4 => {
                let n = nibble(data, i);
                let gray = ((n >> 2) & 0x3) * 85;
                [gray, gray, gray, (n & 0x3) * 85]
            }
            TextureType::GrayscaleAlpha8 => {
                let gray = (data[i] >> 4) * 17;
                [gray, gray, gray, (data[i] & 0x0F) * 17]
            }
            TextureType::GrayscaleAlpha16 => {
                let gray = data[i * 2];
                [gray, gray, gray, data[i * 2 + 1]]
            }
            TextureType::Error => return Err(Error::UnknownTextureType(ty.as_u32())),
        };
        rgba.extend_from_slice(&pixel);
    }

    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(texture_type: TextureType, width: u32, height: u32, pixel_data: Vec<u8>) -> TextureData {
        TextureData {
            texture_type,
            width,
            height,
            pixel_data,
        }
    }

    #[test]
    fn test_rgba16_rounding() {
        let tex = texture(
            TextureType::Rgba16,
            2,
            2,
            vec![0xFF, 0xFF, 0x00, 0x01, 0x80, 0x00, 0x00, 0x00],
        );
        let rgba = decode_texture(&tex, None).unwrap();
        assert_eq!(
            rgba,
            vec![255, 255, 255, 255, 0, 0, 0, 255, 132, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_rgba32_identity() {
        let pixels: Vec<u8> = (0..24).collect();
        let tex = texture(TextureType::Rgba32, 3, 2, pixels.clone());
        assert_eq!(decode_texture(&tex, None).unwrap(), pixels);
    }

    #[test]
    fn test_grayscale_formats() {
        let g4 = texture(TextureType::Grayscale4, 3, 1, vec![0xF1, 0x20]);
        assert_eq!(
            decode_texture(&g4, None).unwrap(),
            vec![255, 255, 255, 255, 17, 17, 17, 255, 34, 34, 34, 255]
        );

        let g8 = texture(TextureType::Grayscale8, 1, 1, vec![0x42]);
        assert_eq!(decode_texture(&g8, None).unwrap(), vec![0x42, 0x42, 0x42, 255]);

        // 0b1101: gray 3, alpha 1
        let ga4 = texture(TextureType::GrayscaleAlpha4, 2, 1, vec![0xD0]);
        assert_eq!(
            decode_texture(&ga4, None).unwrap(),
            vec![255, 255, 255, 85, 0, 0, 0, 0]
        );

        let ga8 = texture(TextureType::GrayscaleAlpha8, 1, 1, vec![0x3F]);
        assert_eq!(decode_texture(&ga8, None).unwrap(), vec![51, 51, 51, 255]);

        let ga16 = texture(TextureType::GrayscaleAlpha16, 1, 1, vec![0x10, 0x80]);
        assert_eq!(decode_texture(&ga16, None).unwrap(), vec![0x10, 0x10, 0x10, 0x80]);
    }

    #[test]
    fn test_palette_lookup_and_missing_entries() {
        let palette = texture(TextureType::Rgba32, 2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let ci8 = texture(TextureType::Palette8, 3, 1, vec![1, 0, 2]);
        assert_eq!(
            decode_texture(&ci8, Some(&palette)).unwrap(),
            vec![5, 6, 7, 8, 1, 2, 3, 4, 255, 0, 255, 255]
        );

        let ci4 = texture(TextureType::Palette4, 2, 1, vec![0x1F]);
        assert_eq!(
            decode_texture(&ci4, Some(&palette)).unwrap(),
            vec![5, 6, 7, 8, 255, 0, 255, 255]
        );
    }

    #[test]
    fn test_rgba16_palette() {
        let palette = texture(TextureType::Rgba16, 1, 1, vec![0xF8, 0x01]);
        let ci8 = texture(TextureType::Palette8, 1, 1, vec![0]);
        assert_eq!(decode_texture(&ci8, Some(&palette)).unwrap(), vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_palette_errors() {
        let ci8 = texture(TextureType::Palette8, 1, 1, vec![0]);
        assert!(matches!(decode_texture(&ci8, None), Err(Error::PaletteRequired)));

        let gray = texture(TextureType::Grayscale8, 1, 1, vec![0]);
        assert!(matches!(
            decode_texture(&ci8, Some(&gray)),
            Err(Error::UnsupportedPaletteFormat(_))
        ));
    }

    #[test]
    fn test_palette_capped() {
        let palette = texture(TextureType::Rgba32, 300, 1, vec![7; 300 * 4]);
        assert_eq!(palette_colors(&palette).unwrap().len(), 256);
    }

    #[test]
    fn test_error_type_rejected() {
        let tex = texture(TextureType::Error, 1, 1, vec![]);
        assert!(matches!(decode_texture(&tex, None), Err(Error::UnknownTextureType(0))));
    }

    #[test]
    fn test_short_data() {
        let tex = texture(TextureType::Rgba16, 2, 1, vec![0, 0, 0]);
        assert!(matches!(
            decode_texture(&tex, None),
            Err(Error::TextureDataTooShort { needed: 4, available: 3, .. })
        ));
    }

    #[test]
    fn test_overflowing_dimensions() {
        for ty in [TextureType::Rgba32, TextureType::Grayscale4, TextureType::Palette8] {
            let tex = texture(ty, u32::MAX, u32::MAX, vec![0; 4]);
            let palette = texture(TextureType::Rgba32, 1, 1, vec![0; 4]);
            assert!(matches!(
                decode_texture(&tex, Some(&palette)),
                Err(Error::TextureTooLarge { width: u32::MAX, height: u32::MAX })
            ));
        }
    }

    #[test]
    fn test_enormous_dimensions_need_data() {
        let tex = texture(TextureType::Rgba32, 65536, 65536, vec![0; 16]);
        assert!(matches!(
            decode_texture(&tex, None),
            Err(Error::TextureDataTooShort { needed: 0x4_0000_0000, available: 16, .. })
        ));

        let tex = texture(TextureType::Grayscale8, u32::MAX, 1, vec![0; 2]);
        assert!(matches!(
            decode_texture(&tex, None),
            Err(Error::TextureDataTooShort { available: 2, .. })
        ));
    }
}

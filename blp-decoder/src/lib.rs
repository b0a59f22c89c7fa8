//! BLP texture decoding: header parsing and mipmap-level-0 decode to
//! 32-bit BGRA pixels.
//!
//! This crate only decodes what its callers need out of a CASC-stored
//! texture: the first mip level, in whichever of the formats
//! [`header::Format`] distinguishes. Mipmap generation, BLP encoding,
//! and conversion to other image formats are out of scope; see
//! `BlpConvert::get_raw_pixels` in
//! `examples/original_source/blp/BLP2PNG/native/BlpConvert.cpp` for the
//! reference this module is grounded on.

pub mod dxt;
pub mod error;
pub mod header;
pub mod palette;
pub mod reader;

pub use error::{BlpError, Result};
pub use header::{BlpHeader, Format};

use reader::Cursor;
use tracing::debug;

/// A decoded mip-0 plane: `width * height` BGRA pixels, row-major,
/// top-to-bottom.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

/// Parse a BLP texture's header and decode mip level 0, the way
/// `BlpConvert::get_raw_pixels` does for the whole file.
pub fn decode(data: &[u8]) -> Result<Image> {
    let header = BlpHeader::parse(data)?;
    let format = header.format()?;

    debug!(
        width = header.width,
        height = header.height,
        compression = header.compression,
        ?format,
        "decoding BLP mip level 0"
    );

    let pixels = match format {
        Format::Paletted => palette::decode(data, &header)?,
        Format::Uncompressed => decode_uncompressed(data, &header)?,
        Format::Dxt1 | Format::Dxt2 | Format::Dxt3 => dxt::decode(data, &header, format)?,
    };

    Ok(Image {
        width: header.width,
        height: header.height,
        pixels,
    })
}

/// `compression == 3`: mip 0 is already `width * height` BGRA u32s,
/// read back to back with no further transform.
fn decode_uncompressed(data: &[u8], header: &BlpHeader) -> Result<Vec<u32>> {
    let (offset, _size) = header.mip0()?;
    let num_pixels = header.width as usize * header.height as usize;

    let mut cursor = Cursor::new(data);
    cursor.set_position(offset as usize);

    let mut pixels = Vec::with_capacity(num_pixels);
    for _ in 0..num_pixels {
        pixels.push(cursor.read_u32_le()?);
    }
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_uncompressed_blp(width: u32, height: u32, pixels: &[u32]) -> Vec<u8> {
        let mut data = vec![0u8; BlpHeader::LEN];
        data[0..4].copy_from_slice(b"BLP2");
        data[4..8].copy_from_slice(&1u32.to_le_bytes());
        data[8] = 3; // compression = uncompressed RGB
        data[12..16].copy_from_slice(&width.to_le_bytes());
        data[16..20].copy_from_slice(&height.to_le_bytes());
        let mip0_offset = data.len() as u32;
        data[20..24].copy_from_slice(&mip0_offset.to_le_bytes());
        let mip0_size = (pixels.len() * 4) as u32;
        data[20 + 16 * 4..20 + 16 * 4 + 4].copy_from_slice(&mip0_size.to_le_bytes());
        for p in pixels {
            data.extend_from_slice(&p.to_le_bytes());
        }
        data
    }

    #[test]
    fn decodes_uncompressed_mip0_verbatim() {
        let pixels = [0x11223344u32, 0x55667788, 0x99AABBCC, 0xDDEEFF00];
        let data = build_uncompressed_blp(2, 2, &pixels);
        let image = decode(&data).unwrap();
        assert_eq!(image.width, 2);
        assert_eq!(image.height, 2);
        assert_eq!(image.pixels, pixels.to_vec());
    }

    #[test]
    fn rejects_truncated_header() {
        let err = decode(&[0x42, 0x4C, 0x50, 0x32]).unwrap_err();
        assert!(matches!(err, BlpError::Truncated { .. }));
    }
}

//! BLP1/BLP2 header parsing.
//!
//! Mirrors the field layout `BlpConvert::get_raw_pixels` reads before it
//! dispatches on `compression`/`alpha_compression`; only mipmap level 0's
//! offset and size are used by this crate, so levels 1..16 are kept only
//! to preserve the on-disk layout while scanning past them.

use crate::error::{BlpError, Result};
use crate::reader::Cursor;

const MAGIC: [u8; 4] = *b"BLP2";
const MIP_LEVELS: usize = 16;
const HEADER_LEN: usize = 4 + 4 + 1 + 1 + 1 + 1 + 4 + 4 + MIP_LEVELS * 4 + MIP_LEVELS * 4;

/// How mipmap level 0's pixels are encoded, discriminated by
/// `compression`/`alpha_compression` the way `BlpConvert::getFormat`
/// does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `compression == 1`: a 256-entry BGRA palette plus per-pixel
    /// indices and (depending on `alpha_depth`) a separate alpha plane.
    Paletted,
    /// `compression == 3`: mip 0 is already `width * height` BGRA u32s.
    Uncompressed,
    /// `compression == 2, alpha_compression == 0`: DXT1, no alpha unless
    /// using the punch-through variant (not distinguished by the
    /// original source, reproduced as-is).
    Dxt1,
    /// `compression == 2, alpha_compression == 1`: 4-bit explicit alpha
    /// plus DXT1-style color blocks (the source's own "DXT2" naming,
    /// which is not the standard DXT2/DXT3 split).
    Dxt2,
    /// `compression == 2, alpha_compression == 7`: DXT3-style
    /// interpolated alpha plus DXT1-style color blocks.
    Dxt3,
}

/// A parsed BLP header plus the fields needed to locate and decode mip 0.
#[derive(Debug, Clone, Copy)]
pub struct BlpHeader {
    pub width: u32,
    pub height: u32,
    pub compression: u8,
    pub alpha_depth: u8,
    pub alpha_compression: u8,
    pub mip_offsets: [u32; MIP_LEVELS],
    pub mip_sizes: [u32; MIP_LEVELS],
}

impl BlpHeader {
    /// The byte length of the header on disk, i.e. where the palette (if
    /// any) and mip 0 are addressed relative to.
    pub const LEN: usize = HEADER_LEN;

    /// Parse the fixed-size BLP2 header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        magic.copy_from_slice(cursor.read_bytes(4)?);
        if magic != MAGIC {
            return Err(BlpError::BadMagic(magic));
        }

        let _version = cursor.read_u32_le()?;
        let compression = cursor.read_u8()?;
        let alpha_depth = cursor.read_u8()?;
        let alpha_compression = cursor.read_u8()?;
        let _has_mips = cursor.read_u8()?;
        let width = cursor.read_u32_le()?;
        let height = cursor.read_u32_le()?;

        let mut mip_offsets = [0u32; MIP_LEVELS];
        for offset in &mut mip_offsets {
            *offset = cursor.read_u32_le()?;
        }
        let mut mip_sizes = [0u32; MIP_LEVELS];
        for size in &mut mip_sizes {
            *size = cursor.read_u32_le()?;
        }

        Ok(Self {
            width,
            height,
            compression,
            alpha_depth,
            alpha_compression,
            mip_offsets,
            mip_sizes,
        })
    }

    /// Mirrors `BlpConvert::getFormat`: resolve `compression` and (for
    /// DXT) `alpha_compression` into the decoder this crate implements.
    pub fn format(&self) -> Result<Format> {
        match self.compression {
            1 => Ok(Format::Paletted),
            3 => Ok(Format::Uncompressed),
            2 => match self.alpha_compression {
                0 => Ok(Format::Dxt1),
                1 => Ok(Format::Dxt2),
                7 => Ok(Format::Dxt3),
                other => Err(BlpError::UnsupportedAlphaCompression(other)),
            },
            other => Err(BlpError::UnsupportedCompression(other)),
        }
    }

    /// Mip level 0's `(offset, size)` on disk, the only level this crate
    /// decodes.
    pub fn mip0(&self) -> Result<(u32, u32)> {
        let offset = self.mip_offsets[0];
        let size = self.mip_sizes[0];
        if offset == 0 || size == 0 {
            return Err(BlpError::EmptyMipLevel);
        }
        Ok((offset, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_header(compression: u8, alpha_depth: u8, alpha_compression: u8, width: u32, height: u32, mip0_size: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEADER_LEN);
        data.extend_from_slice(&MAGIC);
        data.extend_from_slice(&1u32.to_le_bytes());
        data.push(compression);
        data.push(alpha_depth);
        data.push(alpha_compression);
        data.push(0); // has_mips
        data.extend_from_slice(&width.to_le_bytes());
        data.extend_from_slice(&height.to_le_bytes());
        let mut offsets = [0u32; MIP_LEVELS];
        offsets[0] = HEADER_LEN as u32;
        for o in offsets {
            data.extend_from_slice(&o.to_le_bytes());
        }
        let mut sizes = [0u32; MIP_LEVELS];
        sizes[0] = mip0_size;
        for s in sizes {
            data.extend_from_slice(&s.to_le_bytes());
        }
        data
    }

    #[test]
    fn parses_fields_and_resolves_format() {
        let data = build_header(3, 0, 0, 4, 4, 64);
        let header = BlpHeader::parse(&data).unwrap();
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 4);
        assert_eq!(header.format().unwrap(), Format::Uncompressed);
        assert_eq!(header.mip0().unwrap(), (HEADER_LEN as u32, 64));
    }

    #[test]
    fn resolves_dxt_variants_from_alpha_compression() {
        assert_eq!(build_header_format(2, 0), Format::Dxt1);
        assert_eq!(build_header_format(2, 1), Format::Dxt2);
        assert_eq!(build_header_format(2, 7), Format::Dxt3);
    }

    fn build_header_format(compression: u8, alpha_compression: u8) -> Format {
        let data = build_header(compression, 0, alpha_compression, 4, 4, 8);
        BlpHeader::parse(&data).unwrap().format().unwrap()
    }

    #[test]
    fn rejects_bad_magic() {
        let data = vec![0u8; HEADER_LEN];
        assert!(matches!(BlpHeader::parse(&data).unwrap_err(), BlpError::BadMagic(_)));
    }

    #[test]
    fn rejects_unknown_compression() {
        let data = build_header(9, 0, 0, 1, 1, 4);
        let header = BlpHeader::parse(&data).unwrap();
        assert!(matches!(header.format().unwrap_err(), BlpError::UnsupportedCompression(9)));
    }

    #[test]
    fn empty_mip0_is_rejected() {
        let data = build_header(3, 0, 0, 4, 4, 0);
        let header = BlpHeader::parse(&data).unwrap();
        assert!(matches!(header.mip0().unwrap_err(), BlpError::EmptyMipLevel));
    }
}

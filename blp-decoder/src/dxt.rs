//! DXT1/2/3 block decode for mip 0, grounded on
//! `BlpConvert::dxt1GetBlock`/`dxt2GetBlock`/`dxt3GetBlock` and
//! `readDXTColors`. Blocks are decoded left-to-right, top-to-bottom on
//! disk but assembled into the output buffer with the row order flipped,
//! matching `BlpConvert::parseCompressed`'s `h - 1 - y` indexing.

use crate::error::Result;
use crate::header::{BlpHeader, Format};
use crate::reader::Cursor;

/// Four interpolated BGRA colors for one 4x4 block.
type BlockColors = [u32; 4];

fn rgb565_to_bgr(value: u16) -> [u8; 3] {
    let r5 = u32::from(value) & 0x1F;
    let g6 = (u32::from(value) >> 5) & 0x3F;
    let b5 = (u32::from(value) >> 11) & 0x1F;

    let r = ((r5 << 3) | (r5 >> 2)) as u8;
    let g = ((g6 << 2) | (g6 >> 4)) as u8;
    let b = ((b5 << 3) | (b5 >> 2)) as u8;
    [b, g, r]
}

fn bgra(bgr: [u8; 3], a: u8) -> u32 {
    u32::from(bgr[0]) | (u32::from(bgr[1]) << 8) | (u32::from(bgr[2]) << 16) | (u32::from(a) << 24)
}

/// Read the two reference colors and interpolate the other two, the way
/// `readDXTColors` does. `use_4_colors` forces the 4-color (no
/// punch-through) ramp even when `color1 <= color2`, as DXT2/3 requires.
fn read_dxt_colors(cursor: &mut Cursor<'_>, premultiplied_alpha: bool, use_4_colors: bool) -> Result<BlockColors> {
    let raw1 = cursor.read_u16_le()?;
    let raw2 = cursor.read_u16_le()?;
    let c0 = rgb565_to_bgr(raw1);
    let c1 = rgb565_to_bgr(raw2);

    let mut colors = [bgra(c0, 0xFF), bgra(c1, 0xFF), 0, 0];

    if use_4_colors || raw1 > raw2 {
        let mixed = |weight0: u32, weight1: u32| -> u32 {
            let blend = |i: usize| -> u8 { ((u32::from(c0[i]) * weight0 + u32::from(c1[i]) * weight1) / 3) as u8 };
            bgra([blend(0), blend(1), blend(2)], 0xFF)
        };
        colors[3] = mixed(1, 2);
        colors[2] = mixed(2, 1);
    } else {
        let blend = |i: usize| -> u8 { ((u32::from(c0[i]) + u32::from(c1[i])) / 2) as u8 };
        colors[2] = bgra([blend(0), blend(1), blend(2)], 0xFF);
        colors[3] = bgra([0, 0, 0], if premultiplied_alpha { 0 } else { 0xFF });
    }

    Ok(colors)
}

fn dxt1_block(cursor: &mut Cursor<'_>, out: &mut [u32; 16]) -> Result<()> {
    let colors = read_dxt_colors(cursor, true, false)?;
    let indices = cursor.read_u32_le()?;
    for (i, pixel) in out.iter_mut().enumerate() {
        let idx = ((indices >> (2 * i)) & 3) as usize;
        *pixel = colors[idx];
    }
    Ok(())
}

fn dxt2_block(cursor: &mut Cursor<'_>, out: &mut [u32; 16]) -> Result<()> {
    let alpha_bits = cursor.read_u64_le()?;
    let mut alpha = [0u8; 16];
    for (i, a) in alpha.iter_mut().enumerate() {
        *a = (((alpha_bits >> (4 * i)) & 0x0F) * 17) as u8;
    }

    let colors = read_dxt_colors(cursor, false, true)?;
    let indices = cursor.read_u32_le()?;
    for (i, pixel) in out.iter_mut().enumerate() {
        let idx = ((indices >> (2 * i)) & 3) as usize;
        *pixel = (colors[idx] & 0x00FF_FFFF) | (u32::from(alpha[i]) << 24);
    }
    Ok(())
}

fn dxt3_block(cursor: &mut Cursor<'_>, out: &mut [u32; 16]) -> Result<()> {
    let alpha1 = u32::from(cursor.read_u8()?);
    let alpha2 = u32::from(cursor.read_u8()?);

    let mut alpha_values = [0u8; 8];
    alpha_values[0] = alpha1 as u8;
    alpha_values[1] = alpha2 as u8;
    if alpha1 > alpha2 {
        for i in 0..6u32 {
            alpha_values[(i + 2) as usize] = (((6 - i) * alpha1 + (1 + i) * alpha2) / 7) as u8;
        }
    } else {
        for i in 0..4u32 {
            alpha_values[(i + 2) as usize] = (((4 - i) * alpha1 + (1 + i) * alpha2) / 5) as u8;
        }
        alpha_values[6] = 0;
        alpha_values[7] = 255;
    }

    let mut lookup_bytes = [0u8; 8];
    lookup_bytes[..6].copy_from_slice(cursor.read_bytes(6)?);
    let lookup_value = u64::from_le_bytes(lookup_bytes);
    let mut alpha_lookup = [0u8; 16];
    for (i, entry) in alpha_lookup.iter_mut().enumerate() {
        *entry = ((lookup_value >> (i * 3)) & 7) as u8;
    }

    let colors = read_dxt_colors(cursor, false, false)?;
    let indices = cursor.read_u32_le()?;
    for (i, pixel) in out.iter_mut().enumerate() {
        let idx = ((indices >> (2 * i)) & 3) as usize;
        let alpha = alpha_values[alpha_lookup[i] as usize];
        *pixel = (colors[idx] & 0x00FF_FFFF) | (u32::from(alpha) << 24);
    }
    Ok(())
}

/// Decode a DXT mip-0 plane (`Format::Dxt1`/`Dxt2`/`Dxt3`) into
/// `width * height` BGRA pixels.
pub fn decode(data: &[u8], header: &BlpHeader, format: Format) -> Result<Vec<u32>> {
    let (offset, _size) = header.mip0()?;
    let width = header.width as usize;
    let height = header.height as usize;
    let blocks_wide = width.div_ceil(4);
    let blocks_high = height.div_ceil(4);
    let num_blocks = blocks_wide * blocks_high;

    let mut cursor = Cursor::new(data);
    cursor.set_position(offset as usize);

    let mut block_data = vec![0u32; num_blocks * 16];
    for block in block_data.chunks_exact_mut(16) {
        let fixed: &mut [u32; 16] = block.try_into().expect("chunk of 16");
        match format {
            Format::Dxt1 => dxt1_block(&mut cursor, fixed)?,
            Format::Dxt2 => dxt2_block(&mut cursor, fixed)?,
            Format::Dxt3 => dxt3_block(&mut cursor, fixed)?,
            Format::Paletted | Format::Uncompressed => unreachable!("caller filters by format"),
        }
    }

    let mut out = vec![0u32; width * height];
    for y in 0..height {
        let flipped_y = height - 1 - y;
        let by = flipped_y / 4;
        let iby = flipped_y % 4;
        for x in 0..width {
            let bx = x / 4;
            let ibx = x % 4;
            let block_index = by * blocks_wide + bx;
            let inner_index = iby * 4 + ibx;
            out[y * width + x] = block_data[block_index * 16 + inner_index];
        }
    }

    Ok(out)
}

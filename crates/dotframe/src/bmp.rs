//! Uncompressed BMP load/save.
//!
//! The container stores rows bottom-to-top, each padded to a 4-byte
//! boundary. The file depth must match the surface's format family: 24 bpp
//! for the RGB formats (RGB565 expands/packs losslessly), 1 bpp for mono
//! and ST7302 (ink stored as 0, with a 2-entry palette), 8 bpp for the
//! grayscale families (samples live in the top bits of each byte).

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{FrameError, Result};
use crate::pixel::{Family, PixelFormat};
use crate::surface::Surface;

const BMP_MAGIC: u16 = 0x4d42;
const HEADER_LEN: usize = 54;
const INFO_HEADER_LEN: u32 = 0x28;

/// Destination placement and sampling options for [`load_bmp`].
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BmpOptions {
    /// Destination offset on the surface; may be negative, clips silently.
    pub x: i32,
    pub y: i32,
    /// Optional limits on the destination rectangle.
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// Invert samples while loading (mono and grayscale surfaces only).
    pub invert: bool,
}

struct Header {
    data_offset: u32,
    width: u32,
    height: u32,
    bpp: u16,
}

fn expected_bpp(family: Family) -> u16 {
    match family {
        Family::Rgb => 24,
        Family::Mono | Family::St7302 => 1,
        Family::Gs2 | Family::Gs4 | Family::Gs8 => 8,
    }
}

/// Row length in bytes: samples packed at `bpp`, padded to 32 bits.
fn row_bytes(width: u32, bpp: u16) -> usize {
    (width as usize * bpp as usize + 31) / 32 * 4
}

fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut h = [0u8; HEADER_LEN];
    reader.read_exact(&mut h)?;
    let word16 = |i: usize| u16::from_le_bytes([h[i], h[i + 1]]);
    let word32 = |i: usize| u32::from_le_bytes([h[i], h[i + 1], h[i + 2], h[i + 3]]);
    if word16(0) != BMP_MAGIC {
        return Err(FrameError::BadMagic);
    }
    Ok(Header {
        data_offset: word32(10),
        width: word32(18),
        height: word32(22),
        bpp: word16(28),
    })
}

/// Stream a BMP file onto the surface through `set_pixel`.
///
/// Rows are consumed in file order (bottom-to-top) in full, including the
/// padding of clipped-away pixels, so the stream never desynchronizes.
/// Fails before touching the surface on magic or depth mismatch.
pub fn load_bmp<R: Read + Seek>(
    surface: &mut Surface<'_>,
    reader: &mut R,
    opts: &BmpOptions,
) -> Result<()> {
    let format = surface.format();
    let expected = expected_bpp(format.family());
    let header = read_header(reader)?;
    if header.bpp != expected {
        return Err(FrameError::DepthMismatch {
            file_bpp: header.bpp,
            surface_bpp: expected,
        });
    }

    let sw = surface.width() as i32;
    let sh = surface.height() as i32;
    let bw = header.width as i32;
    let bh = header.height as i32;
    let mut x0 = opts.x;
    let mut y0 = opts.y;
    if x0 < 0 && -x0 > bw {
        x0 = -bw;
    }
    if y0 < 0 && -y0 > bh {
        y0 = -bh;
    }
    x0 = x0.min(sw);
    y0 = y0.min(sh);
    let mut w = sw - x0;
    let mut h = sh - y0;
    if let Some(max_w) = opts.width {
        w = w.min(max_w);
    }
    if let Some(max_h) = opts.height {
        h = h.min(max_h);
    }
    w = w.min(bw);
    h = h.min(bh);

    reader.seek(SeekFrom::Start(header.data_offset as u64))?;
    let mut row = vec![0u8; row_bytes(header.width, header.bpp)];
    for hh in (0..bh).rev() {
        reader.read_exact(&mut row)?;
        if hh >= h {
            continue;
        }
        for ww in 0..w {
            let col = sample(format, &row, ww as usize, opts.invert);
            surface.set_pixel(x0 + ww, y0 + hh, col);
        }
    }
    Ok(())
}

/// Decode one file sample into a surface color.
fn sample(format: PixelFormat, row: &[u8], x: usize, invert: bool) -> u32 {
    match format.family() {
        Family::Rgb => {
            let b = row[x * 3] as u32;
            let g = row[x * 3 + 1] as u32;
            let r = row[x * 3 + 2] as u32;
            match format {
                PixelFormat::Rgb565 | PixelFormat::Rgb565Sw => {
                    (b >> 3) | ((g & 0xfc) << 3) | ((r & 0xf8) << 8)
                }
                _ => b | (g << 8) | (r << 16),
            }
        }
        Family::Mono | Family::St7302 => {
            // Ink is stored as 0 in the file (palette entry 0 is black).
            let bit = row[x / 8] & (0x80 >> (x % 8)) != 0;
            (bit == invert) as u32
        }
        Family::Gs2 => {
            let byte = if invert { !row[x] } else { row[x] };
            ((byte >> 6) & 0x03) as u32
        }
        Family::Gs4 => {
            let byte = if invert { !row[x] } else { row[x] };
            ((byte >> 4) & 0x0f) as u32
        }
        Family::Gs8 => {
            let byte = if invert { !row[x] } else { row[x] };
            byte as u32
        }
    }
}

/// Save the surface rectangle at (x, y) of `width`×`height` (defaulting to
/// the rest of the surface) as a BMP file. The inverse of [`load_bmp`]: a
/// save/load round trip through the same format reproduces the pixels
/// exactly.
pub fn save_bmp<W: Write>(
    surface: &Surface<'_>,
    writer: &mut W,
    x: i32,
    y: i32,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<()> {
    let format = surface.format();
    let bpp = expected_bpp(format.family());
    let mut w = surface.width() as i32 - x;
    let mut h = surface.height() as i32 - y;
    if let Some(max_w) = width {
        w = w.min(max_w);
    }
    if let Some(max_h) = height {
        h = h.min(max_h);
    }
    if w < 1 || h < 1 {
        return Err(FrameError::Unsupported("empty BMP save rectangle"));
    }

    let row_len = row_bytes(w as u32, bpp);
    let (data_offset, palette_len): (u32, u32) = match bpp {
        24 => (HEADER_LEN as u32, 0),
        1 => (HEADER_LEN as u32 + 2 * 4, 2),
        _ => (HEADER_LEN as u32 + 256 * 4, 256),
    };
    let image_size = row_len as u32 * h as u32;

    let mut header = [0u8; HEADER_LEN];
    header[0..2].copy_from_slice(&BMP_MAGIC.to_le_bytes());
    header[2..6].copy_from_slice(&(data_offset + image_size).to_le_bytes());
    header[10..14].copy_from_slice(&data_offset.to_le_bytes());
    header[14..18].copy_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    header[18..22].copy_from_slice(&(w as u32).to_le_bytes());
    header[22..26].copy_from_slice(&(h as u32).to_le_bytes());
    header[26..28].copy_from_slice(&1u16.to_le_bytes());
    header[28..30].copy_from_slice(&bpp.to_le_bytes());
    header[34..38].copy_from_slice(&image_size.to_le_bytes());
    header[46..50].copy_from_slice(&palette_len.to_le_bytes());
    header[50..54].copy_from_slice(&palette_len.to_le_bytes());
    writer.write_all(&header)?;

    match palette_len {
        2 => {
            writer.write_all(&[0x00, 0x00, 0x00, 0x00])?;
            writer.write_all(&[0xff, 0xff, 0xff, 0x00])?;
        }
        256 => {
            for i in 0..=255u8 {
                writer.write_all(&[i, i, i, 0x00])?;
            }
        }
        _ => {}
    }

    let mut row = vec![0u8; row_len];
    for hh in (0..h).rev() {
        row.fill(0);
        for ww in 0..w {
            let col = surface.get_pixel(x + ww, y + hh);
            pack(format, &mut row, ww as usize, col);
        }
        writer.write_all(&row)?;
    }
    Ok(())
}

/// Encode one surface color into the row buffer.
fn pack(format: PixelFormat, row: &mut [u8], x: usize, col: u32) {
    match format.family() {
        Family::Rgb => {
            let (r, g, b) = match format {
                PixelFormat::Rgb565 | PixelFormat::Rgb565Sw => {
                    ((col & 0xf800) >> 8, (col & 0x07e0) >> 3, (col & 0x001f) << 3)
                }
                _ => ((col >> 16) & 0xff, (col >> 8) & 0xff, col & 0xff),
            };
            row[x * 3] = b as u8;
            row[x * 3 + 1] = g as u8;
            row[x * 3 + 2] = r as u8;
        }
        Family::Mono | Family::St7302 => {
            if col == 0 {
                row[x / 8] |= 0x80 >> (x % 8);
            }
        }
        Family::Gs2 => row[x] = (col << 6) as u8,
        Family::Gs4 => row[x] = (col << 4) as u8,
        Family::Gs8 => row[x] = col as u8,
    }
}

//! Test support utilities for dotframe.
//!
//! Backing-buffer allocation and synthetic glyph-index font files, useful
//! for testing surfaces and CJK resolution without fixture files on disk.
//! Not part of the stable API.

use crate::cjk;
use crate::{FontKind, Mirror, PixelFormat, SizeClass, Surface};

/// Allocate a zeroed backing buffer for the given geometry with the
/// format's default stride.
pub fn buffer_for(format: PixelFormat, width: u16, height: u16) -> Vec<u8> {
    vec![0u8; Surface::min_buffer_len(width, height, format, Mirror::default())]
}

/// Bytes per CJK glyph record for a size class (0 for the tiny size, which
/// has no CJK glyphs).
pub fn record_len(size: SizeClass) -> usize {
    cjk::metrics(size).map_or(0, |(len, _, _)| len)
}

/// Every coordinate whose pixel reads non-zero, row-major.
pub fn lit_pixels(surface: &Surface<'_>) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            if surface.get_pixel(x, y) != 0 {
                out.push((x, y));
            }
        }
    }
    out
}

fn write_meta(file: &mut Vec<u8>, kind_tag: u32, size: SizeClass, base: u32) {
    if file.len() < 52 {
        file.resize(52, 0);
    }
    file[32..36].copy_from_slice(&kind_tag.to_le_bytes());
    let slot = match size {
        SizeClass::Tiny => return,
        SizeClass::Px12 => 0,
        SizeClass::Px16 => 1,
        SizeClass::Px24 => 2,
        SizeClass::Px32 => 3,
    };
    let at = 36 + slot * 4;
    file[at..at + 4].copy_from_slice(&base.to_le_bytes());
}

/// Build a direct-mapped font file: the metadata record, the legacy code
/// table at 0x100, and one glyph array for `size`. Each entry is
/// (code point, legacy double-byte code, glyph record bytes).
pub fn build_direct_font(
    kind: FontKind,
    size: SizeClass,
    entries: &[(u32, [u8; 2], Vec<u8>)],
) -> Vec<u8> {
    assert_ne!(kind, FontKind::Compact, "use build_compact_font");
    let (record_len, _, _) = cjk::metrics(size).expect("size class with CJK glyphs");
    let kind_tag = match kind {
        FontKind::Gb2312 => 1,
        FontKind::Gbk => 2,
        FontKind::Compact => unreachable!(),
    };
    let mut code_end = 0x100u32;
    let mut max_index = 0u32;
    for (cp, code, _) in entries {
        let ci = cjk::code_index(*cp).expect("code point in a mapped range");
        code_end = code_end.max(0x100 + ci * 2 + 2);
        let gi = cjk::glyph_index(kind, *code).expect("valid legacy code");
        max_index = max_index.max(gi);
    }
    let base = (code_end + 3) & !3;
    let mut file = vec![0u8; base as usize + (max_index as usize + 1) * record_len];
    write_meta(&mut file, kind_tag, size, base);
    for (cp, code, glyph) in entries {
        let ci = cjk::code_index(*cp).unwrap() as usize;
        file[0x100 + ci * 2..0x100 + ci * 2 + 2].copy_from_slice(code);
        let gi = cjk::glyph_index(kind, *code).unwrap() as usize;
        let at = base as usize + gi * record_len;
        file[at..at + glyph.len()].copy_from_slice(glyph);
    }
    file
}

/// Build a compact-indexed font file: the metadata record and, at the
/// size's base offset, a glyph count followed by (code point, file offset)
/// pairs pointing at the glyph blobs appended behind the table.
pub fn build_compact_font(size: SizeClass, entries: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let base = 0x100u32;
    let mut file = vec![0u8; base as usize];
    write_meta(&mut file, 3, size, base);
    file.extend((entries.len() as u32).to_le_bytes());
    let mut offset = base as usize + 4 + entries.len() * 8;
    let mut blob = Vec::new();
    for (cp, glyph) in entries {
        file.extend(cp.to_le_bytes());
        file.extend((offset as u32).to_le_bytes());
        blob.extend_from_slice(glyph);
        offset += glyph.len();
    }
    file.extend(blob);
    file
}

//! Compiled-in ASCII glyph tables (code points 32..=126).
//!
//! Two base bitmaps are embedded: the classic 5x7 terminal font in column
//! format and the classic MSB-left 8x8 PC font. Every other size derives
//! from those on first use — 6x12 pads rows, 8x16 doubles them, 12x24 and
//! 16x32 pixel-double the 12/16-px tables — and the proportional advance
//! tables are measured from the inked extents.

use once_cell::sync::Lazy;

use crate::font::{FontFamily, FontStyle, Glyph, SizeClass};

pub(crate) const GLYPH_COUNT: usize = 95;

/// Classic 5x7 terminal font, column-major, LSB = top row. Transposed
/// into the row-major 6x8 table on first use.
const FONT_5X7_COLUMNS: [u8; GLYPH_COUNT * 5] = [
    0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x00, 0x00, 0x5f, 0x00, 0x00, // !
    0x00, 0x07, 0x00, 0x07, 0x00, // "
    0x14, 0x7f, 0x14, 0x7f, 0x14, // #
    0x24, 0x2a, 0x7f, 0x2a, 0x12, // $
    0x23, 0x13, 0x08, 0x64, 0x62, // %
    0x36, 0x49, 0x55, 0x22, 0x50, // &
    0x00, 0x05, 0x03, 0x00, 0x00, // '
    0x00, 0x1c, 0x22, 0x41, 0x00, // (
    0x00, 0x41, 0x22, 0x1c, 0x00, // )
    0x14, 0x08, 0x3e, 0x08, 0x14, // *
    0x08, 0x08, 0x3e, 0x08, 0x08, // +
    0x00, 0x50, 0x30, 0x00, 0x00, // ,
    0x08, 0x08, 0x08, 0x08, 0x08, // -
    0x00, 0x60, 0x60, 0x00, 0x00, // .
    0x20, 0x10, 0x08, 0x04, 0x02, // /
    0x3e, 0x51, 0x49, 0x45, 0x3e, // 0
    0x00, 0x42, 0x7f, 0x40, 0x00, // 1
    0x42, 0x61, 0x51, 0x49, 0x46, // 2
    0x21, 0x41, 0x45, 0x4b, 0x31, // 3
    0x18, 0x14, 0x12, 0x7f, 0x10, // 4
    0x27, 0x45, 0x45, 0x45, 0x39, // 5
    0x3c, 0x4a, 0x49, 0x49, 0x30, // 6
    0x01, 0x71, 0x09, 0x05, 0x03, // 7
    0x36, 0x49, 0x49, 0x49, 0x36, // 8
    0x06, 0x49, 0x49, 0x29, 0x1e, // 9
    0x00, 0x36, 0x36, 0x00, 0x00, // :
    0x00, 0x56, 0x36, 0x00, 0x00, // ;
    0x08, 0x14, 0x22, 0x41, 0x00, // <
    0x14, 0x14, 0x14, 0x14, 0x14, // =
    0x00, 0x41, 0x22, 0x14, 0x08, // >
    0x02, 0x01, 0x51, 0x09, 0x06, // ?
    0x32, 0x49, 0x79, 0x41, 0x3e, // @
    0x7e, 0x11, 0x11, 0x11, 0x7e, // A
    0x7f, 0x49, 0x49, 0x49, 0x36, // B
    0x3e, 0x41, 0x41, 0x41, 0x22, // C
    0x7f, 0x41, 0x41, 0x22, 0x1c, // D
    0x7f, 0x49, 0x49, 0x49, 0x41, // E
    0x7f, 0x09, 0x09, 0x09, 0x01, // F
    0x3e, 0x41, 0x49, 0x49, 0x7a, // G
    0x7f, 0x08, 0x08, 0x08, 0x7f, // H
    0x00, 0x41, 0x7f, 0x41, 0x00, // I
    0x20, 0x40, 0x41, 0x3f, 0x01, // J
    0x7f, 0x08, 0x14, 0x22, 0x41, // K
    0x7f, 0x40, 0x40, 0x40, 0x40, // L
    0x7f, 0x02, 0x0c, 0x02, 0x7f, // M
    0x7f, 0x04, 0x08, 0x10, 0x7f, // N
    0x3e, 0x41, 0x41, 0x41, 0x3e, // O
    0x7f, 0x09, 0x09, 0x09, 0x06, // P
    0x3e, 0x41, 0x51, 0x21, 0x5e, // Q
    0x7f, 0x09, 0x19, 0x29, 0x46, // R
    0x46, 0x49, 0x49, 0x49, 0x31, // S
    0x01, 0x01, 0x7f, 0x01, 0x01, // T
    0x3f, 0x40, 0x40, 0x40, 0x3f, // U
    0x1f, 0x20, 0x40, 0x20, 0x1f, // V
    0x3f, 0x40, 0x38, 0x40, 0x3f, // W
    0x63, 0x14, 0x08, 0x14, 0x63, // X
    0x07, 0x08, 0x70, 0x08, 0x07, // Y
    0x61, 0x51, 0x49, 0x45, 0x43, // Z
    0x00, 0x7f, 0x41, 0x41, 0x00, // [
    0x02, 0x04, 0x08, 0x10, 0x20, // backslash
    0x00, 0x41, 0x41, 0x7f, 0x00, // ]
    0x04, 0x02, 0x01, 0x02, 0x04, // ^
    0x40, 0x40, 0x40, 0x40, 0x40, // _
    0x00, 0x01, 0x02, 0x04, 0x00, // `
    0x20, 0x54, 0x54, 0x54, 0x78, // a
    0x7f, 0x48, 0x44, 0x44, 0x38, // b
    0x38, 0x44, 0x44, 0x44, 0x20, // c
    0x38, 0x44, 0x44, 0x48, 0x7f, // d
    0x38, 0x54, 0x54, 0x54, 0x18, // e
    0x08, 0x7e, 0x09, 0x01, 0x02, // f
    0x0c, 0x52, 0x52, 0x52, 0x3e, // g
    0x7f, 0x08, 0x04, 0x04, 0x78, // h
    0x00, 0x44, 0x7d, 0x40, 0x00, // i
    0x20, 0x40, 0x44, 0x3d, 0x00, // j
    0x7f, 0x10, 0x28, 0x44, 0x00, // k
    0x00, 0x41, 0x7f, 0x40, 0x00, // l
    0x7c, 0x04, 0x18, 0x04, 0x78, // m
    0x7c, 0x08, 0x04, 0x04, 0x78, // n
    0x38, 0x44, 0x44, 0x44, 0x38, // o
    0x7c, 0x14, 0x14, 0x14, 0x08, // p
    0x08, 0x14, 0x14, 0x18, 0x7c, // q
    0x7c, 0x08, 0x04, 0x04, 0x08, // r
    0x48, 0x54, 0x54, 0x54, 0x20, // s
    0x04, 0x3f, 0x44, 0x40, 0x20, // t
    0x3c, 0x40, 0x40, 0x20, 0x7c, // u
    0x1c, 0x20, 0x40, 0x20, 0x1c, // v
    0x3c, 0x40, 0x30, 0x40, 0x3c, // w
    0x44, 0x28, 0x10, 0x28, 0x44, // x
    0x0c, 0x50, 0x50, 0x50, 0x3c, // y
    0x44, 0x64, 0x54, 0x4c, 0x44, // z
    0x00, 0x08, 0x36, 0x41, 0x00, // {
    0x00, 0x00, 0x7f, 0x00, 0x00, // |
    0x00, 0x41, 0x36, 0x08, 0x00, // }
    0x08, 0x04, 0x08, 0x10, 0x08, // ~
];

/// Classic MSB-left 8x8 PC font, one byte per row.
const FONT_8X8: [u8; GLYPH_COUNT * 8] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x00, // !
    0x6c, 0x6c, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, // "
    0x6c, 0x6c, 0xfe, 0x6c, 0xfe, 0x6c, 0x6c, 0x00, // #
    0x18, 0x7e, 0xc0, 0x7c, 0x06, 0xfc, 0x18, 0x00, // $
    0x00, 0xc6, 0xcc, 0x18, 0x30, 0x66, 0xc6, 0x00, // %
    0x38, 0x6c, 0x38, 0x76, 0xdc, 0xcc, 0x76, 0x00, // &
    0x18, 0x18, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, // '
    0x0c, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0c, 0x00, // (
    0x30, 0x18, 0x0c, 0x0c, 0x0c, 0x18, 0x30, 0x00, // )
    0x00, 0x66, 0x3c, 0xff, 0x3c, 0x66, 0x00, 0x00, // *
    0x00, 0x18, 0x18, 0x7e, 0x18, 0x18, 0x00, 0x00, // +
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30, // ,
    0x00, 0x00, 0x00, 0x7e, 0x00, 0x00, 0x00, 0x00, // -
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00, // .
    0x06, 0x0c, 0x18, 0x30, 0x60, 0xc0, 0x80, 0x00, // /
    0x7c, 0xce, 0xde, 0xf6, 0xe6, 0xc6, 0x7c, 0x00, // 0
    0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7e, 0x00, // 1
    0x7c, 0xc6, 0x06, 0x7c, 0xc0, 0xc0, 0xfe, 0x00, // 2
    0xfc, 0x06, 0x06, 0x3c, 0x06, 0x06, 0xfc, 0x00, // 3
    0x0c, 0xcc, 0xcc, 0xcc, 0xfe, 0x0c, 0x0c, 0x00, // 4
    0xfe, 0xc0, 0xfc, 0x06, 0x06, 0xc6, 0x7c, 0x00, // 5
    0x7c, 0xc0, 0xc0, 0xfc, 0xc6, 0xc6, 0x7c, 0x00, // 6
    0xfe, 0x06, 0x06, 0x0c, 0x18, 0x18, 0x18, 0x00, // 7
    0x7c, 0xc6, 0xc6, 0x7c, 0xc6, 0xc6, 0x7c, 0x00, // 8
    0x7c, 0xc6, 0xc6, 0x7e, 0x06, 0x06, 0x7c, 0x00, // 9
    0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00, // :
    0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x30, // ;
    0x0c, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0c, 0x00, // <
    0x00, 0x00, 0x7e, 0x00, 0x7e, 0x00, 0x00, 0x00, // =
    0x30, 0x18, 0x0c, 0x06, 0x0c, 0x18, 0x30, 0x00, // >
    0x3c, 0x66, 0x0c, 0x18, 0x18, 0x00, 0x18, 0x00, // ?
    0x7c, 0xc6, 0xde, 0xde, 0xde, 0xc0, 0x7e, 0x00, // @
    0x38, 0x6c, 0xc6, 0xc6, 0xfe, 0xc6, 0xc6, 0x00, // A
    0xfc, 0xc6, 0xc6, 0xfc, 0xc6, 0xc6, 0xfc, 0x00, // B
    0x7c, 0xc6, 0xc0, 0xc0, 0xc0, 0xc6, 0x7c, 0x00, // C
    0xf8, 0xcc, 0xc6, 0xc6, 0xc6, 0xcc, 0xf8, 0x00, // D
    0xfe, 0xc0, 0xc0, 0xf8, 0xc0, 0xc0, 0xfe, 0x00, // E
    0xfe, 0xc0, 0xc0, 0xf8, 0xc0, 0xc0, 0xc0, 0x00, // F
    0x7c, 0xc6, 0xc0, 0xce, 0xc6, 0xc6, 0x7c, 0x00, // G
    0xc6, 0xc6, 0xc6, 0xfe, 0xc6, 0xc6, 0xc6, 0x00, // H
    0x7e, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7e, 0x00, // I
    0x06, 0x06, 0x06, 0x06, 0xc6, 0xc6, 0x7c, 0x00, // J
    0xc6, 0xcc, 0xd8, 0xf0, 0xd8, 0xcc, 0xc6, 0x00, // K
    0xc0, 0xc0, 0xc0, 0xc0, 0xc0, 0xc0, 0xfe, 0x00, // L
    0xc6, 0xee, 0xfe, 0xd6, 0xc6, 0xc6, 0xc6, 0x00, // M
    0xc6, 0xe6, 0xf6, 0xde, 0xce, 0xc6, 0xc6, 0x00, // N
    0x7c, 0xc6, 0xc6, 0xc6, 0xc6, 0xc6, 0x7c, 0x00, // O
    0xfc, 0xc6, 0xc6, 0xfc, 0xc0, 0xc0, 0xc0, 0x00, // P
    0x7c, 0xc6, 0xc6, 0xc6, 0xd6, 0xde, 0x7c, 0x06, // Q
    0xfc, 0xc6, 0xc6, 0xfc, 0xd8, 0xcc, 0xc6, 0x00, // R
    0x7c, 0xc6, 0xc0, 0x7c, 0x06, 0xc6, 0x7c, 0x00, // S
    0x7e, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, // T
    0xc6, 0xc6, 0xc6, 0xc6, 0xc6, 0xc6, 0x7c, 0x00, // U
    0xc6, 0xc6, 0xc6, 0xc6, 0x6c, 0x38, 0x10, 0x00, // V
    0xc6, 0xc6, 0xc6, 0xd6, 0xfe, 0xee, 0xc6, 0x00, // W
    0xc6, 0xc6, 0x6c, 0x38, 0x6c, 0xc6, 0xc6, 0x00, // X
    0x66, 0x66, 0x66, 0x3c, 0x18, 0x18, 0x18, 0x00, // Y
    0xfe, 0x06, 0x0c, 0x18, 0x30, 0x60, 0xfe, 0x00, // Z
    0x3c, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3c, 0x00, // [
    0xc0, 0x60, 0x30, 0x18, 0x0c, 0x06, 0x02, 0x00, // backslash
    0x3c, 0x0c, 0x0c, 0x0c, 0x0c, 0x0c, 0x3c, 0x00, // ]
    0x10, 0x38, 0x6c, 0xc6, 0x00, 0x00, 0x00, 0x00, // ^
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfe, // _
    0x18, 0x18, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, // `
    0x00, 0x00, 0x7c, 0x06, 0x7e, 0xc6, 0x7e, 0x00, // a
    0xc0, 0xc0, 0xfc, 0xc6, 0xc6, 0xc6, 0xfc, 0x00, // b
    0x00, 0x00, 0x7c, 0xc6, 0xc0, 0xc6, 0x7c, 0x00, // c
    0x06, 0x06, 0x7e, 0xc6, 0xc6, 0xc6, 0x7e, 0x00, // d
    0x00, 0x00, 0x7c, 0xc6, 0xfe, 0xc0, 0x7c, 0x00, // e
    0x1c, 0x30, 0x30, 0x7c, 0x30, 0x30, 0x30, 0x00, // f
    0x00, 0x00, 0x7e, 0xc6, 0xc6, 0x7e, 0x06, 0x7c, // g
    0xc0, 0xc0, 0xfc, 0xc6, 0xc6, 0xc6, 0xc6, 0x00, // h
    0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x3c, 0x00, // i
    0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x18, 0x70, // j
    0xc0, 0xc0, 0xc6, 0xcc, 0xf8, 0xcc, 0xc6, 0x00, // k
    0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3c, 0x00, // l
    0x00, 0x00, 0xec, 0xfe, 0xd6, 0xc6, 0xc6, 0x00, // m
    0x00, 0x00, 0xfc, 0xc6, 0xc6, 0xc6, 0xc6, 0x00, // n
    0x00, 0x00, 0x7c, 0xc6, 0xc6, 0xc6, 0x7c, 0x00, // o
    0x00, 0x00, 0xfc, 0xc6, 0xc6, 0xfc, 0xc0, 0xc0, // p
    0x00, 0x00, 0x7e, 0xc6, 0xc6, 0x7e, 0x06, 0x06, // q
    0x00, 0x00, 0xdc, 0xe6, 0xc0, 0xc0, 0xc0, 0x00, // r
    0x00, 0x00, 0x7e, 0xc0, 0x7c, 0x06, 0xfc, 0x00, // s
    0x30, 0x30, 0x7c, 0x30, 0x30, 0x30, 0x1c, 0x00, // t
    0x00, 0x00, 0xc6, 0xc6, 0xc6, 0xc6, 0x7e, 0x00, // u
    0x00, 0x00, 0xc6, 0xc6, 0xc6, 0x6c, 0x38, 0x00, // v
    0x00, 0x00, 0xc6, 0xc6, 0xd6, 0xfe, 0x6c, 0x00, // w
    0x00, 0x00, 0xc6, 0x6c, 0x38, 0x6c, 0xc6, 0x00, // x
    0x00, 0x00, 0xc6, 0xc6, 0xc6, 0x7e, 0x06, 0x7c, // y
    0x00, 0x00, 0xfe, 0x0c, 0x38, 0x60, 0xfe, 0x00, // z
    0x0e, 0x18, 0x18, 0x70, 0x18, 0x18, 0x0e, 0x00, // {
    0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, // |
    0x70, 0x18, 0x18, 0x0e, 0x18, 0x18, 0x70, 0x00, // }
    0x72, 0x9c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // ~
];

/// 6x8 row-major table transposed from the 5x7 column data. Columns 0..=4
/// carry ink (bits 7..3), column 5 is the spacing column, row 7 is blank.
static FONT_6X8: Lazy<Vec<u8>> = Lazy::new(|| {
    let mut out = vec![0u8; GLYPH_COUNT * 8];
    for g in 0..GLYPH_COUNT {
        for c in 0..5 {
            let col = FONT_5X7_COLUMNS[g * 5 + c];
            for r in 0..7 {
                if col & (1 << r) != 0 {
                    out[g * 8 + r] |= 0x80 >> c;
                }
            }
        }
    }
    out
});

/// 6x12: the 6x8 rows centered with two blank rows above and below.
static FONT_6X12: Lazy<Vec<u8>> = Lazy::new(|| {
    let mut out = vec![0u8; GLYPH_COUNT * 12];
    for g in 0..GLYPH_COUNT {
        out[g * 12 + 2..g * 12 + 10].copy_from_slice(&FONT_6X8[g * 8..g * 8 + 8]);
    }
    out
});

/// 8x16: the 8x8 rows doubled.
static FONT_8X16: Lazy<Vec<u8>> = Lazy::new(|| {
    let mut out = Vec::with_capacity(GLYPH_COUNT * 16);
    for &row in FONT_8X8.iter() {
        out.push(row);
        out.push(row);
    }
    out
});

/// Pixel-double a one-byte-per-row table into a two-byte-per-row table.
fn scale2x(base: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(base.len() * 4);
    for &row in base {
        let mut wide: u16 = 0;
        for bit in 0..8 {
            if row & (0x80 >> bit) != 0 {
                wide |= 0b11u16 << (14 - 2 * bit);
            }
        }
        let bytes = wide.to_be_bytes();
        out.extend_from_slice(&bytes);
        out.extend_from_slice(&bytes);
    }
    out
}

static FONT_12X24: Lazy<Vec<u8>> = Lazy::new(|| scale2x(FONT_6X12.as_slice()));
static FONT_16X32: Lazy<Vec<u8>> = Lazy::new(|| scale2x(FONT_8X16.as_slice()));

/// Proportional advances: rightmost inked column plus a one-pixel gap,
/// half a cell for blank glyphs (space).
fn measure(table: &[u8], rows: usize, stride: usize, cell_w: usize) -> [u8; GLYPH_COUNT] {
    let mut widths = [0u8; GLYPH_COUNT];
    for (g, width) in widths.iter_mut().enumerate() {
        let mut max_col: Option<usize> = None;
        for r in 0..rows {
            for c in 0..cell_w {
                let byte = table[(g * rows + r) * stride + c / 8];
                if byte & (0x80 >> (c % 8)) != 0 && max_col.map_or(true, |m| c > m) {
                    max_col = Some(c);
                }
            }
        }
        *width = match max_col {
            Some(m) => (m + 2).min(cell_w) as u8,
            None => (cell_w / 2) as u8,
        };
    }
    widths
}

static WIDTHS_12: Lazy<[u8; GLYPH_COUNT]> = Lazy::new(|| measure(FONT_6X12.as_slice(), 12, 1, 6));
static WIDTHS_16: Lazy<[u8; GLYPH_COUNT]> = Lazy::new(|| measure(FONT_8X16.as_slice(), 16, 1, 8));
static WIDTHS_24: Lazy<[u8; GLYPH_COUNT]> = Lazy::new(|| measure(FONT_12X24.as_slice(), 24, 2, 12));
static WIDTHS_32: Lazy<[u8; GLYPH_COUNT]> = Lazy::new(|| measure(FONT_16X32.as_slice(), 32, 2, 16));

/// Fetch the glyph for printable ASCII `ch` (32..=126) in the given style.
/// The tiny size has a single family; condensed tightens the advance by one
/// column and the proportional families use the measured advance tables.
pub(crate) fn glyph(style: FontStyle, ch: u8) -> Glyph {
    debug_assert!((32..=126).contains(&ch));
    let idx = (ch - 32) as usize;
    let (table, cell_w, height, stride): (&[u8], u8, u8, u8) = match style.size {
        SizeClass::Tiny => (FONT_6X8.as_slice(), 6, 8, 1),
        SizeClass::Px12 => (FONT_6X12.as_slice(), 6, 12, 1),
        SizeClass::Px16 => (FONT_8X16.as_slice(), 8, 16, 1),
        SizeClass::Px24 => (FONT_12X24.as_slice(), 12, 24, 2),
        SizeClass::Px32 => (FONT_16X32.as_slice(), 16, 32, 2),
    };
    let glyph_len = height as usize * stride as usize;
    let data = table[idx * glyph_len..(idx + 1) * glyph_len].to_vec();
    let width = if style.size == SizeClass::Tiny {
        cell_w
    } else {
        match style.family {
            FontFamily::Simple => cell_w,
            FontFamily::Condensed => cell_w - 1,
            FontFamily::Proportional | FontFamily::ProportionalAlt => {
                let widths: &[u8; GLYPH_COUNT] = match style.size {
                    SizeClass::Px12 => &WIDTHS_12,
                    SizeClass::Px16 => &WIDTHS_16,
                    SizeClass::Px24 => &WIDTHS_24,
                    _ => &WIDTHS_32,
                };
                widths[idx]
            }
        }
    };
    Glyph {
        data,
        width,
        height,
        stride,
    }
}

//! External CJK glyph-index font files.
//!
//! A font file carries a 20-byte metadata record at byte offset 32 (font
//! kind plus one glyph-array base offset per size), a legacy double-byte
//! code table at 0x100 indexed by the remapped code index, and the glyph
//! bitmaps themselves. Direct-mapped kinds compute the bitmap position from
//! the legacy code; the compact kind stores an explicit (code point, file
//! offset) table per size.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{FrameError, Result};
use crate::font::{Glyph, SizeClass};

/// Font file flavor, from the metadata record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontKind {
    /// Directly-indexed glyph array in GB2312 code order.
    Gb2312,
    /// Directly-indexed glyph array in GBK code order.
    Gbk,
    /// Per-size (code point, file offset) lookup table, scanned linearly.
    Compact,
}

const META_OFFSET: u64 = 32;
const CODE_TABLE_OFFSET: u64 = 0x100;
const MAX_COMPACT_GLYPHS: u32 = 1024;

/// An opened glyph-index font file over a seekable byte stream.
///
/// The value owns the exclusive stream cursor, so only one resolution can
/// be in flight at a time, and the stream is released when the value drops
/// — on every path, including failures during [`load`](CjkFont::load).
pub struct CjkFont<R> {
    stream: R,
    kind: Option<FontKind>,
    bases: [u32; 4],
}

impl<R: Read + Seek> CjkFont<R> {
    /// Read the metadata record and take ownership of the stream.
    ///
    /// An unrecognized kind tag loads successfully but resolves nothing,
    /// like a file with no CJK payload.
    pub fn load(mut stream: R) -> Result<Self> {
        stream.seek(SeekFrom::Start(META_OFFSET))?;
        let mut meta = [0u8; 20];
        stream.read_exact(&mut meta)?;
        let word = |i: usize| u32::from_le_bytes(meta[i * 4..i * 4 + 4].try_into().unwrap());
        let kind = match word(0) {
            1 => Some(FontKind::Gb2312),
            2 => Some(FontKind::Gbk),
            3 => Some(FontKind::Compact),
            _ => None,
        };
        Ok(Self {
            stream,
            kind,
            bases: [word(1), word(2), word(3), word(4)],
        })
    }

    pub fn kind(&self) -> Option<FontKind> {
        self.kind
    }

    /// Glyph-array base offsets for the 12/16/24/32 px sizes; 0 marks a
    /// size the file does not carry.
    pub fn base_offsets(&self) -> [u32; 4] {
        self.bases
    }

    fn base(&self, size: SizeClass) -> Option<u32> {
        let idx = match size {
            SizeClass::Tiny => return None,
            SizeClass::Px12 => 0,
            SizeClass::Px16 => 1,
            SizeClass::Px24 => 2,
            SizeClass::Px32 => 3,
        };
        let base = self.bases[idx];
        (base > 0).then_some(base)
    }

    /// Look up the legacy double-byte code for a code point.
    /// `Ok(None)` when the code point falls outside the mapped ranges.
    fn legacy_code(&mut self, cp: u32) -> Result<Option<[u8; 2]>> {
        let Some(index) = code_index(cp) else {
            return Ok(None);
        };
        self.stream
            .seek(SeekFrom::Start(CODE_TABLE_OFFSET + index as u64 * 2))?;
        let mut code = [0u8; 2];
        self.stream.read_exact(&mut code)?;
        Ok(Some(code))
    }

    /// Resolve `cp` at `size`.
    ///
    /// `Ok(None)` is a per-character miss: unmapped range, invalid legacy
    /// code, size absent from the file, or not found in the compact index.
    /// `Err` is an I/O failure or a corrupt index structure.
    pub fn glyph(&mut self, cp: u32, size: SizeClass) -> Result<Option<Glyph>> {
        let Some(kind) = self.kind else {
            return Ok(None);
        };
        let Some(base) = self.base(size) else {
            return Ok(None);
        };
        let Some((record_len, px, stride)) = metrics(size) else {
            return Ok(None);
        };
        let pos = match kind {
            FontKind::Gb2312 | FontKind::Gbk => {
                let Some(code) = self.legacy_code(cp)? else {
                    return Ok(None);
                };
                match glyph_index(kind, code) {
                    Some(index) => Some(base as u64 + index as u64 * record_len as u64),
                    None => None,
                }
            }
            FontKind::Compact => self.compact_offset(cp, base)?.map(u64::from),
        };
        let Some(pos) = pos else {
            return Ok(None);
        };
        self.stream.seek(SeekFrom::Start(pos))?;
        let mut data = vec![0u8; record_len];
        self.stream.read_exact(&mut data)?;
        Ok(Some(Glyph {
            data,
            width: px,
            height: px,
            stride,
        }))
    }

    /// Scan the compact per-size index: a 4-byte glyph count at `base`,
    /// then that many (code point, file offset) pairs in no particular
    /// order. Bounded at 1024 entries; a zero or oversized count is a
    /// corrupt file, not a miss.
    fn compact_offset(&mut self, cp: u32, base: u32) -> Result<Option<u32>> {
        self.stream.seek(SeekFrom::Start(base as u64))?;
        let mut word = [0u8; 4];
        self.stream.read_exact(&mut word)?;
        let count = u32::from_le_bytes(word);
        if count == 0 || count > MAX_COMPACT_GLYPHS {
            return Err(FrameError::FontIndex("glyph count out of range"));
        }
        let mut table = vec![0u8; count as usize * 8];
        self.stream.read_exact(&mut table)?;
        for entry in table.chunks_exact(8) {
            let point = u32::from_le_bytes(entry[0..4].try_into().unwrap());
            if point == cp {
                return Ok(Some(u32::from_le_bytes(entry[4..8].try_into().unwrap())));
            }
        }
        Ok(None)
    }

    /// Transcode UTF-8 into the font's legacy double-byte encoding using
    /// the code table. ASCII bytes pass through; code points the table
    /// cannot express are dropped. Requires a direct-mapped kind.
    pub fn to_gbk(&mut self, text: &str) -> Result<Vec<u8>> {
        use crate::text::Decoded;
        if !matches!(self.kind, Some(FontKind::Gb2312 | FontKind::Gbk)) {
            return Err(FrameError::Unsupported("utf-8 transcoding without a direct-mapped font"));
        }
        let mut out = Vec::new();
        for decoded in crate::text::decode(text.as_bytes()) {
            match decoded {
                Decoded::Ascii(b) => out.push(b),
                Decoded::Multi(cp) => {
                    if let Some(code) = self.legacy_code(cp)? {
                        out.extend_from_slice(&code);
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Piecewise-linear remap of a Unicode code point onto the code-table
/// index. The five ranges mirror the layout of the legacy code page.
pub(crate) fn code_index(cp: u32) -> Option<u32> {
    match cp {
        0x0080..=0x047f => Some(cp - 0x80),
        0x4e00..=0x9fa5 => Some(cp - 0x4e00 + 0x0d00),
        0xff00..=0x10000 => Some(cp - 0xff00 + 0x0c00),
        0x3000..=0x30ff => Some(cp - 0x3000 + 0x0b00),
        0x2000..=0x26ff => Some(cp - 0x2000 + 0x0400),
        _ => None,
    }
}

/// Zero-based glyph index of a validated legacy code, or `None` when the
/// code falls outside the encoding.
pub(crate) fn glyph_index(kind: FontKind, code: [u8; 2]) -> Option<u32> {
    let (hi, lo) = (code[0], code[1]);
    match kind {
        FontKind::Gb2312 => {
            if (0xa1..=0xa9).contains(&hi) && (0xa1..=0xfe).contains(&lo) {
                Some((hi as u32 - 0xa1) * 94 + lo as u32 - 0xa1)
            } else if (0xb0..=0xf7).contains(&hi) && (0xa1..=0xfe).contains(&lo) {
                Some((hi as u32 - 0xb0) * 94 + lo as u32 - 0xa1 + 846)
            } else {
                None
            }
        }
        FontKind::Gbk => {
            if !(0x81..=0xfe).contains(&hi) || !(0x40..=0xfe).contains(&lo) || lo == 0x7f {
                return None;
            }
            // 0x7f never occurs in the low byte; fold it out of the index.
            let lo = if lo > 0x7f { lo - 1 } else { lo };
            Some((hi as u32 - 0x81) * 190 + lo as u32 - 0x40)
        }
        FontKind::Compact => None,
    }
}

/// (record length, pixel size, row stride) per size class.
pub(crate) fn metrics(size: SizeClass) -> Option<(usize, u8, u8)> {
    Some(match size {
        SizeClass::Tiny => return None,
        SizeClass::Px12 => (24, 12, 2),
        SizeClass::Px16 => (32, 16, 2),
        SizeClass::Px24 => (72, 24, 3),
        SizeClass::Px32 => (128, 32, 4),
    })
}

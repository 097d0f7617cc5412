//! Text rendering: the byte-level UTF-8 decoder and the glyph rasterizer.

use std::io::{Read, Seek};

use crate::ascii;
use crate::cjk::CjkFont;
use crate::error::Result;
use crate::font::{FontSettings, Glyph, Rotation};
use crate::surface::Surface;

/// One decoded unit. ASCII bytes keep their byte identity and resolve
/// against the compiled-in tables; multi-byte sequences carry the decoded
/// code point and resolve against the CJK font file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Decoded {
    Ascii(u8),
    Multi(u32),
}

/// Byte-level UTF-8 scan.
///
/// The sequence length (2..=6) comes from the lead byte's top-bit run. A
/// continuation byte that fails the `10xxxxxx` check zeroes the accumulated
/// value and is consumed without being re-examined as a new lead byte; the
/// resulting zeroed code point falls outside every glyph range and renders
/// as a skip. That recovery behavior is historical — keep it in mind when
/// feeding untrusted bytes, but do not rely on it beyond "malformed input
/// drops characters".
pub(crate) fn decode(bytes: &[u8]) -> Vec<Decoded> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x80 {
            out.push(Decoded::Ascii(b));
            i += 1;
            continue;
        }
        let (len, lead_bits) = if b >= 0xfc {
            (6, b & 0x01)
        } else if b >= 0xf8 {
            (5, b & 0x03)
        } else if b >= 0xf0 {
            (4, b & 0x07)
        } else if b >= 0xe0 {
            (3, b & 0x0f)
        } else if b >= 0xc0 {
            (2, b & 0x1f)
        } else {
            // Stray continuation byte: dropped.
            i += 1;
            continue;
        };
        let mut cp = (lead_bits as u32) << (6 * (len - 1));
        for k in 0..len - 1 {
            i += 1;
            if i >= bytes.len() {
                break;
            }
            let c = bytes[i];
            if c & 0xc0 != 0x80 {
                cp = 0;
                continue;
            }
            cp |= ((c & 0x3f) as u32) << (6 * (len - 2 - k));
        }
        out.push(Decoded::Multi(cp));
        i += 1;
    }
    out
}

/// Render `text` at (x, y) in `col`.
///
/// Characters whose glyphs cannot be resolved — code points outside the
/// mapped ranges, sizes the font file lacks, no font loaded — are skipped
/// without advancing the pen; I/O failures against the font stream abort
/// the call. Pass `None::<&mut CjkFont<std::fs::File>>` (or any stream
/// type) to render ASCII only.
pub fn draw_text<R: Read + Seek>(
    surface: &mut Surface<'_>,
    text: &str,
    x: i32,
    y: i32,
    col: u32,
    settings: &FontSettings,
    font: Option<&mut CjkFont<R>>,
) -> Result<()> {
    draw_text_bytes(surface, text.as_bytes(), x, y, col, settings, font)
}

/// [`draw_text`] over raw bytes, running the firmware UTF-8 decoder (see
/// [`decode`]) instead of trusting the input to be valid UTF-8.
pub fn draw_text_bytes<R: Read + Seek>(
    surface: &mut Surface<'_>,
    bytes: &[u8],
    x: i32,
    y: i32,
    col: u32,
    settings: &FontSettings,
    mut font: Option<&mut CjkFont<R>>,
) -> Result<()> {
    let scale = settings.scale.max(1) as i32;
    let mut pen_x = x;
    for decoded in decode(bytes) {
        let glyph = match decoded {
            Decoded::Ascii(b) => {
                if !(32..=126).contains(&b) {
                    continue;
                }
                Some(ascii::glyph(settings.style, b))
            }
            Decoded::Multi(cp) => match font.as_mut() {
                Some(f) => f.glyph(cp, settings.style.size)?,
                None => None,
            },
        };
        let Some(glyph) = glyph else { continue };
        blit_glyph(surface, &glyph, pen_x, y, col, settings);
        let advance = if settings.rotation.sideways() {
            glyph.height
        } else {
            glyph.width
        };
        pen_x += advance as i32 * scale;
    }
    Ok(())
}

/// Plot one glyph with the inverse/transparency policy, integer scale, and
/// quarter-turn transform. The pen advance is the caller's job.
fn blit_glyph(surface: &mut Surface<'_>, glyph: &Glyph, x0: i32, y0: i32, col: u32, s: &FontSettings) {
    let scale = s.scale.max(1) as i32;
    let gw = glyph.width as i32;
    let gh = glyph.height as i32;
    // Cull glyphs whose scaled bounding box misses the surface entirely.
    let (bw, bh) = if s.rotation.sideways() { (gh, gw) } else { (gw, gh) };
    if x0 >= surface.width() as i32
        || y0 >= surface.height() as i32
        || x0 <= -bw * scale
        || y0 <= -bh * scale
    {
        return;
    }
    for gy in 0..gh {
        for gx in 0..gw {
            let on = glyph.bit(gx as usize, gy as usize) != s.inverse;
            if !on && s.transparent {
                continue;
            }
            let c = if on { col } else { s.background };
            for dx in 0..scale {
                for dy in 0..scale {
                    let (px, py) = match s.rotation {
                        Rotation::R0 => (x0 + gx * scale + dx, y0 + gy * scale + dy),
                        Rotation::R90 => (x0 + gh * scale - gy * scale - dy, y0 + gx * scale + dx),
                        Rotation::R180 => (
                            x0 + gw * scale - gx * scale - dx,
                            y0 + gh * scale - gy * scale - dy,
                        ),
                        Rotation::R270 => (x0 + gy * scale - dy, y0 + gw * scale - gx * scale - dx),
                    };
                    surface.set_pixel(px, py, c);
                }
            }
        }
    }
}

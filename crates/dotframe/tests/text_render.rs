use std::io::Cursor;

use dotframe::test_support::{buffer_for, build_compact_font, lit_pixels};
use dotframe::{
    draw_text, draw_text_bytes, CjkFont, FontSettings, FontStyle, PixelFormat, Rotation, Surface,
};
use pretty_assertions::assert_eq;

type MemFont = CjkFont<Cursor<Vec<u8>>>;

fn gs8(buf: &mut [u8], w: u16, h: u16) -> Surface<'_> {
    Surface::new(buf, w, h, PixelFormat::Gs8V).unwrap()
}

fn draw_ascii(s: &mut Surface<'_>, text: &str, x: i32, y: i32, col: u32, st: &FontSettings) {
    draw_text(s, text, x, y, col, st, None::<&mut MemFont>).unwrap();
}

fn tiny() -> FontSettings {
    FontSettings {
        style: FontStyle::TINY,
        ..FontSettings::default()
    }
}

#[test]
fn simple_16px_glyph_lands_on_expected_columns() {
    let mut buf = buffer_for(PixelFormat::MonoHlsb, 16, 16);
    let mut s = Surface::new(&mut buf, 16, 16, PixelFormat::MonoHlsb).unwrap();
    let settings = FontSettings {
        style: FontStyle::S16,
        ..FontSettings::default()
    };
    draw_ascii(&mut s, "A", 0, 0, 1, &settings);
    // Top row of 'A' inks columns 2..=4 (0x38), doubled over rows 0 and 1.
    for row in [0, 1] {
        assert_eq!(s.get_pixel(2, row), 1);
        assert_eq!(s.get_pixel(3, row), 1);
        assert_eq!(s.get_pixel(4, row), 1);
        assert_eq!(s.get_pixel(0, row), 0);
        assert_eq!(s.get_pixel(7, row), 0);
    }
    // The 8x8 base leaves the bottom row blank, so rows 14/15 stay clear.
    for x in 0..8 {
        assert_eq!(s.get_pixel(x, 14), 0);
        assert_eq!(s.get_pixel(x, 15), 0);
    }
}

#[test]
fn scale_two_block_replicates_scale_one() {
    let mut small_buf = buffer_for(PixelFormat::Gs8V, 16, 16);
    let mut small = gs8(&mut small_buf, 16, 16);
    draw_ascii(&mut small, "!", 0, 0, 1, &tiny());

    let mut big_buf = buffer_for(PixelFormat::Gs8V, 32, 32);
    let mut big = gs8(&mut big_buf, 32, 32);
    let doubled = FontSettings { scale: 2, ..tiny() };
    draw_ascii(&mut big, "!", 0, 0, 1, &doubled);

    for y in 0..8 {
        for x in 0..6 {
            let v = small.get_pixel(x, y);
            for dy in 0..2 {
                for dx in 0..2 {
                    assert_eq!(
                        big.get_pixel(2 * x + dx, 2 * y + dy),
                        v,
                        "block ({x},{y}) not replicated"
                    );
                }
            }
        }
    }
}

#[test]
fn pen_advances_by_width_upright_and_height_sideways() {
    let mut upright_buf = buffer_for(PixelFormat::Gs8V, 24, 12);
    let mut upright = gs8(&mut upright_buf, 24, 12);
    draw_ascii(&mut upright, "!!", 0, 0, 1, &tiny());
    let xs: Vec<i32> = lit_pixels(&upright).iter().map(|&(x, _)| x).collect();
    // The '!' stem sits in column 2 of the 6-wide cell; the second copy is
    // one 6-pixel advance later.
    assert!(xs.iter().all(|&x| x == 2 || x == 8), "{xs:?}");
    assert!(xs.contains(&2) && xs.contains(&8));

    let mut side_buf = buffer_for(PixelFormat::Gs8V, 24, 12);
    let mut side = gs8(&mut side_buf, 24, 12);
    let rotated = FontSettings {
        rotation: Rotation::R90,
        ..tiny()
    };
    draw_ascii(&mut side, "!!", 0, 0, 1, &rotated);
    let lit = lit_pixels(&side);
    // Rotated a quarter turn, the stem is a horizontal run at y = 2 and the
    // advance is the glyph height (8).
    assert!(lit.iter().all(|&(_, y)| y == 2), "{lit:?}");
    assert!(lit.iter().any(|&(x, _)| x > 8));
    assert_eq!(lit.len(), 12);
}

#[test]
fn opaque_background_fills_the_cell() {
    let mut buf = buffer_for(PixelFormat::Gs8V, 16, 16);
    let mut s = gs8(&mut buf, 16, 16);
    let settings = FontSettings {
        transparent: false,
        background: 7,
        ..tiny()
    };
    draw_ascii(&mut s, " ", 0, 0, 1, &settings);
    for y in 0..16 {
        for x in 0..16 {
            let expected = if x < 6 && y < 8 { 7 } else { 0 };
            assert_eq!(s.get_pixel(x, y), expected, "({x},{y})");
        }
    }
}

#[test]
fn inverse_swaps_foreground_and_background_bits() {
    let mut buf = buffer_for(PixelFormat::Gs8V, 16, 16);
    let mut s = gs8(&mut buf, 16, 16);
    let settings = FontSettings {
        inverse: true,
        ..tiny()
    };
    draw_ascii(&mut s, " ", 0, 0, 1, &settings);
    // Every bit of the space glyph is background, so inversion paints the
    // whole 6x8 cell in the foreground color.
    for y in 0..8 {
        for x in 0..6 {
            assert_eq!(s.get_pixel(x, y), 1);
        }
    }
    assert_eq!(lit_pixels(&s).len(), 48);
}

#[test]
fn proportional_family_tightens_the_advance() {
    let mut simple_buf = buffer_for(PixelFormat::Gs8V, 40, 20);
    let mut simple = gs8(&mut simple_buf, 40, 20);
    let s16 = FontSettings {
        style: FontStyle::S16,
        ..FontSettings::default()
    };
    draw_ascii(&mut simple, "ii", 0, 0, 1, &s16);
    let simple_max = lit_pixels(&simple).iter().map(|&(x, _)| x).max().unwrap();

    let mut prop_buf = buffer_for(PixelFormat::Gs8V, 40, 20);
    let mut prop = gs8(&mut prop_buf, 40, 20);
    let a16 = FontSettings {
        style: FontStyle::A16,
        ..FontSettings::default()
    };
    draw_ascii(&mut prop, "ii", 0, 0, 1, &a16);
    let prop_max = lit_pixels(&prop).iter().map(|&(x, _)| x).max().unwrap();
    assert!(prop_max < simple_max, "{prop_max} vs {simple_max}");
}

#[test]
fn control_bytes_and_del_are_skipped() {
    let mut buf = buffer_for(PixelFormat::Gs8V, 32, 16);
    let mut s = gs8(&mut buf, 32, 16);
    draw_text_bytes(&mut s, &[0x07, 0x0a, 0x7f, 0x1b], 0, 0, 1, &tiny(), None::<&mut MemFont>)
        .unwrap();
    assert_eq!(lit_pixels(&s), vec![]);
}

#[test]
fn malformed_continuation_swallows_the_byte() {
    // 0xE4 opens a 3-byte sequence; 'A' fails the continuation check and is
    // consumed (not re-examined), 0xB8 merges into the zeroed code point.
    // The result is an unmapped code point: nothing renders, including 'A'.
    let mut buf = buffer_for(PixelFormat::Gs8V, 32, 16);
    let mut s = gs8(&mut buf, 32, 16);
    draw_text_bytes(&mut s, &[0xe4, b'A', 0xb8], 0, 0, 1, &tiny(), None::<&mut MemFont>).unwrap();
    assert_eq!(lit_pixels(&s), vec![]);
}

#[test]
fn text_resumes_after_a_malformed_sequence() {
    let mut direct_buf = buffer_for(PixelFormat::Gs8V, 32, 16);
    let mut direct = gs8(&mut direct_buf, 32, 16);
    draw_ascii(&mut direct, "B", 0, 0, 1, &tiny());

    let mut mangled_buf = buffer_for(PixelFormat::Gs8V, 32, 16);
    let mut mangled = gs8(&mut mangled_buf, 32, 16);
    draw_text_bytes(
        &mut mangled,
        &[0xe4, b'A', 0xb8, b'B'],
        0,
        0,
        1,
        &tiny(),
        None::<&mut MemFont>,
    )
    .unwrap();
    // The swallowed sequence renders nothing and advances nothing, so 'B'
    // lands at the origin.
    assert_eq!(lit_pixels(&direct), lit_pixels(&mangled));
}

#[test]
fn stray_continuation_byte_is_dropped() {
    let mut direct_buf = buffer_for(PixelFormat::Gs8V, 32, 16);
    let mut direct = gs8(&mut direct_buf, 32, 16);
    draw_ascii(&mut direct, "A", 0, 0, 1, &tiny());

    let mut stray_buf = buffer_for(PixelFormat::Gs8V, 32, 16);
    let mut stray = gs8(&mut stray_buf, 32, 16);
    draw_text_bytes(&mut stray, &[0x80, b'A'], 0, 0, 1, &tiny(), None::<&mut MemFont>).unwrap();
    assert_eq!(lit_pixels(&direct), lit_pixels(&stray));
}

#[test]
fn cjk_glyph_renders_and_advances_from_the_font_file() {
    let solid = vec![0xffu8; 32];
    let file = build_compact_font(dotframe::SizeClass::Px16, &[('中' as u32, solid)]);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();

    let mut buf = buffer_for(PixelFormat::Gs8V, 40, 20);
    let mut s = gs8(&mut buf, 40, 20);
    let s16 = FontSettings {
        style: FontStyle::S16,
        ..FontSettings::default()
    };
    draw_text(&mut s, "中", 0, 0, 9, &s16, Some(&mut font)).unwrap();
    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(s.get_pixel(x, y), 9, "({x},{y})");
        }
    }
    assert_eq!(s.get_pixel(16, 0), 0);
}

#[test]
fn unresolved_cjk_character_is_skipped_without_advancing() {
    let solid = vec![0xffu8; 32];
    let file = build_compact_font(dotframe::SizeClass::Px16, &[('中' as u32, solid)]);
    let s16 = FontSettings {
        style: FontStyle::S16,
        ..FontSettings::default()
    };

    let mut expected_buf = buffer_for(PixelFormat::Gs8V, 40, 20);
    let mut expected = gs8(&mut expected_buf, 40, 20);
    let mut font = CjkFont::load(Cursor::new(file.clone())).unwrap();
    draw_text(&mut expected, "中", 0, 0, 9, &s16, Some(&mut font)).unwrap();

    let mut actual_buf = buffer_for(PixelFormat::Gs8V, 40, 20);
    let mut actual = gs8(&mut actual_buf, 40, 20);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    // U+65E5 is not in the index: skipped, no advance.
    draw_text(&mut actual, "日中", 0, 0, 9, &s16, Some(&mut font)).unwrap();

    assert_eq!(lit_pixels(&expected), lit_pixels(&actual));
}

#[test]
fn cjk_without_a_font_renders_nothing() {
    let mut buf = buffer_for(PixelFormat::Gs8V, 40, 20);
    let mut s = gs8(&mut buf, 40, 20);
    let s16 = FontSettings {
        style: FontStyle::S16,
        ..FontSettings::default()
    };
    draw_text(&mut s, "中", 0, 0, 9, &s16, None::<&mut MemFont>).unwrap();
    assert_eq!(lit_pixels(&s), vec![]);
}

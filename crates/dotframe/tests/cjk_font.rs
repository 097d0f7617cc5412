use std::io::Cursor;

use dotframe::test_support::{build_compact_font, build_direct_font, record_len};
use dotframe::{CjkFont, FontKind, FrameError, SizeClass};
use pretty_assertions::assert_eq;

fn numbered(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

#[test]
fn compact_index_returns_the_recorded_bytes() {
    let glyph = numbered(record_len(SizeClass::Px16));
    let file = build_compact_font(SizeClass::Px16, &[(0x4e2d, glyph.clone())]);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert_eq!(font.kind(), Some(FontKind::Compact));
    let resolved = font.glyph(0x4e2d, SizeClass::Px16).unwrap().unwrap();
    assert_eq!(resolved.data, glyph);
    assert_eq!((resolved.width, resolved.height, resolved.stride), (16, 16, 2));
}

#[test]
fn compact_index_misses_unlisted_code_points() {
    let file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert!(font.glyph(0x65e5, SizeClass::Px16).unwrap().is_none());
}

#[test]
fn compact_index_rejects_corrupt_glyph_counts() {
    for count in [0u32, 5000] {
        let mut file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
        file[0x100..0x104].copy_from_slice(&count.to_le_bytes());
        let mut font = CjkFont::load(Cursor::new(file)).unwrap();
        match font.glyph(0x4e2d, SizeClass::Px16) {
            Err(FrameError::FontIndex(_)) => {}
            other => panic!("expected FontIndex error, got {other:?}"),
        }
    }
}

#[test]
fn gb2312_direct_lookup_seeks_by_code_formula() {
    let glyph = numbered(record_len(SizeClass::Px12));
    // 0xb0a1 sits at glyph index 846 in the two-range GB2312 layout.
    let file = build_direct_font(
        FontKind::Gb2312,
        SizeClass::Px12,
        &[(0x4e2d, [0xb0, 0xa1], glyph.clone())],
    );
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert_eq!(font.kind(), Some(FontKind::Gb2312));
    let resolved = font.glyph(0x4e2d, SizeClass::Px12).unwrap().unwrap();
    assert_eq!(resolved.data, glyph);
    assert_eq!((resolved.width, resolved.height, resolved.stride), (12, 12, 2));
}

#[test]
fn gbk_direct_lookup_folds_the_low_byte() {
    let glyph = numbered(record_len(SizeClass::Px16));
    // Low byte 0x80 folds over the excluded 0x7f slot: index (0x81-0x81)*190
    // + (0x7f-0x40) = 63.
    let file = build_direct_font(
        FontKind::Gbk,
        SizeClass::Px16,
        &[(0x4e2d, [0x81, 0x80], glyph.clone())],
    );
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    let resolved = font.glyph(0x4e2d, SizeClass::Px16).unwrap().unwrap();
    assert_eq!(resolved.data, glyph);
}

#[test]
fn invalid_legacy_code_is_a_miss() {
    // 0x4e2e's table slot stays zeroed; [0, 0] fails GB2312 validation.
    let file = build_direct_font(
        FontKind::Gb2312,
        SizeClass::Px12,
        &[(0x4e2d, [0xb0, 0xa1], numbered(24))],
    );
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert!(font.glyph(0x4e2e, SizeClass::Px12).unwrap().is_none());
}

#[test]
fn code_points_outside_every_range_miss() {
    let file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    for cp in [0x7fu32, 0x500, 0x3200, 0xa000, 0x2_0000] {
        assert!(font.glyph(cp, SizeClass::Px16).unwrap().is_none(), "{cp:#x}");
    }
}

#[test]
fn absent_size_is_a_miss() {
    let file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert!(font.glyph(0x4e2d, SizeClass::Px24).unwrap().is_none());
    assert!(font.glyph(0x4e2d, SizeClass::Tiny).unwrap().is_none());
}

#[test]
fn unknown_kind_loads_but_resolves_nothing() {
    let mut file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
    file[32..36].copy_from_slice(&9u32.to_le_bytes());
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert_eq!(font.kind(), None);
    assert!(font.glyph(0x4e2d, SizeClass::Px16).unwrap().is_none());
}

#[test]
fn truncated_metadata_fails_to_load() {
    assert!(CjkFont::load(Cursor::new(vec![0u8; 10])).is_err());
}

#[test]
fn truncated_glyph_record_propagates_the_read_error() {
    let mut file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
    file.truncate(file.len() - 8);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert!(matches!(
        font.glyph(0x4e2d, SizeClass::Px16),
        Err(FrameError::Io(_))
    ));
}

#[test]
fn to_gbk_passes_ascii_and_transcodes_cjk() {
    let file = build_direct_font(
        FontKind::Gb2312,
        SizeClass::Px12,
        &[(0x4e2d, [0xd6, 0xd0], numbered(24))],
    );
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert_eq!(font.to_gbk("A中B").unwrap(), vec![0x41, 0xd6, 0xd0, 0x42]);
    // Unmapped code points drop out.
    assert_eq!(font.to_gbk("A\u{1F600}").unwrap(), vec![0x41]);
}

#[test]
fn to_gbk_requires_a_direct_mapped_font() {
    let file = build_compact_font(SizeClass::Px16, &[(0x4e2d, numbered(32))]);
    let mut font = CjkFont::load(Cursor::new(file)).unwrap();
    assert!(matches!(
        font.to_gbk("中"),
        Err(FrameError::Unsupported(_))
    ));
}

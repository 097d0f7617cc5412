use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn demo_writes_a_bmp_file() {
    let dir = std::env::temp_dir().join("dotframe-cli-test");
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("demo.bmp");
    Command::cargo_bin("dotframe")
        .unwrap()
        .args(["demo", "--out"])
        .arg(&out)
        .assert()
        .success();
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[0..2], b"BM");
}

#[test]
fn render_supports_preview_output() {
    let dir = std::env::temp_dir().join("dotframe-cli-test");
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("render.bmp");
    Command::cargo_bin("dotframe")
        .unwrap()
        .args(["render", "--text", "Hi", "--preview", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("@"));
}

#[test]
fn info_reports_missing_font_files() {
    Command::cargo_bin("dotframe")
        .unwrap()
        .args(["info", "--font", "/nonexistent/font.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("font"));
}

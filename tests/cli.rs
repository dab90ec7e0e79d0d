//! End-to-end runs of the binaries: exit codes, usage, files produced.

use ascii_art::MonoFont;
use assert_cmd::prelude::*;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn bin(name: &str) -> Command {
    let path = match name {
        "ascii-art" => env!("CARGO_BIN_EXE_ascii-art"),
        "ascii2img" => env!("CARGO_BIN_EXE_ascii2img"),
        "ascii-border" => env!("CARGO_BIN_EXE_ascii-border"),
        "ascii-border-8bit" => env!("CARGO_BIN_EXE_ascii-border-8bit"),
        "eightbit" => env!("CARGO_BIN_EXE_eightbit"),
        other => panic!("unknown binary {other}"),
    };
    let mut cmd = Command::new(path);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn gradient_png(dir: &Path, w: u32, h: u32) -> PathBuf {
    let path = dir.join("in.png");
    RgbImage::from_fn(w, h, |x, y| {
        let v = ((x + y) * 255 / (w + h - 2)) as u8;
        Rgb([v, v, v])
    })
    .save(&path)
    .unwrap();
    path
}

#[test]
fn ascii_art_without_args_prints_usage() {
    bin("ascii-art")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn ascii_art_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    bin("ascii-art")
        .arg(dir.path().join("nope.png"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn ascii_art_undecodable_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    bin("ascii-art").arg(&path).assert().code(1);
}

#[test]
fn ascii_art_honours_width() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 100, 60);
    let output = bin("ascii-art").arg(&input).arg("20").output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines.iter().all(|l| l.chars().count() == 20));
}

#[test]
fn ascii_art_bad_width_falls_back_to_80() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 160, 40);
    for width in ["abc", "0", "-3"] {
        let output = bin("ascii-art").arg(&input).arg(width).output().unwrap();
        assert!(output.status.success(), "width {width}");
        let text = String::from_utf8(output.stdout).unwrap();
        assert!(text.lines().all(|l| l.chars().count() == 80), "width {width}");
        assert_eq!(text.lines().count(), 10);
    }
}

#[test]
fn ascii_art_huge_width_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 2, 2);
    bin("ascii-art")
        .arg(&input)
        .arg("4294967295")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn ascii2img_needs_two_paths() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "@@\n").unwrap();

    bin("ascii2img")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
    bin("ascii2img")
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn ascii2img_missing_input_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.png");
    bin("ascii2img")
        .arg(dir.path().join("missing.txt"))
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
    assert!(!out.exists());
}

#[test]
fn ascii2img_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "@@\n").unwrap();
    bin("ascii2img")
        .arg(&input)
        .arg(dir.path().join("no/such/dir/out.png"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to write"));
}

#[test]
fn ascii2img_bad_font_size_uses_default() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "@%#\n*+=\n-:.\n").unwrap();
    let default_out = dir.path().join("default.png");
    let bad_out = dir.path().join("bad.png");

    bin("ascii2img")
        .arg(&input)
        .arg(&default_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved image to"));
    bin("ascii2img")
        .arg(&input)
        .arg(&bad_out)
        .arg("--fontSize=abc")
        .arg("--padding=xyz")
        .assert()
        .success();

    let a = image::open(&default_out).unwrap();
    let b = image::open(&bad_out).unwrap();
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    // 3 lines at 12px with 10px padding
    assert_eq!(a.height(), (12.0f64 * 1.2 * 3.0 + 20.0).ceil() as u32);
}

#[test]
fn ascii2img_font_size_and_padding_reach_renderer() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    let out = dir.path().join("out.png");
    std::fs::write(&input, "ab\n").unwrap();

    bin("ascii2img")
        .arg(&input)
        .arg(&out)
        .arg("--fontSize=30")
        .arg("--padding=1")
        .assert()
        .success();

    let font = MonoFont::bundled().unwrap();
    let img = image::open(&out).unwrap();
    let width = (font.char_width(30.0) as f64 * 2.0 + 2.0).ceil() as u32;
    let height = (font.line_height(30.0) as f64 + 2.0).ceil() as u32;
    assert_eq!((img.width(), img.height()), (width, height));
    assert_eq!(height, 38);
}

#[test]
fn ascii2img_huge_padding_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    let out = dir.path().join("out.png");
    std::fs::write(&input, "ab\n").unwrap();

    bin("ascii2img")
        .arg(&input)
        .arg(&out)
        .arg("--padding=4000000000")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
    assert!(!out.exists());
}

#[test]
fn ascii2img_replaces_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cp437.txt");
    let out = dir.path().join("out.png");
    std::fs::write(&input, b"a\xb0b\n").unwrap();

    bin("ascii2img").arg(&input).arg(&out).assert().success();

    // the stray byte becomes one replacement character
    let font = MonoFont::bundled().unwrap();
    let img = image::open(&out).unwrap();
    assert_eq!(img.width(), (font.char_width(12.0) as f64 * 3.0 + 20.0).ceil() as u32);
}

#[test]
fn ascii2img_debug_log_shows_font_metrics() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "@\n").unwrap();

    bin("ascii2img")
        .env("RUST_LOG", "debug")
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .assert()
        .success()
        .stderr(predicate::str::contains("char width"));
}

#[test]
fn round_trip_through_both_tools() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 90, 90);
    let art = dir.path().join("art.txt");
    let rendered = dir.path().join("art.jpg");

    let output = bin("ascii-art").arg(&input).arg("30").output().unwrap();
    assert!(output.status.success());
    std::fs::write(&art, output.stdout).unwrap();

    bin("ascii2img")
        .arg(&art)
        .arg(&rendered)
        .arg("--fontSize=10")
        .arg("--padding=4")
        .assert()
        .success();

    // PNG regardless of the extension
    let bytes = std::fs::read(&rendered).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
    let img = image::load_from_memory(&bytes).unwrap();
    assert!(img.width() > 8 && img.height() > 8);
}

#[test]
fn border_tools_write_images() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 200, 200);

    let bordered = dir.path().join("bordered.png");
    bin("ascii-border")
        .arg(&input)
        .arg(&bordered)
        .args(["--border", "3", "--fade", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved bordered image to"));
    assert_eq!(image::open(&bordered).unwrap().width(), 200);

    let layered = dir.path().join("layered.png");
    bin("ascii-border-8bit")
        .arg(&input)
        .arg(&layered)
        .args(["--border", "2", "--quant", "2", "--radius", "2", "--colors", "16", "--dither"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved composite image to"));
    assert_eq!(image::open(&layered).unwrap().height(), 200);
}

#[test]
fn layered_border_rejects_oversized_bands() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 100, 100);
    let out = dir.path().join("out.png");
    bin("ascii-border-8bit")
        .arg(&input)
        .arg(&out)
        .args(["--border", "5", "--quant", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds"));
    assert!(!out.exists());
}

#[test]
fn eightbit_limits_palette() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 64, 64);
    let out = dir.path().join("out.png");
    bin("eightbit")
        .arg(&input)
        .arg(&out)
        .args(["--colors", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 8-bit filtered image to"));

    let img = image::open(&out).unwrap().to_rgb8();
    let distinct: std::collections::HashSet<_> = img.pixels().map(|p| p.0).collect();
    assert!(distinct.len() <= 4);
}

#[test]
fn eightbit_rejects_out_of_range_colours() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(dir.path(), 8, 8);
    bin("eightbit")
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .args(["--colors", "300"])
        .assert()
        .code(1);
}

#![allow(missing_docs, clippy::tests_outside_test_module)]

use std::{fs::File, path::Path, process::Command};

use assert_cmd::{
    assert::{Assert, OutputAssertExt},
    cargo::CommandCargoExt,
};
use hilbertcurve::render::BACKGROUND;
use image::GenericImageView;
use tempfile::tempdir;

#[allow(deprecated)]
fn hilbert(args: &[&str]) -> Assert {
    let mut cmd = Command::cargo_bin("hilbert").expect("binary exists");
    cmd.args(args);
    cmd.assert()
}

fn stdout(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn count_gif_frames(path: &Path) -> usize {
    let file = File::open(path).expect("open gif");
    let mut decoder = gif::DecodeOptions::new()
        .read_info(file)
        .expect("gif header decodes");
    let mut frames = 0;
    while decoder.read_next_frame().expect("frame decodes").is_some() {
        frames += 1;
    }
    frames
}

#[test]
fn render_writes_png_of_requested_size() {
    let td = tempdir().expect("tmp");
    let out = td.path().join("curve.png");
    let out_str = out.to_str().expect("utf8 path");

    let assert = hilbert(&[
        "render", "-o", "3", "-s", "160", "--height", "120", "--padding", "20", out_str,
    ])
    .success();
    assert!(stdout(&assert).contains("order 3, 64 points, length 63.00"));

    let img = image::open(&out).expect("image decodes");
    assert_eq!(img.dimensions(), (160, 120));
    assert_eq!(img.get_pixel(0, 0), BACKGROUND);
    assert_eq!(img.get_pixel(159, 119), BACKGROUND);
}

#[test]
fn render_uses_requested_color() {
    let td = tempdir().expect("tmp");
    let out = td.path().join("red.png");
    let out_str = out.to_str().expect("utf8 path");

    hilbert(&[
        "render", "-o", "1", "-s", "100", "--padding", "10", "--color", "red", "-w", "4",
        out_str,
    ])
    .success();

    // Order 1 starts at the top-left cell and runs down the left edge.
    let img = image::open(&out).expect("image decodes");
    assert_eq!(img.get_pixel(10, 50).0, [0xff, 0, 0, 0xff]);
}

#[test]
fn animate_writes_every_stride_frame_plus_the_last() {
    let td = tempdir().expect("tmp");
    let out = td.path().join("anim.gif");
    let out_str = out.to_str().expect("utf8 path");

    // 16 points at one point per tick: ticks 5, 10, 15 and the final 16.
    let assert = hilbert(&[
        "animate", "-o", "2", "-s", "48", "--stride", "5", out_str,
    ])
    .success();
    assert!(stdout(&assert).contains("(4 frames)"));
    assert_eq!(count_gif_frames(&out), 4);
}

#[test]
fn animate_keeps_every_tick_by_default() {
    let td = tempdir().expect("tmp");
    let out = td.path().join("anim.gif");
    let out_str = out.to_str().expect("utf8 path");

    hilbert(&["animate", "-o", "1", "-s", "32", "--fps", "10", out_str]).success();
    assert_eq!(count_gif_frames(&out), 4);
}

#[test]
fn out_of_range_order_is_rejected() {
    let td = tempdir().expect("tmp");
    let out = td.path().join("bad.png");
    let out_str = out.to_str().expect("utf8 path");

    hilbert(&["render", "-o", "0", out_str]).failure();
    hilbert(&["render", "-o", "9", out_str]).failure();
    assert!(!out.exists());
}

#[test]
fn bad_style_is_rejected() {
    let td = tempdir().expect("tmp");
    let out = td.path().join("bad.png");
    let out_str = out.to_str().expect("utf8 path");

    hilbert(&["render", "--color", "#12", out_str]).failure();
    hilbert(&["render", "-w", "0", out_str]).failure();
    hilbert(&["render", "--padding", "-5", out_str]).failure();
    hilbert(&["render", "-s", "0", out_str]).failure();
}

#[test]
fn stats_prints_summary() {
    let assert = hilbert(&["stats", "-o", "8"]).success();
    assert!(stdout(&assert).contains("order 8, 65536 points, length 65535.00"));
}

#[test]
fn locate_converts_both_ways() {
    let assert = hilbert(&["locate", "-o", "2", "8"]).success();
    assert!(stdout(&assert).contains("8 -> (2, 2)"));

    let assert = hilbert(&["locate", "-o", "2", "2,2"]).success();
    assert!(stdout(&assert).contains("(2, 2) -> 8"));

    hilbert(&["locate", "-o", "2", "16"]).failure();
    hilbert(&["locate", "-o", "2", "4,0"]).failure();
}

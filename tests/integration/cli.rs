use std::process::Command;

use crate::{list, load_png, write, MALFORMED, RED_SQUARE};

fn svgbatch(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_svgbatch"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn empty_directory_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "drawing.txt", "<svg/>");

    let out = svgbatch(dir.path(), &[]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no SVG files found"), "{}", stderr);
    assert_eq!(list(dir.path()), ["drawing.txt"]);
}

#[test]
fn unknown_argument() {
    let dir = tempfile::tempdir().unwrap();
    let out = svgbatch(dir.path(), &["--width", "100"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("USAGE:"));
    assert!(list(dir.path()).is_empty());
}

#[test]
fn version() {
    let dir = tempfile::tempdir().unwrap();
    let out = svgbatch(dir.path(), &["--version"]);

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn failed_file_keeps_exit_status_0() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.svg", RED_SQUARE);
    write(dir.path(), "b.svg", MALFORMED);
    write(dir.path(), "c.svg", RED_SQUARE);

    let out = svgbatch(dir.path(), &["--quiet"]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stdout.contains("Found 3 SVG files."), "{}", stdout);
    assert!(stdout.contains("[2/3] Converting b.svg → b.png..."), "{}", stdout);
    assert_eq!(stdout.matches("Saved!").count(), 2, "{}", stdout);
    assert!(stdout.contains("Batch complete! 2 of 3 files converted."), "{}", stdout);
    assert_eq!(stderr.matches("Error converting ").count(), 1, "{}", stderr);
    assert!(stderr.contains("Error converting b.svg: "), "{}", stderr);

    assert_eq!(list(dir.path()), ["a.png", "a.svg", "b.svg", "c.png", "c.svg"]);
    let png = load_png(&dir.path().join("a.png"));
    assert_eq!((png.width, png.height), (7680, 4320));
}

mod common;

use std::fs;

use bitflip::{BitView, CurrentBuffer, FileStorage, InputMode};
use common::{run_session, strip_ansi};
use pretty_assertions::assert_eq;

const UP: &[u8] = b"\x1b[A";
const DOWN: &[u8] = b"\x1b[B";
const LEFT: &[u8] = b"\x1b[D";

fn keys(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

#[test]
fn empty_file_insert_toggle_quit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");

    let out = run_session(FileStorage::new(&path), b"i q");

    assert_eq!(fs::read(&path).unwrap(), vec![0x01]);
    let text = strip_ansi(&out);
    assert!(text.contains("(buffer empty)"));
    assert!(text.contains("Byte: 0, Bit: 0 EOF SAVED\n00000001 "));
}

#[test]
fn untouched_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let original: Vec<u8> = (0..=255u8).rev().collect();
    fs::write(&path, &original).unwrap();

    run_session(FileStorage::new(&path), &keys(&[DOWN, DOWN, UP, LEFT, b"xq"]));

    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn toggling_a_to_at_updates_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, b"A").unwrap();

    let out = run_session(FileStorage::new(&path), b" q");

    let text = strip_ansi(&out);
    assert!(text.contains("01000001 'A'"));
    assert!(text.contains("01000000 '@'"));
    assert_eq!(fs::read(&path).unwrap(), b"@");
}

#[test]
fn delete_at_end_moves_cursor_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.bin");
    fs::write(&path, [0x01, 0x02]).unwrap();

    let out = run_session(FileStorage::new(&path), &keys(&[DOWN, b"dq"]));

    assert_eq!(fs::read(&path).unwrap(), vec![0x01]);
    let text = strip_ansi(&out);
    assert!(text.contains("Byte: 1, Bit: 0 EOF\n00000010 "));
    assert!(text.contains("Byte: 0, Bit: 0 EOF SAVED\n00000001 "));
}

#[test]
fn newline_byte_shows_escape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nl.txt");
    fs::write(&path, b"\n").unwrap();

    let out = run_session(FileStorage::new(&path), b"q");

    assert!(strip_ansi(&out).contains("00001010 '\\n'"));
}

#[test]
fn status_is_shown_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.bin");
    fs::write(&path, [0x00]).unwrap();

    let out = run_session(FileStorage::new(&path), b"s q");

    let text = strip_ansi(&out);
    // once for `s`, once for `q`; the frame after the toggle has none
    assert_eq!(text.matches("SAVED").count(), 2);
    assert!(text.contains("Byte: 0, Bit: 0 EOF\n00000001 "));
}

#[test]
fn save_failure_keeps_session_running() {
    let dir = tempfile::tempdir().unwrap();
    // a directory can never be opened for writing
    let view = BitView::new(
        CurrentBuffer::from_data(vec![0x41]),
        FileStorage::new(dir.path()),
    );
    let mut input = &b"s q"[..];
    let mut out = Vec::new();
    view.run_event_loop(&mut input, &mut out, InputMode::detached())
        .unwrap();

    let text = strip_ansi(&out);
    let frames: Vec<&str> = text.split("Byte: ").skip(1).collect();
    assert_eq!(frames.len(), 4);
    assert!(!frames[1].contains("SAVED"));
    assert!(frames[1].starts_with("0, Bit: 0 EOF "));
    assert!(frames[2].starts_with("0, Bit: 0 EOF\n01000000 '@'"));
}

#[test]
fn frames_are_erased_between_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("e.bin");
    fs::write(&path, [0x00]).unwrap();

    let out = run_session(FileStorage::new(&path), b"xq");

    let raw = String::from_utf8_lossy(&out);
    assert_eq!(raw.matches("\x1b[1A\x1b[2K\x1b[J\r").count(), 2);
    assert_eq!(raw.matches("\x1b[?25l").count(), 2);
    assert_eq!(raw.matches("\x1b[?25h").count(), 2);
}

use std::collections::HashMap;
use std::io::{self, Read};

use lazy_static::lazy_static;
use maplit::hashmap;
use tracing::trace;

const ESC: u8 = 0x1b;
const BRACKET: u8 = b'[';

/// One logical keypress, decoded from at most three raw input bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Key {
    Printable(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Unrecognized,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    ToggleBit,
    InsertByte,
    DeleteByte,
    Save,
    Quit,
    Move(Direction),
}

fn read_byte(input: &mut impl Read) -> io::Result<u8> {
    let mut byte = [0u8; 1];
    input.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn is_printable(byte: u8) -> bool {
    byte.is_ascii_graphic() || byte == b' '
}

/// Blocks until one key has been read from `input`.
///
/// An escape byte pulls a second byte; if that is `[` a third byte is read
/// and `A`..`D` become arrow keys. Any other combination is `Unrecognized`
/// with all of its bytes consumed.
pub fn read_key(input: &mut impl Read) -> io::Result<Key> {
    let a = read_byte(input)?;
    if a != ESC {
        return Ok(if is_printable(a) {
            Key::Printable(char::from(a))
        } else {
            Key::Unrecognized
        });
    }

    let b = read_byte(input)?;
    if b != BRACKET {
        trace!(target: "bitflip.input", b, "escape without bracket");
        return Ok(Key::Unrecognized);
    }

    let key = match read_byte(input)? {
        b'A' => Key::ArrowUp,
        b'B' => Key::ArrowDown,
        b'C' => Key::ArrowRight,
        b'D' => Key::ArrowLeft,
        c => {
            trace!(target: "bitflip.input", c, "unknown escape sequence");
            Key::Unrecognized
        }
    };
    Ok(key)
}

fn default_maps() -> HashMap<Key, Action> {
    hashmap! {
        Key::Printable(' ') => Action::ToggleBit,
        Key::Printable('i') => Action::InsertByte,
        Key::Printable('d') => Action::DeleteByte,
        Key::Printable('s') => Action::Save,
        Key::Printable('q') => Action::Quit,
        Key::ArrowUp => Action::Move(Direction::Up),
        Key::ArrowDown => Action::Move(Direction::Down),
        Key::ArrowLeft => Action::Move(Direction::Left),
        Key::ArrowRight => Action::Move(Direction::Right),
    }
}

lazy_static! {
    static ref DEFAULT_MAPS: HashMap<Key, Action> = default_maps();
}

pub fn key_to_action(key: Key) -> Option<Action> {
    DEFAULT_MAPS.get(&key).copied()
}

/// Key column and description for every binding, in banner order.
pub const HELP: [(&str, &str); 8] = [
    ("arrow up", "go to previous byte"),
    ("arrow down", "go to next byte"),
    ("arrow < >", "switch between bits"),
    ("space", "toggle bit"),
    ("i", "append new byte"),
    ("d", "delete current byte"),
    ("s", "save to file"),
    ("q", "save and exit"),
];

use std::fmt;
use std::io::Write;

use crossterm::{
    cursor, queue, style,
    style::Stylize,
    terminal, Result,
};

use crate::current_buffer::CurrentBuffer;
use crate::cursor::Cursor;
use crate::keymap::HELP;

/// Every frame, empty or not, occupies this many terminal lines.
pub const FRAME_LINES: usize = 2;

const EMPTY_MARKER: &str = "(buffer empty)";

/// The byte as a quoted character, an escape mnemonic, or nothing at all.
pub struct AsciiRepr(pub u8);

impl fmt::Display for AsciiRepr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mnemonic = match self.0 {
            0x00 => "\\0",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x07 => "\\a",
            0x0c => "\\f",
            0x0b => "\\v",
            b if b.is_ascii_graphic() || b == b' ' => {
                return write!(f, "'{}'", char::from(b));
            }
            _ => return Ok(()),
        };
        write!(f, "'{}'", mnemonic)
    }
}

pub fn draw_help(stdout: &mut impl Write) -> Result<()> {
    for (key, description) in HELP.iter() {
        queue!(stdout, style::Print(format!("{:<10} - {}\n", key, description)))?;
    }
    stdout.flush()?;
    Ok(())
}

fn draw_bits(stdout: &mut impl Write, byte: u8, selected: u8) -> Result<()> {
    for i in (0..8u8).rev() {
        let bit = if (byte >> i) & 1 == 1 { '1' } else { '0' };
        if i == selected {
            queue!(
                stdout,
                style::PrintStyledContent(style::style(bit).reverse())
            )?;
        } else {
            queue!(stdout, style::Print(bit))?;
        }
    }
    Ok(())
}

/// Draws the two-line frame for the byte under the cursor.
pub fn draw_frame(
    stdout: &mut impl Write,
    buffer: &CurrentBuffer,
    cursor: Cursor,
    status: Option<&str>,
) -> Result<()> {
    let byte = match buffer.get(cursor.byte) {
        Some(byte) => byte,
        None => {
            queue!(stdout, style::Print("\n"), style::Print(EMPTY_MARKER))?;
            stdout.flush()?;
            return Ok(());
        }
    };

    queue!(
        stdout,
        style::Print(format!("Byte: {}, Bit: {}", cursor.byte, cursor.bit))
    )?;
    if buffer.last_index() == Some(cursor.byte) {
        queue!(stdout, style::Print(" EOF"))?;
    }
    if let Some(status) = status {
        queue!(stdout, style::Print(format!(" {}", status)))?;
    }
    queue!(stdout, style::Print("\n"))?;

    draw_bits(stdout, byte, cursor.bit)?;
    queue!(stdout, style::Print(format!(" {}", AsciiRepr(byte))))?;

    stdout.flush()?;
    Ok(())
}

/// Clears the last `lines` lines so the next frame lands in the same place.
pub fn erase_lines(stdout: &mut impl Write, lines: usize) -> Result<()> {
    if lines == 0 {
        return Ok(());
    }
    for _ in 1..lines {
        queue!(
            stdout,
            cursor::MoveUp(1),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
    }
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::FromCursorDown),
        style::Print("\r")
    )?;
    stdout.flush()?;
    Ok(())
}

use std::io::{Read, Write};

use crossterm::{queue, style, Result};
use tracing::{debug, info, warn};

use super::render::{draw_frame, draw_help, erase_lines, FRAME_LINES};
use crate::current_buffer::CurrentBuffer;
use crate::cursor::Cursor;
use crate::error;
use crate::keymap::{self, Action, Direction, Key};
use crate::storage::Storage;
use crate::terminal::InputMode;

const SAVED: &str = "SAVED";

/// The edit loop: owns the buffer and the cursor, and redraws the current
/// byte in place after every key.
pub struct BitView<S: Storage> {
    buffer: CurrentBuffer,
    cursor: Cursor,
    storage: S,
    info: Option<String>,
    quitting: bool,
}

impl<S: Storage> BitView<S> {
    pub fn new(buffer: CurrentBuffer, storage: S) -> BitView<S> {
        BitView {
            buffer,
            cursor: Cursor::new(),
            storage,
            info: None,
            quitting: false,
        }
    }

    /// Loads the initial buffer from `storage`.
    pub fn with_storage(mut storage: S) -> error::Result<BitView<S>> {
        let data = storage.load()?;
        Ok(BitView::new(CurrentBuffer::from_data(data), storage))
    }

    pub fn buffer(&self) -> &CurrentBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Status text waiting for the next frame, if any.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn handle_key(&mut self, key: Key) {
        match keymap::key_to_action(key) {
            Some(action) => self.apply(action),
            None => debug!(target: "bitflip.input", ?key, "ignored key"),
        }
    }

    fn apply(&mut self, action: Action) {
        let len = self.buffer.len();
        match action {
            Action::ToggleBit => self.buffer.toggle_bit(self.cursor.byte, self.cursor.bit),
            Action::InsertByte => {
                self.cursor.byte = self.buffer.insert_byte_after(self.cursor.byte);
            }
            Action::DeleteByte => {
                self.buffer.delete_byte(self.cursor.byte);
                self.cursor.clamp(self.buffer.len());
            }
            Action::Save => self.save(),
            Action::Quit => {
                // best effort: a failed save is reported but does not block the quit
                self.save();
                self.quitting = true;
            }
            Action::Move(Direction::Up) => self.cursor.move_up(len),
            Action::Move(Direction::Down) => self.cursor.move_down(len),
            Action::Move(Direction::Left) => self.cursor.move_left(len),
            Action::Move(Direction::Right) => self.cursor.move_right(len),
        }
    }

    fn save(&mut self) {
        match self.storage.persist(self.buffer.as_bytes()) {
            Ok(()) => {
                info!(target: "bitflip.io", len = self.buffer.len(), "saved");
                self.info = Some(SAVED.to_string());
            }
            Err(e) => {
                warn!(target: "bitflip.io", error = %e, "save failed");
                self.info = Some(e.to_string());
            }
        }
    }

    /// Draws one frame; a pending status message is consumed by it.
    pub fn draw(&mut self, stdout: &mut impl Write) -> Result<()> {
        let info = self.info.take();
        draw_frame(stdout, &self.buffer, self.cursor, info.as_deref())
    }

    pub fn run_event_loop(
        mut self,
        stdin: &mut impl Read,
        stdout: &mut impl Write,
        input_mode: InputMode,
    ) -> Result<()> {
        draw_help(stdout)?;

        loop {
            self.draw(stdout)?;
            if self.quitting {
                break;
            }

            let key = {
                let _guard = input_mode.enter(stdout)?;
                keymap::read_key(stdin)?
            };
            self.handle_key(key);

            erase_lines(stdout, FRAME_LINES)?;
        }

        queue!(stdout, style::Print("\n"))?;
        stdout.flush()?;
        info!(target: "bitflip.runtime", len = self.buffer.len(), "session finished");
        Ok(())
    }
}

/// Position inside the buffer: which byte, and which bit of it.
///
/// `bit` counts from the least significant bit (0) up to the most
/// significant (7), even though bytes are drawn MSB first. `byte` is only
/// meaningful while the buffer is non-empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub byte: usize,
    pub bit: u8,
}

pub const MAX_BIT: u8 = 7;

impl Cursor {
    pub fn new() -> Cursor {
        Cursor::default()
    }

    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.byte = self.byte.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.byte = std::cmp::min(self.byte + 1, len - 1);
    }

    /// Toward the most significant bit.
    pub fn move_left(&mut self, len: usize) {
        if len == 0 || self.bit == MAX_BIT {
            return;
        }
        self.bit += 1;
    }

    /// Toward the least significant bit.
    pub fn move_right(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.bit = self.bit.saturating_sub(1);
    }

    /// Pulls `byte` back into `[0, len - 1]` after the buffer changed size.
    pub fn clamp(&mut self, len: usize) {
        self.byte = match len {
            0 => 0,
            _ => std::cmp::min(self.byte, len - 1),
        };
    }
}

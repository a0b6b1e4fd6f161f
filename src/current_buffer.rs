use tracing::debug;

/// The whole file, held in memory for the length of a session.
///
/// Every edit is bounds checked and turns into a no-op when it has nothing
/// to act on, so the controller never has to special-case an empty file
/// beyond picking the cursor position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CurrentBuffer {
    data: Vec<u8>,
}

impl CurrentBuffer {
    pub fn from_data(data: Vec<u8>) -> CurrentBuffer {
        CurrentBuffer { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, byte_index: usize) -> Option<u8> {
        self.data.get(byte_index).copied()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.data.len().checked_sub(1)
    }

    /// Flips bit `bit_index` (0 = least significant) of the byte at `byte_index`.
    pub fn toggle_bit(&mut self, byte_index: usize, bit_index: u8) {
        if let Some(byte) = self.data.get_mut(byte_index) {
            *byte ^= 1 << (bit_index & 7);
            debug!(target: "bitflip.edit", byte_index, bit_index, value = *byte, "toggle_bit");
        }
    }

    /// Inserts a zero byte right after `byte_index` and returns where it landed.
    ///
    /// On an empty buffer the new byte becomes the only element, at index 0.
    pub fn insert_byte_after(&mut self, byte_index: usize) -> usize {
        let at = if self.data.is_empty() {
            0
        } else {
            std::cmp::min(byte_index + 1, self.data.len())
        };
        self.data.insert(at, 0);
        debug!(target: "bitflip.edit", at, len = self.data.len(), "insert_byte");
        at
    }

    pub fn delete_byte(&mut self, byte_index: usize) {
        if byte_index < self.data.len() {
            let removed = self.data.remove(byte_index);
            debug!(target: "bitflip.edit", byte_index, removed, len = self.data.len(), "delete_byte");
        }
    }
}

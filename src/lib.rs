pub mod bit_view;
pub mod current_buffer;
pub mod cursor;
pub mod error;
pub mod keymap;
pub mod storage;
pub mod terminal;

pub use bit_view::BitView;
pub use current_buffer::CurrentBuffer;
pub use cursor::Cursor;
pub use error::BitflipError;
pub use storage::{FileStorage, Storage};
pub use terminal::InputMode;

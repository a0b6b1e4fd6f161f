use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{BitflipError, Result};

/// Where the buffer comes from at startup and goes back to on save.
pub trait Storage {
    fn load(&mut self) -> Result<Vec<u8>>;
    fn persist(&mut self, bytes: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> FileStorage {
        FileStorage { path: path.into() }
    }
}

impl Storage for FileStorage {
    /// Creates the file if it is missing, then reads all of it.
    fn load(&mut self) -> Result<Vec<u8>> {
        // touch; append leaves existing content alone
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(BitflipError::Open)?;

        let mut file = File::open(&self.path).map_err(BitflipError::Open)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(BitflipError::Read)?;

        info!(target: "bitflip.io", path = %self.path.display(), len = data.len(), "loaded");
        Ok(data)
    }

    /// Truncates the file and writes the whole buffer.
    fn persist(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(target: "bitflip.io", path = %self.path.display(), len = bytes.len(), "persisted");
        Ok(())
    }
}

//! Filesystem seam the batch converter is generic over.

use alloc::vec;
use alloc::vec::Vec;

use embedded_io::{ErrorType, Read, ReadExactError, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

pub trait Filesystem: ErrorType {
    type File: File;
    type Directory: Directory;

    fn open_file(&self, path: &str, mode: Mode) -> Result<Self::File, Self::Error>;
    fn open_directory(&self, path: &str) -> Result<Self::Directory, Self::Error>;
    fn open_file_entry(
        &self,
        dir: &Self::Directory,
        entry: &<Self::Directory as Directory>::Entry,
        mode: Mode,
    ) -> Result<Self::File, Self::Error>;
}

/// Entry type listed by a filesystem's directories.
pub type EntryOf<F> = <<F as Filesystem>::Directory as Directory>::Entry;

pub trait Directory: ErrorType {
    type Entry: DirEntry;

    fn list(&self) -> Result<Vec<Self::Entry>, Self::Error>;
}

pub trait DirEntry {
    fn name(&self) -> &str;
    fn is_directory(&self) -> bool;
    fn size(&self) -> usize;
}

pub trait File: Read + Write {
    fn size(&self) -> usize;

    /// Reads the whole file from the current position.
    fn read_to_end(&mut self) -> Result<Vec<u8>, ReadExactError<Self::Error>> {
        let mut data = vec![0u8; self.size()];
        self.read_exact(&mut data)?;
        Ok(data)
    }
}

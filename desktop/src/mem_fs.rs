//! In-memory filesystem with a single directory, for exercising the batch
//! converter without touching disk.

use embedded_io::{ErrorKind, ErrorType};
use framepack_core::fs::{DirEntry, Directory, File, Filesystem, Mode};

#[derive(Clone)]
pub struct MemDirEntry {
    name: String,
    // None for entries that refuse to open
    data: Option<Vec<u8>>,
    is_directory: bool,
}

impl DirEntry for MemDirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }

    fn size(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

pub struct MemFilesystem {
    root: String,
    entries: Vec<MemDirEntry>,
}

impl MemFilesystem {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_owned(),
            entries: Vec::new(),
        }
    }

    pub fn with_file(mut self, name: &str, data: Vec<u8>) -> Self {
        self.entries.push(MemDirEntry {
            name: name.to_owned(),
            data: Some(data),
            is_directory: false,
        });
        self
    }

    pub fn with_unreadable(mut self, name: &str) -> Self {
        self.entries.push(MemDirEntry {
            name: name.to_owned(),
            data: None,
            is_directory: false,
        });
        self
    }

    pub fn with_directory(mut self, name: &str) -> Self {
        self.entries.push(MemDirEntry {
            name: name.to_owned(),
            data: None,
            is_directory: true,
        });
        self
    }
}

impl ErrorType for MemFilesystem {
    type Error = ErrorKind;
}

impl Filesystem for MemFilesystem {
    type File = MemFile;
    type Directory = MemDirectory;

    fn open_file(&self, path: &str, _mode: Mode) -> Result<MemFile, ErrorKind> {
        let name = path
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or(ErrorKind::NotFound)?;
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or(ErrorKind::NotFound)?;
        open(entry)
    }

    fn open_directory(&self, path: &str) -> Result<MemDirectory, ErrorKind> {
        if path != self.root {
            return Err(ErrorKind::NotFound);
        }
        Ok(MemDirectory {
            entries: self.entries.clone(),
        })
    }

    fn open_file_entry(&self, _dir: &MemDirectory, entry: &MemDirEntry, _mode: Mode) -> Result<MemFile, ErrorKind> {
        open(entry)
    }
}

fn open(entry: &MemDirEntry) -> Result<MemFile, ErrorKind> {
    if entry.is_directory {
        return Err(ErrorKind::InvalidInput);
    }
    let data = entry.data.clone().ok_or(ErrorKind::PermissionDenied)?;
    Ok(MemFile { data, pos: 0 })
}

pub struct MemDirectory {
    entries: Vec<MemDirEntry>,
}

impl ErrorType for MemDirectory {
    type Error = ErrorKind;
}

impl Directory for MemDirectory {
    type Entry = MemDirEntry;

    fn list(&self) -> Result<Vec<MemDirEntry>, ErrorKind> {
        Ok(self.entries.clone())
    }
}

pub struct MemFile {
    data: Vec<u8>,
    pos: usize,
}

impl ErrorType for MemFile {
    type Error = ErrorKind;
}

impl embedded_io::Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        let remaining = &self.data[self.pos..];
        let len = remaining.len().min(buf.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.pos += len;
        Ok(len)
    }
}

impl embedded_io::Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
}

impl File for MemFile {
    fn size(&self) -> usize {
        self.data.len()
    }
}

use std::fs;
use std::io::Seek;
use std::path::PathBuf;

use embedded_io::ErrorType;
use framepack_core::fs::{DirEntry, Mode};
use log::debug;

/// The host filesystem, with relative paths resolved against a base directory.
pub struct StdFilesystem {
    base_path: PathBuf,
}

impl StdFilesystem {
    pub fn new_with_base_path(base_path: PathBuf) -> Self {
        debug!("Using StdFilesystem with base path: {:?}", base_path);
        StdFilesystem { base_path }
    }
}

impl ErrorType for StdFilesystem {
    type Error = embedded_io::ErrorKind;
}

type Result<T> = core::result::Result<T, embedded_io::ErrorKind>;

impl framepack_core::fs::Filesystem for StdFilesystem {
    type File = StdFile;
    type Directory = StdDirectory;

    fn open_file(&self, path: &str, mode: Mode) -> Result<StdFile> {
        let path = self.base_path.join(path);
        let options = match mode {
            Mode::Read => fs::OpenOptions::new().read(true).clone(),
            Mode::Write => fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .clone(),
        };
        match options.open(path) {
            Ok(file) => StdFile::new(file).map_err(|err| kind_of(&err)),
            Err(err) => Err(kind_of(&err)),
        }
    }

    fn open_directory(&self, path: &str) -> Result<StdDirectory> {
        debug!("Opening directory at path: {}", path);
        let path = self.base_path.join(path);
        if !path.is_dir() {
            return Err(embedded_io::ErrorKind::NotFound);
        }
        Ok(StdDirectory { path })
    }

    fn open_file_entry(&self, dir: &StdDirectory, entry: &StdDirEntry, mode: Mode) -> Result<StdFile> {
        let path = dir.path.join(entry.name());
        let path = path.to_str().ok_or(embedded_io::ErrorKind::InvalidInput)?;
        self.open_file(path, mode)
    }
}

fn kind_of(err: &std::io::Error) -> embedded_io::ErrorKind {
    embedded_io::Error::kind(err)
}

pub struct StdFile {
    file: std::io::BufReader<std::fs::File>,
    size: usize,
}

impl StdFile {
    pub fn new(mut file: std::fs::File) -> std::io::Result<Self> {
        let size = file.seek(std::io::SeekFrom::End(0))? as usize;
        file.seek(std::io::SeekFrom::Start(0))?;
        Ok(StdFile {
            file: std::io::BufReader::new(file),
            size,
        })
    }
}

impl framepack_core::fs::File for StdFile {
    fn size(&self) -> usize {
        self.size
    }
}

impl ErrorType for StdFile {
    type Error = std::io::Error;
}

impl embedded_io::Read for StdFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::Read;
        self.file.read(buf)
    }
}

impl embedded_io::Write for StdFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        use std::io::Write;
        self.file.get_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        use std::io::Write;
        self.file.get_mut().flush()
    }
}

pub struct StdDirectory {
    pub path: PathBuf,
}

impl ErrorType for StdDirectory {
    type Error = embedded_io::ErrorKind;
}

impl framepack_core::fs::Directory for StdDirectory {
    type Entry = StdDirEntry;

    fn list(&self) -> Result<Vec<Self::Entry>> {
        let mut result = Vec::new();
        for entry in std::fs::read_dir(&self.path).map_err(|err| kind_of(&err))? {
            let dir_entry = entry.map_err(|err| kind_of(&err))?;
            let metadata = dir_entry.metadata().map_err(|err| kind_of(&err))?;
            result.push(StdDirEntry {
                name: dir_entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len() as usize,
                is_directory: metadata.is_dir(),
            });
        }
        Ok(result)
    }
}

pub struct StdDirEntry {
    name: String,
    size: usize,
    is_directory: bool,
}

impl DirEntry for StdDirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framepack_core::fs::{Directory, File, Filesystem};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("framepack-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn lists_and_reads_files() {
        let dir = scratch_dir("list");
        fs::write(dir.join("a.png"), b"abc").unwrap();
        fs::create_dir(dir.join("nested.png")).unwrap();

        let filesystem = StdFilesystem::new_with_base_path(dir.clone());
        let directory = filesystem.open_directory(".").unwrap();
        let mut entries = directory.list().unwrap();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_directory());
        assert_eq!(entries[0].size(), 3);
        assert!(entries[1].is_directory());

        let mut file = filesystem
            .open_file_entry(&directory, &entries[0], Mode::Read)
            .unwrap();
        assert_eq!(file.read_to_end().unwrap(), b"abc");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_not_found() {
        let filesystem = StdFilesystem::new_with_base_path(std::env::temp_dir());
        assert_eq!(
            filesystem.open_directory("framepack-does-not-exist").err(),
            Some(embedded_io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn write_mode_truncates() {
        let dir = scratch_dir("write");
        fs::write(dir.join("out.ino"), b"old contents").unwrap();
        let filesystem = StdFilesystem::new_with_base_path(dir.clone());
        let mut file = filesystem.open_file("out.ino", Mode::Write).unwrap();
        embedded_io::Write::write_all(&mut file, b"new").unwrap();
        drop(file);
        assert_eq!(fs::read(dir.join("out.ino")).unwrap(), b"new");
        fs::remove_dir_all(dir).unwrap();
    }
}

use std::fmt;

use framepack_core::PackError;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a run produced no frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBatchCause {
    /// The directory holds no file with a supported image extension.
    NoEligibleFiles,
    /// Every eligible file failed to load; carries the number of failures.
    AllFailed(usize),
}

impl fmt::Display for EmptyBatchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyBatchCause::NoEligibleFiles => f.write_str("no png, jpg, jpeg, bmp or gif files"),
            EmptyBatchCause::AllFailed(count) => write!(f, "all {count} image files failed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("no frames produced from {path}: {cause}")]
    EmptyBatch {
        path: String,
        cause: EmptyBatchCause,
    },

    #[error("failed to read {path}: {kind:?}")]
    Io {
        path: String,
        kind: embedded_io::ErrorKind,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] PackError),

    #[error("frame batch holds no frame bytes, nothing to emit")]
    NothingToEmit,

    #[error("failed to write {path}: {kind:?}")]
    Write {
        path: String,
        kind: embedded_io::ErrorKind,
    },

    #[error("failed to save preview {path}: {source}")]
    Preview {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl Error {
    pub(crate) fn io(path: &str, error: impl embedded_io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            kind: error.kind(),
        }
    }

    pub(crate) fn read_exact<E: embedded_io::Error>(
        path: &str,
        error: embedded_io::ReadExactError<E>,
    ) -> Self {
        match error {
            embedded_io::ReadExactError::UnexpectedEof => Self::Io {
                path: path.to_owned(),
                kind: embedded_io::ErrorKind::InvalidData,
            },
            embedded_io::ReadExactError::Other(e) => Self::io(path, e),
        }
    }

    /// Whether the error only concerns a single input file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::Decode { .. })
    }
}

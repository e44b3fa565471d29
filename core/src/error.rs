use core::fmt;

/// Precondition violations raised while building pixel buffers and packed frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// Width or height is zero.
    ZeroDimension { width: u32, height: u32 },
    /// A buffer does not hold the number of bytes its dimensions require.
    BufferSize { expected: usize, actual: usize },
    /// A frame added to a batch does not match the size of the frames already in it.
    FrameSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::ZeroDimension { width, height } => {
                write!(f, "frame size {width}x{height} has a zero dimension")
            }
            PackError::BufferSize { expected, actual } => {
                write!(f, "buffer holds {actual} bytes, expected {expected}")
            }
            PackError::FrameSize { expected, actual } => write!(
                f,
                "frame is {}x{}, batch frames are {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl core::error::Error for PackError {}

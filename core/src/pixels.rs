use alloc::vec;
use alloc::vec::Vec;

use crate::error::PackError;

/// Bytes per RGBA sample.
pub const CHANNELS: usize = 4;

/// A width x height grid of RGBA8 samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGBA8 samples. `data` must hold exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PackError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PackError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every sample is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, PackError> {
        check_dimensions(width, height)?;
        let count = width as usize * height as usize;
        let mut data = vec![0u8; count * CHANNELS];
        for px in data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgba);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Sample at (`x`, `y`), or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.data[start..start + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrites the sample at (`x`, `y`). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data[start..start + CHANNELS].copy_from_slice(&rgba);
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), PackError> {
    if width == 0 || height == 0 {
        return Err(PackError::ZeroDimension { width, height });
    }
    Ok(())
}

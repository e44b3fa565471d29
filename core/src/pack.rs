//! Thresholding and MSB-first bit packing.
//!
//! A pixel is "on" when the unweighted mean of its red, green and blue
//! channels is strictly greater than the threshold level. Alpha is ignored.
//! Eight consecutive pixels in row-major order make one byte, the first
//! pixel landing in bit 7.

use alloc::vec;

use log::trace;

use crate::error::PackError;
use crate::frame::PackedFrame;
use crate::pixels::{CHANNELS, PixelBuffer};

/// Classification policy for turning an RGB sample into a single bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    /// Brightness that must be exceeded for a pixel to be on.
    pub level: u8,
    /// Swap on and off after thresholding.
    pub invert: bool,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            level: 128,
            invert: false,
        }
    }
}

impl Threshold {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            invert: false,
        }
    }

    pub fn inverted(self) -> Self {
        Self {
            invert: !self.invert,
            ..self
        }
    }

    /// Whether an RGBA sample maps to bit 1.
    #[inline]
    pub fn is_on(&self, rgba: &[u8]) -> bool {
        // (r + g + b) / 3 > level, kept exact by comparing the sum.
        let sum = rgba[0] as u16 + rgba[1] as u16 + rgba[2] as u16;
        let on = sum > self.level as u16 * 3;
        on != self.invert
    }
}

/// Bytes produced for a width x height frame. Trailing pixels that do not
/// fill a whole byte are dropped.
pub const fn packed_len(width: u32, height: u32) -> usize {
    width as usize * height as usize / 8
}

/// Packs a pixel buffer into a 1-bit frame.
pub fn pack(pixels: &PixelBuffer, threshold: Threshold) -> PackedFrame {
    let width = pixels.width();
    let height = pixels.height();
    trace!(
        "Packing {}x{} pixels (level {}, invert {})",
        width, height, threshold.level, threshold.invert
    );

    let mut data = vec![0u8; packed_len(width, height)];
    // chunks_exact leaves the partial trailing group out.
    for (byte, group) in data
        .iter_mut()
        .zip(pixels.as_bytes().chunks_exact(8 * CHANNELS))
    {
        for (bit, px) in group.chunks_exact(CHANNELS).enumerate() {
            if threshold.is_on(px) {
                *byte |= 0x80 >> bit;
            }
        }
    }
    PackedFrame::from_parts(width, height, data)
}

/// Packs raw RGBA8 samples, validating their length against the dimensions first.
pub fn pack_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    threshold: Threshold,
) -> Result<PackedFrame, PackError> {
    let pixels = PixelBuffer::new(width, height, data.to_vec())?;
    Ok(pack(&pixels, threshold))
}

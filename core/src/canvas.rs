use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

/// A 1-bit drawing surface with the same bit layout as a packed frame.
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Canvas {
    /// A canvas with every pixel off.
    pub fn new(width: u32, height: u32) -> Self {
        let bits = width as usize * height as usize;
        Self {
            width,
            height,
            buffer: vec![0u8; bits.div_ceil(8)],
        }
    }

    pub fn clear_screen(&mut self, color: BinaryColor) {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(fill);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        let byte_index = index / 8;
        let bit_index = 7 - (index % 8);
        match color {
            BinaryColor::On => self.buffer[byte_index] |= 1 << bit_index,
            BinaryColor::Off => self.buffer[byte_index] &= !(1 << bit_index),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> BinaryColor {
        if x >= self.width || y >= self.height {
            return BinaryColor::Off;
        }
        let index = y as usize * self.width as usize + x as usize;
        BinaryColor::from((self.buffer[index / 8] >> (7 - (index % 8))) & 1 == 1)
    }

    /// Expands the canvas to one byte per pixel, `on` for set bits and `off` otherwise.
    pub fn to_luma(&self, on: u8, off: u8) -> Vec<u8> {
        let count = self.width as usize * self.height as usize;
        (0..count)
            .map(|index| {
                if (self.buffer[index / 8] >> (7 - (index % 8))) & 1 == 1 {
                    on
                } else {
                    off
                }
            })
            .collect()
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}

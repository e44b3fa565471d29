use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    Pixel,
    image::ImageDrawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    primitives::Rectangle,
};

use crate::error::PackError;
use crate::pack::packed_len;
use crate::pixels::check_dimensions;

/// One image as 1 bit per pixel, 8 row-major pixels per byte, MSB first.
///
/// Unlike most display bitmap formats rows are not padded to a byte
/// boundary: pixel `i` lives in byte `i / 8`, bit `7 - i % 8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PackedFrame {
    /// Wraps already packed bytes, checking their length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PackError> {
        check_dimensions(width, height)?;
        let expected = packed_len(width, height);
        if data.len() != expected {
            return Err(PackError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(width, height, data))
    }

    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), packed_len(width, height));
        Self {
            width,
            height,
            data,
        }
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

    /// Color of the pixel at (`x`, `y`). `None` outside the frame and for
    /// trailing pixels that were dropped during packing.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        let byte = self.data.get(index / 8)?;
        Some(BinaryColor::from(byte & (0x80u8 >> (index % 8)) != 0))
    }

    /// Every stored pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        let width = self.width as usize;
        (0..self.data.len() * 8).map(move |index| {
            let on = self.data[index / 8] & (0x80 >> (index % 8)) != 0;
            let point = Point::new((index % width) as i32, (index / width) as i32);
            Pixel(point, BinaryColor::from(on))
        })
    }
}

impl OriginDimensions for PackedFrame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl ImageDrawable for PackedFrame {
    type Color = BinaryColor;

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.draw_iter(self.pixels())
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.draw_iter(
            self.pixels()
                .filter(|Pixel(point, _)| area.contains(*point))
                .map(|Pixel(point, color)| Pixel(point - area.top_left, color)),
        )
    }
}

/// A packed frame and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    pub filename: String,
    pub frame: PackedFrame,
}

impl FrameRecord {
    pub fn new(filename: impl Into<String>, frame: PackedFrame) -> Self {
        Self {
            filename: filename.into(),
            frame,
        }
    }
}

/// A file that could not be turned into a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFailure {
    pub filename: String,
    pub message: String,
}

impl FrameFailure {
    pub fn new(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            message: message.into(),
        }
    }
}

/// Frames produced by one conversion run, in playback order, plus the files
/// that were skipped.
///
/// All frames in a batch share the same dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameBatch {
    frames: Vec<FrameRecord>,
    failures: Vec<FrameFailure>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame. Fails if its size differs from the frames already present.
    pub fn push_frame(&mut self, record: FrameRecord) -> Result<(), PackError> {
        let actual = (record.frame.width(), record.frame.height());
        if let Some(expected) = self.frame_size()
            && expected != actual
        {
            return Err(PackError::FrameSize { expected, actual });
        }
        self.frames.push(record);
        Ok(())
    }

    pub fn push_failure(&mut self, failure: FrameFailure) {
        self.failures.push(failure);
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn failures(&self) -> &[FrameFailure] {
        &self.failures
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Width and height shared by every frame, `None` for an empty batch.
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frames
            .first()
            .map(|record| (record.frame.width(), record.frame.height()))
    }

    pub fn bytes_per_frame(&self) -> usize {
        self.frame_size()
            .map(|(width, height)| packed_len(width, height))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_checks_packed_length() {
        assert!(PackedFrame::new(16, 2, vec![0; 4]).is_ok());
        assert_eq!(
            PackedFrame::new(16, 2, vec![0; 3]),
            Err(PackError::BufferSize {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn pixel_reads_msb_first() {
        let frame = PackedFrame::new(4, 2, vec![0b1000_0001]).unwrap();
        assert_eq!(frame.pixel(0, 0), Some(BinaryColor::On));
        assert_eq!(frame.pixel(1, 0), Some(BinaryColor::Off));
        assert_eq!(frame.pixel(3, 1), Some(BinaryColor::On));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn dropped_pixels_are_absent() {
        // 3x3 = 9 pixels, only the first 8 are stored
        let frame = PackedFrame::new(3, 3, vec![0xFF]).unwrap();
        assert_eq!(frame.pixel(1, 2), Some(BinaryColor::On));
        assert_eq!(frame.pixel(2, 2), None);
        assert_eq!(frame.pixels().count(), 8);
    }

    #[test]
    fn pixels_walk_row_major() {
        let frame = PackedFrame::new(8, 2, vec![0x00, 0x01]).unwrap();
        let on: Vec<Point> = frame
            .pixels()
            .filter(|Pixel(_, color)| *color == BinaryColor::On)
            .map(|Pixel(point, _)| point)
            .collect();
        assert_eq!(on, vec![Point::new(7, 1)]);
    }

    #[test]
    fn batch_rejects_mixed_sizes() {
        let mut batch = FrameBatch::new();
        batch
            .push_frame(FrameRecord::new("a.png", PackedFrame::new(8, 8, vec![0; 8]).unwrap()))
            .unwrap();
        let err = batch
            .push_frame(FrameRecord::new("b.png", PackedFrame::new(16, 8, vec![0; 16]).unwrap()))
            .unwrap_err();
        assert_eq!(
            err,
            PackError::FrameSize {
                expected: (8, 8),
                actual: (16, 8)
            }
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.bytes_per_frame(), 8);
    }

    #[test]
    fn empty_batch_has_no_size() {
        let batch = FrameBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.frame_size(), None);
        assert_eq!(batch.bytes_per_frame(), 0);
    }

    #[test]
    fn sub_image_draws_only_the_selected_area() {
        use crate::canvas::Canvas;
        use embedded_graphics::{
            Drawable,
            image::{Image, ImageDrawableExt},
        };

        // left half of row 0 and right half of row 1 lit
        let frame = PackedFrame::new(8, 2, vec![0xF0, 0x0F]).unwrap();
        let area = Rectangle::new(Point::new(4, 0), Size::new(4, 2));
        let mut canvas = Canvas::new(4, 2);
        let Ok(()) = Image::new(&frame.sub_image(&area), Point::zero()).draw(&mut canvas);
        assert_eq!(canvas.as_bytes(), &[0x0F]);
    }
}

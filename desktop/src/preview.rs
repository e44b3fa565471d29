//! Contact sheet of a frame batch, for checking the threshold without hardware.

use std::path::Path;

use embedded_graphics::{
    Drawable,
    image::Image,
    prelude::{OriginDimensions, Point},
};
use framepack_core::{Canvas, FrameBatch};
use log::info;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Frames per row before wrapping.
    pub columns: u32,
    /// Blank pixels between neighbouring frames.
    pub gap: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { columns: 8, gap: 1 }
    }
}

/// Draws every frame of `batch` onto one canvas, left to right, top to bottom.
pub fn render_sheet(batch: &FrameBatch, config: &PreviewConfig) -> Result<Canvas> {
    let (width, height) = batch.frame_size().ok_or(Error::NothingToEmit)?;
    let count = batch.len() as u32;
    let columns = config.columns.clamp(1, count);
    let rows = count.div_ceil(columns);

    let sheet_width = columns * width + (columns - 1) * config.gap;
    let sheet_height = rows * height + (rows - 1) * config.gap;
    let mut canvas = Canvas::new(sheet_width, sheet_height);

    for (index, record) in batch.frames().iter().enumerate() {
        let index = index as u32;
        let x = (index % columns) * (width + config.gap);
        let y = (index / columns) * (height + config.gap);
        let Ok(()) = Image::new(&record.frame, Point::new(x as i32, y as i32)).draw(&mut canvas);
    }
    Ok(canvas)
}

/// Writes the canvas as an 8-bit grayscale image, on pixels white.
pub fn save_sheet(canvas: &Canvas, path: &Path) -> Result<()> {
    let size = canvas.size();
    let luma = canvas.to_luma(255, 0);
    image::save_buffer(path, &luma, size.width, size.height, image::ColorType::L8).map_err(
        |source| Error::Preview {
            path: path.display().to_string(),
            source,
        },
    )?;
    info!("Saved preview ({}x{}) to {}", size.width, size.height, path.display());
    Ok(())
}

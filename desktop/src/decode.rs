//! Decoding and resampling of source images.
//!
//! Images are stretched to exactly the requested size; aspect ratio is not
//! kept.

use std::str::FromStr;

use framepack_core::{PackError, PixelBuffer};
use image::imageops::FilterType;
use log::debug;

use crate::error::{Error, Result};

/// Interpolation used when the source is not already at the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Bilinear.
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub fn repr(self) -> &'static str {
        match self {
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" | "bilinear" => Ok(ResizeFilter::Triangle),
            "catmull-rom" | "catmullrom" | "bicubic" => Ok(ResizeFilter::CatmullRom),
            "gaussian" => Ok(ResizeFilter::Gaussian),
            "lanczos3" | "lanczos" => Ok(ResizeFilter::Lanczos3),
            other => Err(format!(
                "unknown filter '{other}', expected triangle, catmull-rom, gaussian or lanczos3"
            )),
        }
    }
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Decodes `bytes` (PNG, JPEG, BMP or the first frame of a GIF) and
/// resamples the result to `width` x `height` RGBA8.
///
/// `name` only labels errors and log lines.
pub fn resample(
    name: &str,
    bytes: &[u8],
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(PackError::ZeroDimension { width, height }.into());
    }

    let image = image::load_from_memory(bytes).map_err(|source| Error::Decode {
        path: name.to_owned(),
        source,
    })?;

    let rgba = if image.width() == width && image.height() == height {
        debug!("{name}: already {width}x{height}, skipping resize");
        image.into_rgba8()
    } else {
        debug!(
            "{name}: resizing {}x{} to {width}x{height} ({})",
            image.width(),
            image.height(),
            filter.repr()
        );
        image.resize_exact(width, height, filter.into()).into_rgba8()
    };

    Ok(PixelBuffer::new(width, height, rgba.into_raw())?)
}

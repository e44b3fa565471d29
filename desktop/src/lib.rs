//! Host-side tooling: decode and resample images, run a folder through the
//! packer, and emit the result as firmware source.

pub mod batch;
pub mod decode;
pub mod error;
pub mod preview;
pub mod sketch;
pub mod std_fs;

#[cfg(test)]
mod mem_fs;

pub use batch::{BatchOptions, convert_directory, is_image_file};
pub use decode::{ResizeFilter, resample};
pub use error::{EmptyBatchCause, Error, Result};
pub use preview::{PreviewConfig, render_sheet, save_sheet};
pub use sketch::{OutputFormat, SketchConfig, render};
pub use std_fs::StdFilesystem;

//! Runs every image in a directory through decode, resample and pack.

use std::path::Path;

use framepack_core::fs::{DirEntry, Directory, EntryOf, File, Filesystem, Mode};
use framepack_core::{FrameBatch, FrameFailure, FrameRecord, PackError, PackedFrame, Threshold, pack};
use log::{debug, info, warn};

use crate::decode::{ResizeFilter, resample};
use crate::error::{EmptyBatchCause, Error, Result};

/// File extensions picked up from the input directory, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub width: u32,
    pub height: u32,
    pub threshold: Threshold,
    pub filter: ResizeFilter,
}

impl BatchOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            threshold: Threshold::default(),
            filter: ResizeFilter::default(),
        }
    }
}

pub fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Converts every image in `path`, in ascending filename order.
///
/// Files that fail to read or decode are recorded in the batch's failures
/// and skipped. The run fails when the directory is missing, holds no
/// images, or none of its images could be converted.
pub fn convert_directory<F: Filesystem>(
    fs: &F,
    path: &str,
    options: &BatchOptions,
) -> Result<FrameBatch> {
    let BatchOptions { width, height, .. } = *options;
    if width == 0 || height == 0 {
        return Err(PackError::ZeroDimension { width, height }.into());
    }

    let dir = fs
        .open_directory(path)
        .map_err(|_| Error::DirectoryNotFound(path.to_owned()))?;
    let mut entries: Vec<_> = dir
        .list()
        .map_err(|err| Error::io(path, err))?
        .into_iter()
        .filter(|entry| !entry.is_directory() && is_image_file(entry.name()))
        .collect();
    if entries.is_empty() {
        return Err(Error::EmptyBatch {
            path: path.to_owned(),
            cause: EmptyBatchCause::NoEligibleFiles,
        });
    }
    entries.sort_by(|a, b| a.name().cmp(b.name()));

    if (width as usize * height as usize) % 8 != 0 {
        warn!(
            "{width}x{height} is not a multiple of 8 pixels, the last {} pixels of every frame are dropped",
            (width as usize * height as usize) % 8
        );
    }
    info!("Converting {} images from {path} to {width}x{height}", entries.len());

    let mut batch = FrameBatch::new();
    for entry in &entries {
        let name = entry.name();
        match convert_entry(fs, &dir, entry, options) {
            Ok(frame) => {
                debug!("{name}: packed {} bytes", frame.as_bytes().len());
                batch.push_frame(FrameRecord::new(name, frame))?;
            }
            Err(err) if err.is_per_file() => {
                warn!("Skipping {name}: {err}");
                batch.push_failure(FrameFailure::new(name, err.to_string()));
            }
            Err(err) => return Err(err),
        }
    }

    if batch.is_empty() {
        return Err(Error::EmptyBatch {
            path: path.to_owned(),
            cause: EmptyBatchCause::AllFailed(batch.failures().len()),
        });
    }
    info!(
        "Packed {} frames of {} bytes, {} skipped",
        batch.len(),
        batch.bytes_per_frame(),
        batch.failures().len()
    );
    Ok(batch)
}

fn convert_entry<F: Filesystem>(
    fs: &F,
    dir: &F::Directory,
    entry: &EntryOf<F>,
    options: &BatchOptions,
) -> Result<PackedFrame> {
    let name = entry.name();
    let mut file = fs
        .open_file_entry(dir, entry, Mode::Read)
        .map_err(|err| Error::io(name, err))?;
    let bytes = file
        .read_to_end()
        .map_err(|err| Error::read_exact(name, err))?;
    let pixels = resample(name, &bytes, options.width, options.height, options.filter)?;
    Ok(pack(&pixels, options.threshold))
}

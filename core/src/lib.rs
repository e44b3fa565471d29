#![no_std]

pub mod canvas;
pub mod error;
pub mod frame;
pub mod fs;
pub mod pack;
pub mod pixels;

pub use canvas::Canvas;
pub use error::PackError;
pub use frame::{FrameBatch, FrameFailure, FrameRecord, PackedFrame};
pub use pack::{Threshold, pack, pack_rgba, packed_len};
pub use pixels::PixelBuffer;

extern crate alloc;

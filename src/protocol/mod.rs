//! Protocol module - wire format, accumulation, and frame extraction.
//!
//! This module implements the camera's framing protocol:
//! - 28-byte header encoding/decoding and completion arithmetic
//! - Fixed-capacity accumulation buffer with marker resynchronization
//! - Pure extraction of the thermal grid and the padded JPEG payload

mod extract;
mod frame;
mod frame_buffer;
mod wire_format;

pub use extract::{extract_thermal, extract_visible};
pub use frame::{ThermalFrame, VisibleFrame};
pub use frame_buffer::{FrameBuffer, BUFFER_CAPACITY};
pub use wire_format::{
    build_frame, starts_with_magic, FrameHeader, HEADER_SIZE, JPEG_PAD, JPEG_SOI, LINE_OFFSET,
    LINE_STRIDE, MAGIC, THERMAL_HEIGHT, THERMAL_PIXELS, THERMAL_WIDTH,
};

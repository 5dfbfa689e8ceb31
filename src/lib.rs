//! # flirone
//!
//! Userspace frame decoder for the FLIR One Pro LT thermal camera.
//!
//! The camera streams logical frames over a USB bulk endpoint in a
//! proprietary framing: a 28-byte header with a magic marker and three
//! declared sizes, then a raw 16-bit thermal payload and a JPEG
//! visible-light payload back to back. Transfers arrive arbitrarily
//! chunked, so the decoder resynchronizes on the marker, accumulates
//! until the declared sizes are satisfied, and splits each completed
//! frame into an 80×60 thermal grid and a padded JPEG image.
//!
//! ## Architecture
//!
//! - **protocol**: wire format, accumulation buffer, pure extraction
//! - **decoder**: one chunk in, at most one [`DecodedFrame`] out
//! - **transport / sink**: the byte-stream boundaries; the device
//!   itself (USB setup, control transfers) lives outside this crate
//! - **pipeline**: reader → decoder → sinks, one frame at a time
//!
//! ## Example
//!
//! ```ignore
//! use flirone::Pipeline;
//! use flirone::sink::open_video_output;
//! use tokio::fs::File;
//!
//! #[tokio::main]
//! async fn main() -> flirone::error::Result<()> {
//!     let mut pipeline = Pipeline::builder()
//!         .thermal_sink(open_video_output("/dev/video10").await?.into_inner())
//!         .visible_sink(open_video_output("/dev/video11").await?.into_inner())
//!         .build();
//!
//!     pipeline.run(File::open("capture.bin").await?).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod pipeline;
pub mod protocol;
pub mod sink;
pub mod transport;

mod decoder;

pub use decoder::{DecodedFrame, FrameDecoder};
pub use error::FlirOneError;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use protocol::{ThermalFrame, VisibleFrame};

//! Capture pipeline - drives the decoder from a transport reader into
//! the configured sinks.
//!
//! The [`PipelineBuilder`] provides a fluent API for wiring up sinks,
//! and [`Pipeline::run`] owns the single logical thread of control:
//! one transport read, one decoder push, at most one frame written out,
//! then the next read. There is no queueing between the stages; the
//! accumulation buffer's capacity is the only backpressure.
//!
//! # Example
//!
//! ```ignore
//! use flirone::Pipeline;
//! use tokio::fs::File;
//!
//! let mut pipeline = Pipeline::builder()
//!     .thermal_sink(File::create("/dev/video10").await?)
//!     .visible_sink(File::create("/dev/video11").await?)
//!     .build();
//!
//! let capture = File::open("endpoint.bin").await?;
//! let frames = pipeline.run(capture).await?;
//! println!("decoded {frames} frames");
//! ```

use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, warn};

use crate::decoder::FrameDecoder;
use crate::error::Result;
use crate::sink::FrameSink;
use crate::transport::{ChunkReader, DEFAULT_CHUNK_SIZE};

type BoxedSink = FrameSink<Box<dyn AsyncWrite + Send + Unpin>>;

/// Builder for configuring and creating a capture pipeline.
pub struct PipelineBuilder {
    thermal: Option<BoxedSink>,
    visible: Option<BoxedSink>,
    chunk_size: usize,
}

impl PipelineBuilder {
    /// Create a builder with no sinks and the default chunk size.
    pub fn new() -> Self {
        Self {
            thermal: None,
            visible: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Send decoded thermal grids (9600 bytes each) to this writer.
    pub fn thermal_sink<W>(mut self, writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        self.thermal = Some(FrameSink::new(Box::new(writer)));
        self
    }

    /// Send padded JPEG payloads to this writer.
    pub fn visible_sink<W>(mut self, writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        self.visible = Some(FrameSink::new(Box::new(writer)));
        self
    }

    /// Set the transport read size per chunk.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline {
            decoder: FrameDecoder::new(),
            thermal: self.thermal,
            visible: self.visible,
            chunk_size: self.chunk_size,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A configured capture pipeline.
pub struct Pipeline {
    decoder: FrameDecoder,
    thermal: Option<BoxedSink>,
    visible: Option<BoxedSink>,
    chunk_size: usize,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Drive the pipeline until the transport reaches end of stream.
    ///
    /// Timed-out and interrupted reads are routine on a polled endpoint
    /// and are skipped without touching the decoder; any other read
    /// error, and any sink error, ends the run. Returns the total
    /// number of frames decoded by this pipeline.
    pub async fn run<R: AsyncRead + Unpin>(&mut self, reader: R) -> Result<u64> {
        let mut chunks = ChunkReader::with_chunk_size(reader, self.chunk_size);

        loop {
            let frame = match chunks.next_chunk().await {
                Ok(Some(chunk)) => self.decoder.push(chunk),
                Ok(None) => break,
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                    warn!("transport read skipped: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let Some(frame) = frame else { continue };

            if let (Some(sink), Some(thermal)) = (self.thermal.as_mut(), frame.thermal.as_ref()) {
                sink.write_frame(&thermal.to_bytes()).await?;
            }
            if let (Some(sink), Some(visible)) = (self.visible.as_mut(), frame.visible.as_ref()) {
                sink.write_frame(visible.as_bytes()).await?;
            }
        }

        info!(frames = self.decoder.frames_decoded(), "end of stream");
        Ok(self.decoder.frames_decoded())
    }

    /// Frames decoded across all runs of this pipeline.
    pub fn frames_decoded(&self) -> u64 {
        self.decoder.frames_decoded()
    }
}

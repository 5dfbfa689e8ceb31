//! Frame sinks - write-only byte-stream destinations for decoded frames.
//!
//! A sink is anything implementing `AsyncWrite`: a V4L2 loopback device
//! node, a plain file, an in-memory buffer in tests. The core never
//! reads from a sink, and device format negotiation belongs to whatever
//! configured the node, not here.

use std::path::Path;

use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{FlirOneError, Result};

/// Writes one decoded frame's bytes at a time to an async writer.
///
/// Thermal sinks receive exactly 9600 bytes per frame, visible sinks
/// JpgSize + 128; the sink adds no framing of its own.
pub struct FrameSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> FrameSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one frame's bytes in full and flush.
    pub async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.writer.write_all(frame).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Open a video output node (or plain file) for writing as a frame sink.
pub async fn open_video_output(path: impl AsRef<Path>) -> Result<FrameSink<tokio::fs::File>> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await
        .map_err(|source| FlirOneError::Sink {
            path: path.display().to_string(),
            source,
        })?;
    Ok(FrameSink::new(file))
}

//! Transport boundary - chunked reads from the frame endpoint.
//!
//! The decoder does not talk to hardware. Whatever owns the device (a
//! USB polling loop, a capture-file replay, a socket) exposes the frame
//! endpoint as an async byte stream, and [`ChunkReader`] slices it into
//! the bounded chunks the decoder consumes. The device's auxiliary
//! status and file-I/O channels are separate streams and must never be
//! routed through here.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::protocol::BUFFER_CAPACITY;

/// Default read size per chunk. Matches the bulk transfer size the
/// camera typically fills.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Reads bounded chunks from an async byte stream.
///
/// Each `next_chunk` call maps to one transport read: a successful
/// non-empty read yields the chunk, end of stream yields `None`, and a
/// failed read surfaces as the error it is - it carries no bytes and
/// must not touch the decoder.
pub struct ChunkReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> ChunkReader<R> {
    /// Wrap a reader with the default chunk size.
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Wrap a reader with a custom chunk size, clamped to the
    /// accumulation capacity (a larger read could never be buffered).
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buf: vec![0u8; chunk_size.clamp(1, BUFFER_CAPACITY)],
        }
    }

    /// Read the next chunk. `Ok(None)` means end of stream.
    pub async fn next_chunk(&mut self) -> std::io::Result<Option<&[u8]>> {
        let n = self.reader.read(&mut self.buf).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(&self.buf[..n]))
    }

    /// Consume the reader back out.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

//! Frame decoder - turns transport chunks into decoded frames.
//!
//! One [`FrameDecoder`] owns one accumulation buffer and a frame
//! counter; feeding it is strictly sequential, one chunk per transport
//! read. The decode path per chunk:
//!
//! ```text
//! chunk ─► FrameBuffer::append (resync / overflow policy)
//!       ─► FrameHeader::decode   (needs 28 bytes)
//!       ─► FrameHeader::is_complete
//!       ─► extract_thermal + extract_visible ─► DecodedFrame
//!       ─► buffer reset
//! ```
//!
//! Nothing in this path is an error: a chunk that does not complete a
//! frame just leaves the decoder waiting for more input.
//!
//! # Example
//!
//! ```
//! use flirone::FrameDecoder;
//! use flirone::protocol::build_frame;
//!
//! let mut decoder = FrameDecoder::new();
//! let wire = build_frame(&[0u8; 60], &[0xFF, 0xD8, 0, 0]);
//!
//! let frame = decoder.push(&wire).expect("one complete frame");
//! assert!(frame.thermal.is_some());
//! assert!(frame.visible.is_some());
//! ```

use tracing::{debug, warn};

use crate::protocol::{
    extract_thermal, extract_visible, FrameBuffer, FrameHeader, ThermalFrame, VisibleFrame,
    BUFFER_CAPACITY,
};

/// One fully decoded capture cycle.
///
/// Either payload may be absent when the header declared it empty.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// 1-based position in the stream, from the decoder's counter.
    pub index: u64,
    /// Thermal grid, present when ThermalSize > 0.
    pub thermal: Option<ThermalFrame>,
    /// Padded JPEG payload, present when JpgSize > 0.
    pub visible: Option<VisibleFrame>,
}

/// Reassembles and decodes frames from arbitrarily-chunked input.
pub struct FrameDecoder {
    buffer: FrameBuffer,
    frames: u64,
}

impl FrameDecoder {
    /// Create a decoder with an empty accumulation buffer.
    pub fn new() -> Self {
        Self {
            buffer: FrameBuffer::new(),
            frames: 0,
        }
    }

    /// Feed one transport chunk; returns a frame if this chunk
    /// completed one.
    ///
    /// A zero-length chunk is a no-op. Chunks from failed transport
    /// reads must not be passed in at all - the transport loop filters
    /// them before they reach the decoder.
    ///
    /// After an emission the buffer is empty; bytes of a following
    /// frame that rode in the same chunk are dropped and that frame is
    /// recovered by marker resynchronization.
    pub fn push(&mut self, chunk: &[u8]) -> Option<DecodedFrame> {
        if chunk.is_empty() {
            return None;
        }

        self.buffer.append(chunk);

        let header = FrameHeader::decode(self.buffer.filled())?;
        if !header.is_complete(self.buffer.len()) {
            return None;
        }

        self.frames += 1;
        debug!(
            frame = self.frames,
            thermal = header.thermal_size,
            jpeg = header.jpg_size,
            "frame complete"
        );

        let thermal =
            (header.thermal_size > 0).then(|| extract_thermal(self.buffer.slice(0, BUFFER_CAPACITY)));

        let visible = (header.jpg_size > 0).then(|| {
            let frame = extract_visible(self.buffer.slice(0, BUFFER_CAPACITY), &header);
            if !frame.has_soi() {
                warn!(
                    frame = self.frames,
                    "JPEG payload missing start-of-image marker"
                );
            }
            frame
        });

        self.buffer.reset();

        Some(DecodedFrame {
            index: self.frames,
            thermal,
            visible,
        })
    }

    /// Frames emitted so far.
    pub fn frames_decoded(&self) -> u64 {
        self.frames
    }

    /// Bytes currently accumulated toward the next frame.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial accumulation, keeping the frame counter.
    pub fn reset(&mut self) {
        self.buffer.reset();
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

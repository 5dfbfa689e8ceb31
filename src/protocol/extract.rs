//! Payload extraction from an accumulated frame.
//!
//! Both extractors are pure: they read the accumulation buffer's storage
//! and return owned frame values. Writing the results anywhere is the
//! pipeline's job, which keeps this logic testable against synthetic
//! buffers.

use bytes::Bytes;

use super::frame::{ThermalFrame, VisibleFrame};
use super::wire_format::{
    FrameHeader, JPEG_PAD, LINE_OFFSET, LINE_STRIDE, THERMAL_HEIGHT, THERMAL_PIXELS, THERMAL_WIDTH,
};

/// Decode the 80×60 thermal grid from an accumulated frame.
///
/// `storage` is the accumulation buffer's full backing store, header
/// included. Sensor rows sit at a pitch of [`LINE_STRIDE`] 16-bit words
/// with [`LINE_OFFSET`] bytes ahead of each row's pixels, so the sample
/// for output pixel `(x, y)` is the little-endian 16-bit value at byte
/// offset `2 * (y * 82 + x) + 32`.
///
/// Offsets are bounds-checked against `storage` and out-of-range
/// samples are skipped, left at zero. The completion gate normally
/// guarantees every offset is in range; the check only matters for
/// storage shorter than a full sensor readout.
pub fn extract_thermal(storage: &[u8]) -> ThermalFrame {
    let mut samples = vec![0u16; THERMAL_PIXELS];

    for y in 0..THERMAL_HEIGHT {
        for x in 0..THERMAL_WIDTH {
            let idx = 2 * (y * LINE_STRIDE + x) + LINE_OFFSET;
            if idx + 1 >= storage.len() {
                continue;
            }
            // Columns at or past the stride boundary would take an
            // extra 4-byte skip; an 80-column grid never reaches them.
            samples[y * THERMAL_WIDTH + x] = storage[idx] as u16 + 256 * storage[idx + 1] as u16;
        }
    }

    ThermalFrame::from_samples(samples)
}

/// Slice the JPEG payload out of an accumulated frame and pad it.
///
/// The payload begins at `28 + ThermalSize` and spans `JpgSize` bytes;
/// the output is always `JpgSize + 128` bytes, the tail zeroed. Any part
/// of the declared span that falls outside `storage` is zeroed too
/// rather than faulting.
///
/// The JPEG start-of-image marker is not validated here; callers check
/// [`VisibleFrame::has_soi`] and decide how loudly to complain.
pub fn extract_visible(storage: &[u8], header: &FrameHeader) -> VisibleFrame {
    let jpeg_len = header.jpg_size as usize;
    let start = header.jpeg_offset().min(storage.len());
    let end = header.jpeg_offset().saturating_add(jpeg_len).min(storage.len());

    let mut data = Vec::with_capacity(jpeg_len + JPEG_PAD);
    data.extend_from_slice(&storage[start..end]);
    data.resize(jpeg_len + JPEG_PAD, 0);

    VisibleFrame::from_padded(Bytes::from(data), jpeg_len)
}

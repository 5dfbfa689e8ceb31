//! Synthesize - generate a synthetic endpoint capture for testing.
//!
//! Writes a capture file of well-formed frames with a moving thermal
//! gradient and a stub JPEG payload, suitable as input for the `replay`
//! example when no camera hardware is around.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example synthesize -- capture.bin [frame_count]
//! ```

use flirone::protocol::{
    build_frame, JPEG_SOI, LINE_OFFSET, LINE_STRIDE, THERMAL_HEIGHT, THERMAL_WIDTH,
};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

/// A full sensor readout with a diagonal gradient shifted by `phase`.
fn thermal_payload(phase: usize) -> Vec<u8> {
    let mut payload = vec![0u8; THERMAL_HEIGHT * LINE_STRIDE * 2];
    for y in 0..THERMAL_HEIGHT {
        for x in 0..THERMAL_WIDTH {
            let value = (40 * (x + y + phase) % 65536) as u16;
            let idx = 2 * (y * LINE_STRIDE + x) + (LINE_OFFSET - 28);
            payload[idx..idx + 2].copy_from_slice(&value.to_le_bytes());
        }
    }
    payload
}

/// A stub JPEG payload: valid start-of-image marker, filler body.
fn jpeg_payload(len: usize) -> Vec<u8> {
    let mut jpeg = JPEG_SOI.to_vec();
    jpeg.resize(len, 0x20);
    jpeg
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let out_path = args.next().ok_or("usage: synthesize <capture> [frame_count]")?;
    let frame_count: usize = args.next().as_deref().unwrap_or("30").parse()?;

    let mut out = File::create(&out_path).await?;
    for n in 0..frame_count {
        let wire = build_frame(&thermal_payload(n), &jpeg_payload(2048));
        out.write_all(&wire).await?;
    }
    out.flush().await?;

    println!("wrote {frame_count} frames to {out_path}");
    Ok(())
}

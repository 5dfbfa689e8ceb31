//! Replay - decode a recorded endpoint capture into video sinks.
//!
//! Reads a raw dump of the camera's frame endpoint and writes decoded
//! thermal frames (16-bit raw) and visible frames (MJPEG) to the given
//! outputs, which can be V4L2 loopback nodes or plain files.
//!
//! A flat dump loses the original transfer boundaries, and the decoder
//! discards whatever trails a completed frame inside one chunk. The
//! replay therefore splits the dump at each frame marker so every frame
//! opens its own chunk, the way live transfers do.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example replay -- capture.bin [thermal_out] [visible_out]
//!
//! # e.g. into loopback devices set up for 80x60 Y16 and 640x480 MJPEG:
//! cargo run --example replay -- capture.bin /dev/video10 /dev/video11
//! ```
//!
//! Defaults: `thermal.raw` and `visible.mjpg` in the working directory.
//! Set `RUST_LOG=flirone=debug` to see per-frame logging.

use flirone::protocol::MAGIC;
use flirone::sink::open_video_output;
use flirone::FrameDecoder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let capture_path = args
        .next()
        .ok_or("usage: replay <capture> [thermal_out] [visible_out]")?;
    let thermal_path = args.next().unwrap_or_else(|| "thermal.raw".to_string());
    let visible_path = args.next().unwrap_or_else(|| "visible.mjpg".to_string());

    let data = tokio::fs::read(&capture_path).await?;

    let mut starts: Vec<usize> = (0..data.len().saturating_sub(MAGIC.len() - 1))
        .filter(|&i| data[i..i + MAGIC.len()] == MAGIC)
        .collect();
    if starts.is_empty() {
        return Err(format!("no frame markers in {capture_path}").into());
    }
    starts.push(data.len());

    let mut thermal = open_video_output(&thermal_path).await?;
    let mut visible = open_video_output(&visible_path).await?;
    let mut decoder = FrameDecoder::new();

    for pair in starts.windows(2) {
        let Some(frame) = decoder.push(&data[pair[0]..pair[1]]) else {
            continue;
        };
        if let Some(t) = &frame.thermal {
            thermal.write_frame(&t.to_bytes()).await?;
        }
        if let Some(v) = &frame.visible {
            visible.write_frame(v.as_bytes()).await?;
        }
    }

    println!(
        "decoded {} frames from {capture_path}",
        decoder.frames_decoded()
    );
    println!("thermal -> {thermal_path}, visible -> {visible_path}");
    Ok(())
}

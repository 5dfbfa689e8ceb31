//! Stream - run the live pipeline over stdin.
//!
//! Expects the camera's frame endpoint on stdin, one bulk transfer per
//! write (a pipe from the process that owns the USB device preserves
//! those boundaries at this cadence), and pumps decoded frames into the
//! two video sinks until the stream ends.
//!
//! # Usage
//!
//! ```bash
//! flirone-endpoint-dump | cargo run --example stream -- /dev/video10 /dev/video11
//! ```

use flirone::sink::open_video_output;
use flirone::Pipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let thermal_path = args.next().unwrap_or_else(|| "/dev/video10".to_string());
    let visible_path = args.next().unwrap_or_else(|| "/dev/video11".to_string());

    let mut pipeline = Pipeline::builder()
        .thermal_sink(open_video_output(&thermal_path).await?.into_inner())
        .visible_sink(open_video_output(&visible_path).await?.into_inner())
        .build();

    let frames = pipeline.run(tokio::io::stdin()).await?;
    println!("stream ended after {frames} frames");
    Ok(())
}

//! Integration tests for flirone.
//!
//! These tests drive the full pipeline over in-memory transports and
//! sinks, verifying the end-to-end path from raw endpoint bytes to sink
//! output. The scripted transport mirrors the real device: each bulk
//! transfer arrives as its own read, and a frame never straddles into
//! the transfer of the next one.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use flirone::protocol::{build_frame, LINE_OFFSET, LINE_STRIDE, THERMAL_HEIGHT, THERMAL_WIDTH};
use flirone::{FrameDecoder, Pipeline};
use tokio::io::{AsyncRead, AsyncWriteExt, ReadBuf};

/// In-memory transport that yields one scripted transfer per read.
struct ScriptedTransport {
    transfers: VecDeque<Vec<u8>>,
}

impl ScriptedTransport {
    fn new(transfers: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            transfers: transfers.into_iter().collect(),
        }
    }
}

impl AsyncRead for ScriptedTransport {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let this = self.get_mut();
        if let Some(mut transfer) = this.transfers.pop_front() {
            if transfer.len() > buf.remaining() {
                let rest = transfer.split_off(buf.remaining());
                this.transfers.push_front(rest);
            }
            buf.put_slice(&transfer);
        }
        Poll::Ready(Ok(()))
    }
}

/// A full-size thermal payload whose decoded sample at `(x, y)` is
/// `y * 1000 + x`.
fn thermal_payload() -> Vec<u8> {
    let mut payload = vec![0u8; THERMAL_HEIGHT * LINE_STRIDE * 2];
    for y in 0..THERMAL_HEIGHT {
        for x in 0..THERMAL_WIDTH {
            let value = (y * 1000 + x) as u16;
            let idx = 2 * (y * LINE_STRIDE + x) + (LINE_OFFSET - 28);
            payload[idx] = (value & 0xFF) as u8;
            payload[idx + 1] = (value >> 8) as u8;
        }
    }
    payload
}

fn jpeg_payload(len: usize) -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend((0..len.saturating_sub(2)).map(|i| (i * 7 % 199) as u8));
    jpeg
}

/// Run a pipeline over scripted transfers with in-memory sinks;
/// returns (frame count, thermal sink bytes, visible sink bytes).
async fn run_transfers(
    transfers: impl IntoIterator<Item = Vec<u8>>,
) -> (u64, Vec<u8>, Vec<u8>) {
    let (thermal_wr, mut thermal_rd) = tokio::io::duplex(16 * 1024 * 1024);
    let (visible_wr, mut visible_rd) = tokio::io::duplex(16 * 1024 * 1024);

    let mut pipeline = Pipeline::builder()
        .thermal_sink(thermal_wr)
        .visible_sink(visible_wr)
        .build();

    let frames = pipeline
        .run(ScriptedTransport::new(transfers))
        .await
        .unwrap();
    drop(pipeline); // closes the sink write halves

    let mut thermal_out = Vec::new();
    let mut visible_out = Vec::new();
    tokio::io::AsyncReadExt::read_to_end(&mut thermal_rd, &mut thermal_out)
        .await
        .unwrap();
    tokio::io::AsyncReadExt::read_to_end(&mut visible_rd, &mut visible_out)
        .await
        .unwrap();

    (frames, thermal_out, visible_out)
}

/// Full pipeline: one frame in, sink contracts observed on the way out.
#[tokio::test]
async fn test_pipeline_single_frame_sink_contracts() {
    let jpeg = jpeg_payload(750);
    let wire = build_frame(&thermal_payload(), &jpeg);

    let (frames, thermal_out, visible_out) = run_transfers([wire]).await;

    assert_eq!(frames, 1);

    // Thermal sink: exactly 9600 bytes, row-major LE samples.
    assert_eq!(thermal_out.len(), 9600);
    let sample = |x: usize, y: usize| {
        let i = 2 * (y * THERMAL_WIDTH + x);
        u16::from_le_bytes([thermal_out[i], thermal_out[i + 1]])
    };
    assert_eq!(sample(0, 0), 0);
    assert_eq!(sample(79, 0), 79);
    assert_eq!(sample(0, 59), 59000);
    assert_eq!(sample(79, 59), 59079);

    // Visible sink: JPEG bytes then 128 zero bytes, nothing more.
    assert_eq!(visible_out.len(), 750 + 128);
    assert_eq!(&visible_out[..750], &jpeg[..]);
    assert!(visible_out[750..].iter().all(|&b| b == 0));
}

/// The same frame split into smaller transfers decodes identically to
/// one big transfer.
#[tokio::test]
async fn test_pipeline_output_independent_of_transfer_size() {
    let wire = build_frame(&thermal_payload(), &jpeg_payload(200));

    let (frames_big, thermal_big, visible_big) = run_transfers([wire.clone()]).await;
    assert_eq!(frames_big, 1);

    for transfer_size in [512, 4096] {
        let transfers: Vec<Vec<u8>> = wire.chunks(transfer_size).map(<[u8]>::to_vec).collect();
        let (frames, thermal_out, visible_out) = run_transfers(transfers).await;

        assert_eq!(frames, 1, "transfer size {transfer_size}");
        assert_eq!(thermal_out, thermal_big, "transfer size {transfer_size}");
        assert_eq!(visible_out, visible_big, "transfer size {transfer_size}");
    }
}

/// Noise before the first marker (a mid-stream attach) is discarded and
/// the following frames decode normally.
#[tokio::test]
async fn test_pipeline_mid_stream_attach() {
    let transfers = vec![
        vec![0x5Au8; 3000], // tail of a frame we missed
        build_frame(&thermal_payload(), &jpeg_payload(300)),
        build_frame(&thermal_payload(), &jpeg_payload(400)),
    ];

    let (frames, thermal_out, visible_out) = run_transfers(transfers).await;

    assert_eq!(frames, 2);
    assert_eq!(thermal_out.len(), 2 * 9600);
    assert_eq!(visible_out.len(), (300 + 128) + (400 + 128));
}

/// Several frames, each fragmented across its own transfers, arrive in
/// order.
#[tokio::test]
async fn test_pipeline_multi_frame_fragmented() {
    let mut transfers = Vec::new();
    for n in 0..4usize {
        let wire = build_frame(&thermal_payload(), &jpeg_payload(100 + n));
        for piece in wire.chunks(2048) {
            transfers.push(piece.to_vec());
        }
    }

    let (frames, thermal_out, visible_out) = run_transfers(transfers).await;

    assert_eq!(frames, 4);
    assert_eq!(thermal_out.len(), 4 * 9600);
    let expected_visible: usize = (0..4).map(|n| 100 + n + 128).sum();
    assert_eq!(visible_out.len(), expected_visible);
}

/// A thermal-only stream never touches the visible sink.
#[tokio::test]
async fn test_pipeline_thermal_only_stream() {
    let transfers = vec![
        build_frame(&thermal_payload(), &[]),
        build_frame(&thermal_payload(), &[]),
    ];

    let (frames, thermal_out, visible_out) = run_transfers(transfers).await;

    assert_eq!(frames, 2);
    assert_eq!(thermal_out.len(), 2 * 9600);
    assert!(visible_out.is_empty());
}

/// Decoder and hand-fed chunks agree with the pipeline on the same
/// bytes: the pipeline adds I/O, not semantics.
#[tokio::test]
async fn test_pipeline_matches_bare_decoder() {
    let wire = build_frame(&thermal_payload(), &jpeg_payload(96));

    let mut decoder = FrameDecoder::new();
    let decoded = decoder.push(&wire).expect("complete frame");

    let (frames, thermal_out, visible_out) = run_transfers([wire]).await;
    assert_eq!(frames, 1);
    assert_eq!(decoded.thermal.unwrap().to_bytes(), thermal_out);
    assert_eq!(decoded.visible.unwrap().as_bytes(), &visible_out[..]);
}

/// A sink that fails mid-run surfaces the error to the caller.
#[tokio::test]
async fn test_pipeline_sink_failure_ends_run() {
    let (thermal_wr, thermal_rd) = tokio::io::duplex(1024);
    drop(thermal_rd); // writes will fail once the pipe is gone

    let mut pipeline = Pipeline::builder().thermal_sink(thermal_wr).build();

    let wire = build_frame(&thermal_payload(), &[]);
    let result = pipeline.run(ScriptedTransport::new([wire])).await;
    assert!(result.is_err());
}

/// Replayed captures work from real files end to end, with reads sized
/// to the recorded transfer length.
#[tokio::test]
async fn test_pipeline_from_capture_file() {
    let dir = std::env::temp_dir();
    let capture_path = dir.join("flirone-capture-test.bin");

    let wire = build_frame(&thermal_payload(), &jpeg_payload(128));
    let mut capture = tokio::fs::File::create(&capture_path).await.unwrap();
    for _ in 0..3 {
        capture.write_all(&wire).await.unwrap();
    }
    capture.flush().await.unwrap();
    drop(capture);

    let reader = tokio::fs::File::open(&capture_path).await.unwrap();
    let mut pipeline = Pipeline::builder().chunk_size(wire.len()).build();
    let frames = pipeline.run(reader).await.unwrap();
    assert_eq!(frames, 3);

    let _ = tokio::fs::remove_file(&capture_path).await;
}

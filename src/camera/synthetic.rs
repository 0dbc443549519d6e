//! Synthetic frame source
//!
//! Generates a moving test pattern so the server can be developed and
//! tested on machines without camera hardware.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};

use super::frame::RawFrame;
use super::source::{CameraError, FrameSource};

/// Deterministic test-pattern source
///
/// `capture` renders a horizontally scrolling RGB gradient; each call
/// advances the pattern by one step, so consecutive frames differ and
/// motion is visible in a viewer.
///
/// `encode` wraps a luma-subsampled copy of the pattern in JPEG start and
/// end markers. The output has the right shape for the wire format
/// (opaque bytes with an exact length) but is not a decodable image; real
/// deployments plug in a hardware-backed [`FrameSource`].
pub struct SyntheticSource {
    width: u32,
    height: u32,
    frame_counter: AtomicU64,
}

impl SyntheticSource {
    /// Create a source with the given frame dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame_counter: AtomicU64::new(0),
        }
    }

    /// Number of frames captured so far
    pub fn frames_captured(&self) -> u64 {
        self.frame_counter.load(Ordering::Relaxed)
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

#[async_trait]
impl FrameSource for SyntheticSource {
    async fn capture(&self) -> Result<RawFrame, CameraError> {
        let step = self.frame_counter.fetch_add(1, Ordering::Relaxed);

        let w = self.width as usize;
        let h = self.height as usize;
        let mut pixels = BytesMut::with_capacity(w * h * 3);

        for y in 0..h {
            for x in 0..w {
                let shifted = (x + step as usize) % w;
                pixels.put_u8((shifted * 255 / w) as u8);
                pixels.put_u8((y * 255 / h) as u8);
                pixels.put_u8(((shifted + y) % 256) as u8);
            }
        }

        Ok(RawFrame::new(self.width, self.height, pixels.freeze()))
    }

    fn encode(&self, frame: &RawFrame, quality: u8) -> Result<Bytes, CameraError> {
        if quality == 0 || quality > 100 {
            return Err(CameraError::Encode(format!(
                "quality out of range: {}",
                quality
            )));
        }

        // Subsample the green channel; higher quality keeps more samples,
        // roughly mimicking how quality drives real JPEG output size.
        let stride = (3 * (101 - quality as usize)).max(3);

        let mut buf = BytesMut::with_capacity(frame.pixels.len() / stride + 16);
        buf.put_slice(&[0xFF, 0xD8]); // SOI
        buf.put_slice(&[0xFF, 0xFE]); // COM segment with frame dimensions
        let comment = format!("{}x{}", frame.width, frame.height);
        buf.put_u16((comment.len() + 2) as u16);
        buf.put_slice(comment.as_bytes());
        for chunk in frame.pixels.chunks(stride) {
            buf.put_u8(chunk[1.min(chunk.len() - 1)]);
        }
        buf.put_slice(&[0xFF, 0xD9]); // EOI

        Ok(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_advances_pattern() {
        let source = SyntheticSource::new(32, 16);

        let a = source.capture().await.unwrap();
        let b = source.capture().await.unwrap();

        assert_eq!(a.pixels.len(), 32 * 16 * 3);
        assert_ne!(a.pixels, b.pixels);
        assert_eq!(source.frames_captured(), 2);
    }

    #[tokio::test]
    async fn test_encode_is_jpeg_framed() {
        let source = SyntheticSource::new(32, 16);
        let frame = source.capture().await.unwrap();

        let jpeg = source.encode(&frame, 80).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[tokio::test]
    async fn test_encode_quality_scales_size() {
        let source = SyntheticSource::new(64, 32);
        let frame = source.capture().await.unwrap();

        let low = source.encode(&frame, 10).unwrap();
        let high = source.encode(&frame, 95).unwrap();
        assert!(high.len() > low.len());
    }

    #[tokio::test]
    async fn test_encode_rejects_bad_quality() {
        let source = SyntheticSource::new(8, 8);
        let frame = source.capture().await.unwrap();

        assert!(source.encode(&frame, 0).is_err());
        assert!(source.encode(&frame, 101).is_err());
    }
}

//! Raw frame type

use bytes::Bytes;

/// One uncompressed frame from the video source
///
/// Pixels are tightly packed RGB888, row-major. The buffer is
/// reference-counted so cloning a frame does not copy pixel data.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Packed RGB888 pixel data, `width * height * 3` bytes
    pub pixels: Bytes,
}

impl RawFrame {
    /// Create a frame from packed RGB888 data
    pub fn new(width: u32, height: u32, pixels: Bytes) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize) * 3);
        Self {
            width,
            height,
            pixels,
        }
    }
}

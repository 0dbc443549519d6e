//! MJPEG multipart wire format
//!
//! A stream is a continuous sequence of parts, each a boundary marker,
//! `Content-Type` and `Content-Length` headers, a blank line, the encoded
//! bytes, and a trailing line break. Viewers depend on this byte layout
//! exactly, so it is centralized here and covered by a bit-exact test.

use bytes::{BufMut, Bytes, BytesMut};

/// Boundary token announced in the response `Content-Type`
pub const BOUNDARY: &str = "frame";

/// `Content-Type` for the streaming response
pub const CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

/// Encode one encoded image as a stream part
///
/// `Content-Length` is the exact encoded byte count.
pub fn encode_part(jpeg: &Bytes) -> Bytes {
    let mut buf = BytesMut::with_capacity(jpeg.len() + 80);

    buf.put_slice(b"--frame\r\nContent-Type: image/jpeg\r\nContent-Length: ");
    buf.put_slice(jpeg.len().to_string().as_bytes());
    buf.put_slice(b"\r\n\r\n");
    buf.put_slice(jpeg);
    buf.put_slice(b"\r\n");

    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_layout_is_bit_exact() {
        let jpeg = Bytes::from_static(&[0xFF, 0xD8, 0xAB, 0xFF, 0xD9]);
        let part = encode_part(&jpeg);

        let expected: &[u8] =
            b"--frame\r\nContent-Type: image/jpeg\r\nContent-Length: 5\r\n\r\n\xFF\xD8\xAB\xFF\xD9\r\n";
        assert_eq!(&part[..], expected);
    }

    #[test]
    fn test_content_length_matches_payload() {
        let jpeg = Bytes::from(vec![0u8; 1234]);
        let part = encode_part(&jpeg);

        let text = String::from_utf8_lossy(&part[..64]);
        assert!(text.contains("Content-Length: 1234\r\n"));
    }

    #[test]
    fn test_boundary_matches_content_type() {
        assert!(CONTENT_TYPE.ends_with(&format!("boundary={}", BOUNDARY)));
    }
}

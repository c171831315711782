//! Raw capture buffers and their normalization to the canonical image
//!
//! A [`FrameBuffer`] is the untouched result of exactly one capture call:
//! BGRA bytes as the OS produced them, possibly with per-row padding
//! (`bytes_per_row > width * 4`). It lives only long enough to be normalized
//! into an [`image::RgbaImage`] and is consumed by value.
//!
//! Normalization does two things, nothing more:
//!
//! - strips row padding, copying exactly `width * 4` bytes per row,
//! - applies the fixed BGRA to RGBA byte permutation.
//!
//! There is no color-space conversion, no gamma correction and no change to
//! premultiplication.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Raw pixel data from a single capture call, before normalization
#[derive(Debug)]
pub(crate) struct FrameBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    bytes_per_row: u32,
}

impl FrameBuffer {
    /// Wraps a platform buffer, validating its declared geometry
    ///
    /// Fails with [`Error::CaptureFailed`] when the stride is smaller than a
    /// packed row or the buffer cannot hold `height` rows; a silently
    /// truncated image is never produced.
    pub(crate) fn new(data: Vec<u8>, width: u32, height: u32, bytes_per_row: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::CaptureFailed(format!(
                "degenerate capture buffer {width}x{height}"
            )));
        }
        if bytes_per_row < width * 4 {
            return Err(Error::CaptureFailed(format!(
                "row stride {bytes_per_row} smaller than packed row {}",
                width * 4
            )));
        }
        // The final row only needs the packed pixels, not the padding.
        let min_len = (height as usize - 1) * bytes_per_row as usize + width as usize * 4;
        if data.len() < min_len {
            return Err(Error::CaptureFailed(format!(
                "capture buffer holds {} bytes, {min_len} required for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            bytes_per_row,
        })
    }

    /// Converts the BGRA source into the canonical top-down RGBA image
    pub(crate) fn into_rgba_image(self) -> Result<RgbaImage> {
        let width = self.width as usize;
        let height = self.height as usize;
        let stride = self.bytes_per_row as usize;
        let row_bytes = width * 4;

        let mut out = vec![0u8; row_bytes * height];
        for row in 0..height {
            let src = &self.data[row * stride..row * stride + row_bytes];
            let dst = &mut out[row * row_bytes..(row + 1) * row_bytes];
            for (src_px, dst_px) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
                dst_px[0] = src_px[2];
                dst_px[1] = src_px[1];
                dst_px[2] = src_px[0];
                dst_px[3] = src_px[3];
            }
        }

        RgbaImage::from_raw(self.width, self.height, out)
            .ok_or_else(|| Error::CaptureFailed("normalized buffer has wrong length".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a BGRA buffer where every pixel of row `r` carries `r` in all
    /// four channels, with `pad` bytes of arbitrary padding per row.
    fn row_indexed_buffer(width: u32, height: u32, pad: u32) -> Vec<u8> {
        let stride = (width * 4 + pad) as usize;
        let mut data = vec![0xAB; stride * height as usize];
        for row in 0..height as usize {
            for b in &mut data[row * stride..row * stride + width as usize * 4] {
                *b = row as u8;
            }
        }
        data
    }

    #[test]
    fn test_channel_permutation() {
        // Source pixel (b, g, r, a) must come out as (r, g, b, a).
        let data = vec![0x11, 0x22, 0x33, 0x44];
        let frame = FrameBuffer::new(data, 1, 1, 4).unwrap();
        let img = frame.into_rgba_image().unwrap();
        assert_eq!(img.into_raw(), vec![0x33, 0x22, 0x11, 0x44]);
    }

    #[test]
    fn test_row_stride_stripping() {
        let width = 5;
        let height = 4;
        for pad in [0u32, 4, 12, 100] {
            let data = row_indexed_buffer(width, height, pad);
            let frame = FrameBuffer::new(data, width, height, width * 4 + pad).unwrap();
            let img = frame.into_rgba_image().unwrap();
            let raw = img.into_raw();
            assert_eq!(raw.len(), (width * height * 4) as usize);
            for row in 0..height as usize {
                let row_bytes = &raw[row * width as usize * 4..(row + 1) * width as usize * 4];
                assert!(
                    row_bytes.iter().all(|&b| b == row as u8),
                    "row {row} corrupted with padding {pad}"
                );
            }
        }
    }

    #[test]
    fn test_padded_and_packed_strides_agree() {
        let width = 7;
        let height = 3;
        let packed = row_indexed_buffer(width, height, 0);
        let padded = row_indexed_buffer(width, height, 9);

        let a = FrameBuffer::new(packed, width, height, width * 4)
            .unwrap()
            .into_rgba_image()
            .unwrap();
        let b = FrameBuffer::new(padded, width, height, width * 4 + 9)
            .unwrap()
            .into_rgba_image()
            .unwrap();
        assert_eq!(a.into_raw(), b.into_raw());
    }

    #[test]
    fn test_full_screen_solid_color() {
        // A solid-red 1920x1080 BGRA frame normalizes to all-red RGBA.
        let (width, height) = (1920u32, 1080u32);
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[0, 0, 255, 255]);
        }
        let img = FrameBuffer::new(data, width, height, width * 4)
            .unwrap()
            .into_rgba_image()
            .unwrap();
        assert_eq!(img.dimensions(), (width, height));
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_rejects_short_stride() {
        let err = FrameBuffer::new(vec![0; 64], 4, 4, 12).unwrap_err();
        assert!(matches!(err, Error::CaptureFailed(_)));
    }

    #[test]
    fn test_rejects_truncated_buffer() {
        let err = FrameBuffer::new(vec![0; 10], 4, 4, 16).unwrap_err();
        assert!(matches!(err, Error::CaptureFailed(_)));
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(FrameBuffer::new(vec![], 0, 4, 0).is_err());
        assert!(FrameBuffer::new(vec![], 4, 0, 16).is_err());
    }

    #[test]
    fn test_last_row_may_omit_padding() {
        // Stride 12 with a 2x2 image: the final row only needs 8 bytes.
        let mut data = vec![1u8; 12 + 8];
        for px in data.chunks_exact_mut(4).take(5) {
            px.copy_from_slice(&[9, 8, 7, 6]);
        }
        let frame = FrameBuffer::new(data, 2, 2, 12).unwrap();
        let img = frame.into_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (2, 2));
    }
}

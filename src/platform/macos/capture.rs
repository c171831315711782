//! Still-frame capture via CGDisplayCreateImage and CGWindowListCreateImage
//!
//! CoreGraphics hands back BGRA little-endian images with an arbitrary row
//! stride; the shared normalizer strips the stride and reorders the
//! channels. Window captures use nominal resolution so the image matches
//! the point-space bounds reported at enumeration time, and ignore framing
//! so the shadow is not included.

use core_graphics::display::CGDisplay;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use core_graphics::image::CGImage;
use core_graphics::window::{
    create_image, kCGWindowImageBoundsIgnoreFraming, kCGWindowImageNominalResolution,
    kCGWindowListOptionIncludingWindow,
};
use image::RgbaImage;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;
use crate::model::{MonitorInfo, WindowInfo};

pub(crate) fn capture_monitor(info: &MonitorInfo) -> Result<RgbaImage> {
    super::ensure_capture_access()?;

    let display = CGDisplay::new(info.handle as u32);
    let image = display
        .image()
        .ok_or_else(|| Error::CaptureFailed("CGDisplayCreateImage returned null".to_string()))?;
    normalize(image)
}

pub(crate) fn capture_window(info: &WindowInfo) -> Result<RgbaImage> {
    super::ensure_capture_access()?;

    // A null rect asks for the window's own bounds, re-read by the OS at
    // capture time.
    let null_rect = CGRect::new(
        &CGPoint::new(f64::INFINITY, f64::INFINITY),
        &CGSize::new(0.0, 0.0),
    );
    let image = create_image(
        null_rect,
        kCGWindowListOptionIncludingWindow,
        info.handle as u32,
        kCGWindowImageBoundsIgnoreFraming | kCGWindowImageNominalResolution,
    )
    .ok_or_else(|| {
        Error::CaptureFailed("CGWindowListCreateImage returned null; the window may be gone".to_string())
    })?;
    normalize(image)
}

fn normalize(image: CGImage) -> Result<RgbaImage> {
    if image.bits_per_pixel() != 32 {
        return Err(Error::CaptureFailed(format!(
            "unexpected pixel depth {} bits",
            image.bits_per_pixel()
        )));
    }
    let width = image.width() as u32;
    let height = image.height() as u32;
    let bytes_per_row = image.bytes_per_row() as u32;
    let data = image.data();

    FrameBuffer::new(data.bytes().to_vec(), width, height, bytes_per_row)?.into_rgba_image()
}

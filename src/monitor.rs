//! Monitor enumeration and capture facade

use image::RgbaImage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Bounds, MonitorInfo};
use crate::platform;

/// One display attached to the system
///
/// A `Monitor` is a snapshot taken by [`Monitor::all`]; its metadata does
/// not track later display changes. Capture always reflects the screen at
/// the moment [`Monitor::capture_image`] is called.
#[derive(Debug, Clone)]
pub struct Monitor {
    info: MonitorInfo,
}

impl Monitor {
    pub(crate) fn new(info: MonitorInfo) -> Self {
        Self { info }
    }

    /// Enumerates all attached displays
    ///
    /// Fails with [`Error::NoMonitors`] when the query succeeds but finds
    /// nothing (headless session, locked remote desktop).
    pub fn all() -> Result<Vec<Monitor>> {
        let infos = platform::list_monitors()?;
        let monitors = platform::require_monitors(infos)?;
        debug!(count = monitors.len(), "enumerated monitors");
        Ok(monitors.into_iter().map(Monitor::new).collect())
    }

    /// Opaque platform identifier; stable for the life of the process only
    pub fn id(&self) -> isize {
        self.info.handle
    }

    /// Human-readable name (device path on Windows, display label on macOS)
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Left edge in virtual-desktop coordinates; may be negative
    pub fn x(&self) -> i32 {
        self.info.x
    }

    /// Top edge in virtual-desktop coordinates; may be negative
    pub fn y(&self) -> i32 {
        self.info.y
    }

    /// Width in virtual-desktop units; never zero
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Height in virtual-desktop units; never zero
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Rotation in degrees (0, 90, 180 or 270); 0 when unknown
    pub fn rotation(&self) -> f32 {
        self.info.rotation
    }

    /// Captured pixels per virtual-desktop unit; 1.0 when unknown
    pub fn scale_factor(&self) -> f32 {
        self.info.scale_factor
    }

    /// Refresh rate in Hz; 0 when unknown
    pub fn frequency(&self) -> f32 {
        self.info.frequency
    }

    /// Whether this is the primary display
    pub fn is_primary(&self) -> bool {
        self.info.is_primary
    }

    /// Whether the display is built into the machine; false when unknown
    pub fn is_builtin(&self) -> bool {
        self.info.is_builtin
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.info.bounds()
    }

    /// Captures the current content of this display
    ///
    /// Returns a top-down RGBA image. On high-density displays the image is
    /// larger than [`width`](Self::width) x [`height`](Self::height) by
    /// [`scale_factor`](Self::scale_factor).
    pub fn capture_image(&self) -> Result<RgbaImage> {
        platform::capture_monitor(&self.info)
    }

    /// Captures a sub-region of this display
    ///
    /// `x` and `y` are relative to the monitor's own top-left corner, in the
    /// same units as the descriptor; the crop scales with the captured image
    /// on high-density displays. Fails with [`Error::InvalidRegion`] when
    /// the region is empty or extends past the monitor edge.
    pub fn capture_region(&self, x: u32, y: u32, width: u32, height: u32) -> Result<RgbaImage> {
        validate_region(x, y, width, height, self.info.width, self.info.height)?;
        let full = self.capture_image()?;
        let (x, y, width, height) = project_region(
            (x, y, width, height),
            (self.info.width, self.info.height),
            full.dimensions(),
        );
        Ok(image::imageops::crop_imm(&full, x, y, width, height).to_image())
    }
}

/// Maps a region given in descriptor units onto the captured image
///
/// The two agree except on high-density displays, where the image carries
/// `scale_factor` times more pixels per descriptor unit. The projected
/// region is clamped so it never leaves the image.
fn project_region(
    (x, y, width, height): (u32, u32, u32, u32),
    descriptor: (u32, u32),
    image: (u32, u32),
) -> (u32, u32, u32, u32) {
    if descriptor == image {
        return (x, y, width, height);
    }
    let scale_x = f64::from(image.0) / f64::from(descriptor.0);
    let scale_y = f64::from(image.1) / f64::from(descriptor.1);
    let px = ((f64::from(x) * scale_x).round() as u32).min(image.0.saturating_sub(1));
    let py = ((f64::from(y) * scale_y).round() as u32).min(image.1.saturating_sub(1));
    let pw = ((f64::from(width) * scale_x).round() as u32).clamp(1, image.0 - px);
    let ph = ((f64::from(height) * scale_y).round() as u32).clamp(1, image.1 - py);
    (px, py, pw, ph)
}

/// Checks a requested sub-region against the source dimensions
fn validate_region(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    source_width: u32,
    source_height: u32,
) -> Result<()> {
    let fits = width > 0
        && height > 0
        && x.checked_add(width).is_some_and(|right| right <= source_width)
        && y.checked_add(height).is_some_and(|bottom| bottom <= source_height);
    if fits {
        Ok(())
    } else {
        Err(Error::InvalidRegion {
            x,
            y,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_within_bounds_is_accepted() {
        assert!(validate_region(0, 0, 1920, 1080, 1920, 1080).is_ok());
        assert!(validate_region(100, 200, 300, 400, 1920, 1080).is_ok());
        assert!(validate_region(1919, 1079, 1, 1, 1920, 1080).is_ok());
    }

    #[test]
    fn test_empty_region_is_rejected() {
        assert!(matches!(
            validate_region(0, 0, 0, 100, 1920, 1080),
            Err(Error::InvalidRegion { .. })
        ));
        assert!(matches!(
            validate_region(0, 0, 100, 0, 1920, 1080),
            Err(Error::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_region_past_edge_is_rejected() {
        assert!(validate_region(1920, 0, 1, 1, 1920, 1080).is_err());
        assert!(validate_region(0, 1080, 1, 1, 1920, 1080).is_err());
        assert!(validate_region(1000, 0, 921, 100, 1920, 1080).is_err());
    }

    #[test]
    fn test_region_overflow_is_rejected() {
        assert!(validate_region(u32::MAX, 0, 2, 2, 1920, 1080).is_err());
        assert!(validate_region(0, u32::MAX, 2, 2, 1920, 1080).is_err());
    }

    #[test]
    fn test_project_region_identity_when_spaces_match() {
        let region = (10, 20, 300, 400);
        assert_eq!(project_region(region, (1920, 1080), (1920, 1080)), region);
    }

    #[test]
    fn test_project_region_scales_onto_dense_image() {
        // 1440x900 descriptor captured at 2x density.
        assert_eq!(
            project_region((100, 50, 64, 48), (1440, 900), (2880, 1800)),
            (200, 100, 128, 96)
        );
    }

    #[test]
    fn test_project_region_clamps_to_image_edge() {
        // Rounding at the far edge must not push the crop out of the image.
        let (x, y, w, h) = project_region((1439, 899, 1, 1), (1440, 900), (2880, 1800));
        assert!(x + w <= 2880);
        assert!(y + h <= 1800);
        assert!(w >= 1 && h >= 1);
    }
}

//! Descriptor types shared by every platform backend
//!
//! `MonitorInfo` and `WindowInfo` are plain value snapshots taken at
//! enumeration time. The `handle` field is a passive identifier (an
//! `HMONITOR`/`HWND` on Windows, a display or window number on macOS); it is
//! never reference counted here and is only handed back to the platform
//! layer for a later capture call. Best-effort fields default
//! deterministically: numeric metadata to `0` (or `1.0` for the scale
//! factor), strings to empty, state flags to `false`.

use serde::{Deserialize, Serialize};

/// A rectangle in virtual-desktop coordinates
///
/// The origin may be negative (secondary monitors left of or above the
/// primary one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area shared between two rectangles, in pixels
    ///
    /// Used to decide which monitor a window "belongs" to: the one that
    /// contains the largest fraction of the window.
    pub fn overlap_area(&self, other: &Bounds) -> u64 {
        let left = self.x.max(other.x) as i64;
        let top = self.y.max(other.y) as i64;
        let right = (self.x as i64 + self.width as i64).min(other.x as i64 + other.width as i64);
        let bottom = (self.y as i64 + self.height as i64).min(other.y as i64 + other.height as i64);

        if right <= left || bottom <= top {
            return 0;
        }
        (right - left) as u64 * (bottom - top) as u64
    }
}

/// Snapshot of one physical or logical display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorInfo {
    /// Opaque platform handle; stable for the life of the process only
    pub handle: isize,
    /// Human-readable name (device path on Windows, display label on macOS)
    pub name: String,
    /// Left edge in virtual-desktop coordinates
    pub x: i32,
    /// Top edge in virtual-desktop coordinates
    pub y: i32,
    /// Width in virtual-desktop units; enumeration never returns zero
    pub width: u32,
    /// Height in virtual-desktop units; enumeration never returns zero
    pub height: u32,
    /// Rotation in degrees (0, 90, 180 or 270); 0 when unknown
    pub rotation: f32,
    /// Captured pixels per virtual-desktop unit; 1.0 when unknown
    pub scale_factor: f32,
    /// Refresh rate in Hz; 0 when unknown
    pub frequency: f32,
    /// Whether this is the primary display
    pub is_primary: bool,
    /// Whether the display is built into the machine; false when unknown
    pub is_builtin: bool,
}

impl MonitorInfo {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Snapshot of one capturable application window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Opaque platform handle; stable for the life of the process only
    pub handle: isize,
    /// Owning process id
    pub pid: u32,
    /// Process display name; empty when it could not be read
    pub app_name: String,
    /// Window title; empty when it could not be read
    pub title: String,
    /// Left edge in virtual-desktop coordinates
    pub x: i32,
    /// Top edge in virtual-desktop coordinates
    pub y: i32,
    /// Front-to-back stacking index at enumeration time; 0 is frontmost
    pub z: i32,
    /// Width in virtual-desktop units; enumeration never returns zero
    pub width: u32,
    /// Height in virtual-desktop units; enumeration never returns zero
    pub height: u32,
    /// Best-effort state flags; false when the platform cannot tell
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub is_focused: bool,
}

impl WindowInfo {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

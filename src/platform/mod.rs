//! Platform backend dispatch
//!
//! Exactly one backend is compiled in. Each backend exposes the same four
//! free functions; the facade layer never touches platform types directly.

use crate::error::{Error, Result};
use crate::model::{MonitorInfo, WindowInfo};
use image::RgbaImage;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
use windows as backend;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
use macos as backend;

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
mod unsupported;
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
use unsupported as backend;

pub(crate) fn list_monitors() -> Result<Vec<MonitorInfo>> {
    backend::list_monitors()
}

pub(crate) fn list_windows(exclude_current_process: bool) -> Result<Vec<WindowInfo>> {
    backend::list_windows(exclude_current_process)
}

pub(crate) fn capture_monitor(info: &MonitorInfo) -> Result<RgbaImage> {
    backend::capture_monitor(info)
}

pub(crate) fn capture_window(info: &WindowInfo) -> Result<RgbaImage> {
    backend::capture_window(info)
}

/// Maps a successful but empty monitor enumeration to [`Error::NoMonitors`]
pub(crate) fn require_monitors(monitors: Vec<MonitorInfo>) -> Result<Vec<MonitorInfo>> {
    if monitors.is_empty() {
        return Err(Error::NoMonitors);
    }
    Ok(monitors)
}

/// Maps a successful but empty window enumeration to [`Error::NoWindows`]
///
/// Only the Windows backend applies this; on macOS an empty list is a valid
/// result (nothing on screen passes the filter in a fresh login session).
#[cfg(any(target_os = "windows", test))]
pub(crate) fn require_windows(windows: Vec<WindowInfo>) -> Result<Vec<WindowInfo>> {
    if windows.is_empty() {
        return Err(Error::NoWindows);
    }
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> MonitorInfo {
        MonitorInfo {
            handle: 1,
            name: "display".to_string(),
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            rotation: 0.0,
            scale_factor: 1.0,
            frequency: 60.0,
            is_primary: true,
            is_builtin: false,
        }
    }

    #[test]
    fn test_require_monitors_empty_is_error() {
        assert!(matches!(require_monitors(vec![]), Err(Error::NoMonitors)));
    }

    #[test]
    fn test_require_monitors_passes_through() {
        let monitors = require_monitors(vec![monitor()]).unwrap();
        assert_eq!(monitors.len(), 1);
    }

    #[test]
    fn test_require_windows_empty_is_error() {
        assert!(matches!(require_windows(vec![]), Err(Error::NoWindows)));
    }
}

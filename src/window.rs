//! Window enumeration and capture facade

use image::RgbaImage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Bounds, WindowInfo};
use crate::monitor::Monitor;
use crate::platform;

/// One capturable application window
///
/// A `Window` is a snapshot taken by [`Window::all`]; its metadata does not
/// track later moves or resizes, but [`Window::capture_image`] re-reads the
/// live geometry so the captured frame matches the window as it is at call
/// time.
#[derive(Debug, Clone)]
pub struct Window {
    info: WindowInfo,
}

impl Window {
    pub(crate) fn new(info: WindowInfo) -> Self {
        Self { info }
    }

    /// Enumerates capturable windows, including the calling process's own
    pub fn all() -> Result<Vec<Window>> {
        Self::all_with_options(false)
    }

    /// Enumerates capturable windows
    ///
    /// With `exclude_current_process` set, windows owned by the calling
    /// process are dropped; a screenshot tool rarely wants itself in the
    /// list, and capturing one's own window can deadlock some capture
    /// paths.
    pub fn all_with_options(exclude_current_process: bool) -> Result<Vec<Window>> {
        let infos = platform::list_windows(exclude_current_process)?;
        debug!(count = infos.len(), "enumerated windows");
        Ok(infos.into_iter().map(Window::new).collect())
    }

    /// Opaque platform identifier; stable for the life of the process only
    pub fn id(&self) -> isize {
        self.info.handle
    }

    /// Owning process id
    pub fn pid(&self) -> u32 {
        self.info.pid
    }

    /// Process display name; empty when it could not be read
    pub fn app_name(&self) -> &str {
        &self.info.app_name
    }

    /// Window title; empty when it could not be read
    pub fn title(&self) -> &str {
        &self.info.title
    }

    /// Left edge in virtual-desktop coordinates; may be negative
    pub fn x(&self) -> i32 {
        self.info.x
    }

    /// Top edge in virtual-desktop coordinates; may be negative
    pub fn y(&self) -> i32 {
        self.info.y
    }

    /// Front-to-back stacking index at enumeration time; 0 is the frontmost
    /// window in the list
    pub fn z(&self) -> i32 {
        self.info.z
    }

    /// Width in virtual-desktop units; never zero
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Height in virtual-desktop units; never zero
    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn is_minimized(&self) -> bool {
        self.info.is_minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.info.is_maximized
    }

    pub fn is_focused(&self) -> bool {
        self.info.is_focused
    }

    /// The monitor showing the largest part of this window
    ///
    /// Falls back to the primary monitor (or the first one) when the window
    /// does not overlap any display, for example after being dragged
    /// off-screen.
    pub fn current_monitor(&self) -> Result<Monitor> {
        let monitors = Monitor::all()?;
        let index = best_monitor_index(self.info.bounds(), &monitor_bounds(&monitors));
        let fallback = monitors.iter().position(Monitor::is_primary).unwrap_or(0);
        let index = index.unwrap_or(fallback);
        // Monitor::all never returns an empty list.
        monitors.into_iter().nth(index).ok_or(Error::NoMonitors)
    }

    /// Captures the current content of this window
    ///
    /// The window's geometry is re-read at capture time, so the image may
    /// have different dimensions than [`width`](Self::width) and
    /// [`height`](Self::height) if the window was resized since enumeration.
    pub fn capture_image(&self) -> Result<RgbaImage> {
        platform::capture_window(&self.info)
    }
}

fn monitor_bounds(monitors: &[Monitor]) -> Vec<Bounds> {
    monitors.iter().map(Monitor::bounds).collect()
}

/// Index of the monitor with the largest overlap, or `None` when the window
/// overlaps no monitor at all
fn best_monitor_index(window: Bounds, monitors: &[Bounds]) -> Option<usize> {
    monitors
        .iter()
        .enumerate()
        .map(|(i, m)| (i, m.overlap_area(&window)))
        .filter(|&(_, area)| area > 0)
        .max_by_key(|&(_, area)| area)
        .map(|(i, _)| i)
}

//! macOS backend: CoreGraphics
//!
//! Enumeration reads the active display list and the on-screen window list;
//! capture goes through `CGDisplayCreateImage` and `CGWindowListCreateImage`.
//! Capture requires the user's screen-recording consent; the preflight check
//! turns a silent all-black or empty result into an explicit permission
//! error.

use core_graphics::access::ScreenCaptureAccess;

mod capture;
mod monitor;
mod window;

pub(crate) use capture::{capture_monitor, capture_window};
pub(crate) use monitor::list_monitors;
pub(crate) use window::list_windows;

use crate::error::{Error, Result};

fn ensure_capture_access() -> Result<()> {
    if ScreenCaptureAccess::default().preflight() {
        Ok(())
    } else {
        Err(Error::PermissionDenied)
    }
}

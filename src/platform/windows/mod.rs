//! Windows backend: GDI and DWM
//!
//! Enumeration walks the native handle lists (`EnumDisplayMonitors`,
//! `EnumWindows`); capture copies pixels through a memory device context and
//! reads them back with `GetDIBits`. The process is switched to per-monitor
//! DPI awareness once, before the first native call, so rectangle
//! coordinates and capture dimensions agree in physical pixels.

use std::sync::Once;

use windows_sys::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

mod capture;
mod monitor;
mod util;
mod window;

pub(crate) use capture::{capture_monitor, capture_window};
pub(crate) use monitor::list_monitors;
pub(crate) use window::list_windows;

/// Opts the process into per-monitor DPI awareness, once
///
/// Fails silently when the process already fixed its awareness (manifest or
/// an earlier call); coordinates are then whatever the host chose.
fn ensure_dpi_awareness() {
    static INIT: Once = Once::new();
    INIT.call_once(|| unsafe {
        SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    });
}

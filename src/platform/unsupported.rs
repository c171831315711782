//! Stub backend for platforms without a native implementation
//!
//! Keeps the crate compiling everywhere; every operation reports
//! [`Error::NotSupported`].

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::model::{MonitorInfo, WindowInfo};

pub(crate) fn list_monitors() -> Result<Vec<MonitorInfo>> {
    Err(Error::NotSupported)
}

pub(crate) fn list_windows(_exclude_current_process: bool) -> Result<Vec<WindowInfo>> {
    Err(Error::NotSupported)
}

pub(crate) fn capture_monitor(_info: &MonitorInfo) -> Result<RgbaImage> {
    Err(Error::NotSupported)
}

pub(crate) fn capture_window(_info: &WindowInfo) -> Result<RgbaImage> {
    Err(Error::NotSupported)
}

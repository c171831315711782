//! Display enumeration via `EnumDisplayMonitors`

use std::mem;
use std::ptr;

use tracing::warn;
use windows_sys::Win32::Foundation::{BOOL, LPARAM, RECT, TRUE};
use windows_sys::Win32::Graphics::Gdi::{
    DEVMODEW, DMDO_90, DMDO_180, DMDO_270, ENUM_CURRENT_SETTINGS, EnumDisplayMonitors,
    EnumDisplaySettingsW, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW, MONITORINFOF_PRIMARY,
};
use windows_sys::Win32::UI::HiDpi::{GetDpiForMonitor, MDT_EFFECTIVE_DPI};

use super::util::wide_to_string;
use crate::error::{Error, Result};
use crate::model::MonitorInfo;

const BASE_DPI: f32 = 96.0;

unsafe extern "system" fn collect_monitor(
    handle: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let handles = unsafe { &mut *(data as *mut Vec<HMONITOR>) };
    handles.push(handle);
    TRUE
}

pub(crate) fn list_monitors() -> Result<Vec<MonitorInfo>> {
    super::ensure_dpi_awareness();

    let mut handles: Vec<HMONITOR> = Vec::new();
    let ok = unsafe {
        EnumDisplayMonitors(
            ptr::null_mut(),
            ptr::null(),
            Some(collect_monitor),
            &mut handles as *mut Vec<HMONITOR> as LPARAM,
        )
    };
    if ok == 0 {
        return Err(Error::PlatformQuery("EnumDisplayMonitors failed".to_string()));
    }

    let mut monitors = Vec::with_capacity(handles.len());
    for handle in handles {
        match describe_monitor(handle) {
            Some(info) => monitors.push(info),
            // A display can detach between enumeration and the info query.
            None => warn!(handle = handle as isize, "skipping unreadable monitor"),
        }
    }
    Ok(monitors)
}

fn describe_monitor(handle: HMONITOR) -> Option<MonitorInfo> {
    let mut info: MONITORINFOEXW = unsafe { mem::zeroed() };
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;
    let ok = unsafe { GetMonitorInfoW(handle, (&mut info as *mut MONITORINFOEXW).cast()) };
    if ok == 0 {
        return None;
    }

    let rect = info.monitorInfo.rcMonitor;
    let width = rect.right - rect.left;
    let height = rect.bottom - rect.top;
    if width <= 0 || height <= 0 {
        return None;
    }

    let (rotation, frequency) = display_settings(&info.szDevice);

    Some(MonitorInfo {
        handle: handle as isize,
        name: wide_to_string(&info.szDevice),
        x: rect.left,
        y: rect.top,
        width: width as u32,
        height: height as u32,
        rotation,
        scale_factor: scale_factor(handle),
        frequency,
        is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        // GDI does not say whether a panel is internal.
        is_builtin: false,
    })
}

/// Current rotation and refresh rate of a display device
///
/// Best effort: `(0.0, 0.0)` when the mode query fails. Frequency values of
/// 0 and 1 mean "hardware default" and are reported as unknown.
fn display_settings(device: &[u16; 32]) -> (f32, f32) {
    let mut devmode: DEVMODEW = unsafe { mem::zeroed() };
    devmode.dmSize = mem::size_of::<DEVMODEW>() as u16;
    let ok = unsafe { EnumDisplaySettingsW(device.as_ptr(), ENUM_CURRENT_SETTINGS, &mut devmode) };
    if ok == 0 {
        return (0.0, 0.0);
    }

    let orientation = unsafe { devmode.Anonymous1.Anonymous2.dmDisplayOrientation };
    let rotation = match orientation {
        DMDO_90 => 90.0,
        DMDO_180 => 180.0,
        DMDO_270 => 270.0,
        _ => 0.0,
    };
    let frequency = if devmode.dmDisplayFrequency > 1 {
        devmode.dmDisplayFrequency as f32
    } else {
        0.0
    };
    (rotation, frequency)
}

fn scale_factor(handle: HMONITOR) -> f32 {
    let mut dpi_x = 0u32;
    let mut dpi_y = 0u32;
    let hr = unsafe { GetDpiForMonitor(handle, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) };
    if hr == 0 && dpi_x > 0 {
        dpi_x as f32 / BASE_DPI
    } else {
        1.0
    }
}

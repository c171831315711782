//! Window enumeration via `EnumWindows`
//!
//! The callback gathers raw facts about each top-level window into a
//! [`WindowCandidate`] and defers the keep/drop decision to the shared
//! filter. `EnumWindows` walks in z order, topmost first, so the index of a
//! kept window doubles as its z value.

use std::ffi::c_void;
use std::mem;
use std::ptr;

use windows_sys::Win32::Foundation::{BOOL, CloseHandle, FALSE, HWND, LPARAM, RECT, TRUE};
use windows_sys::Win32::Graphics::Dwm::{
    DWMWA_CLOAKED, DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute,
};
use windows_sys::Win32::System::ProcessStatus::GetModuleBaseNameW;
use windows_sys::Win32::System::Threading::{
    GetCurrentProcessId, OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GWL_EXSTYLE, GetClassNameW, GetForegroundWindow, GetWindowLongW, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindowVisible,
    IsZoomed, WS_EX_NOREDIRECTIONBITMAP, WS_EX_TOOLWINDOW,
};

use super::util::wide_to_string;
use crate::error::{Error, Result};
use crate::filter::{FilterPolicy, WindowCandidate, should_include};
use crate::model::WindowInfo;
use crate::platform::require_windows;

/// Taskbars are tool windows but users expect to capture them; the listed
/// classes are shell surfaces that are never real windows.
const POLICY: FilterPolicy = FilterPolicy {
    tool_window_allowlist: &["Shell_TrayWnd", "Shell_SecondaryTrayWnd"],
    placeholder_kinds: &["Progman", "Button", "Windows.UI.Core.CoreWindow"],
};

struct EnumState {
    exclude_pid: Option<u32>,
    foreground: HWND,
    windows: Vec<WindowInfo>,
}

pub(crate) fn list_windows(exclude_current_process: bool) -> Result<Vec<WindowInfo>> {
    super::ensure_dpi_awareness();

    let mut state = EnumState {
        exclude_pid: exclude_current_process.then(|| unsafe { GetCurrentProcessId() }),
        foreground: unsafe { GetForegroundWindow() },
        windows: Vec::new(),
    };
    let ok = unsafe { EnumWindows(Some(collect_window), &mut state as *mut EnumState as LPARAM) };
    if ok == 0 {
        return Err(Error::PlatformQuery("EnumWindows failed".to_string()));
    }
    require_windows(state.windows)
}

unsafe extern "system" fn collect_window(hwnd: HWND, data: LPARAM) -> BOOL {
    let state = unsafe { &mut *(data as *mut EnumState) };

    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, &mut pid) };
    let ex_style = unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) } as u32;
    let rect = window_rect(hwnd);

    let candidate = WindowCandidate {
        visible: unsafe { IsWindowVisible(hwnd) } != 0,
        cloaked: is_cloaked(hwnd),
        pid,
        tool_window: ex_style & WS_EX_TOOLWINDOW != 0,
        never_redirected: ex_style & WS_EX_NOREDIRECTIONBITMAP != 0,
        kind: class_name(hwnd),
        width: rect.right - rect.left,
        height: rect.bottom - rect.top,
    };
    if !should_include(&candidate, state.exclude_pid, &POLICY) {
        return TRUE;
    }

    state.windows.push(WindowInfo {
        handle: hwnd as isize,
        pid,
        app_name: process_name(pid),
        title: window_title(hwnd),
        x: rect.left,
        y: rect.top,
        z: state.windows.len() as i32,
        width: candidate.width as u32,
        height: candidate.height as u32,
        is_minimized: unsafe { IsIconic(hwnd) } != 0,
        is_maximized: unsafe { IsZoomed(hwnd) } != 0,
        is_focused: hwnd == state.foreground,
    });
    TRUE
}

/// Window rectangle in virtual-desktop coordinates
///
/// Prefers the DWM extended frame bounds, which exclude the invisible
/// resize borders that `GetWindowRect` includes on Windows 10+.
fn window_rect(hwnd: HWND) -> RECT {
    let mut rect: RECT = unsafe { mem::zeroed() };
    let hr = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut rect as *mut RECT as *mut c_void,
            mem::size_of::<RECT>() as u32,
        )
    };
    if hr != 0 {
        unsafe { GetWindowRect(hwnd, &mut rect) };
    }
    rect
}

fn is_cloaked(hwnd: HWND) -> bool {
    let mut cloaked = 0u32;
    let hr = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut u32 as *mut c_void,
            mem::size_of::<u32>() as u32,
        )
    };
    hr == 0 && cloaked != 0
}

fn class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, buf.as_mut_ptr(), buf.len() as i32) };
    if len <= 0 {
        return String::new();
    }
    wide_to_string(&buf[..len as usize])
}

fn window_title(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u16; len as usize + 1];
    let copied = unsafe { GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32) };
    if copied <= 0 {
        return String::new();
    }
    wide_to_string(&buf[..copied as usize])
}

/// Executable base name of the owning process; empty when unreadable
/// (elevated or protected processes deny the query)
fn process_name(pid: u32) -> String {
    unsafe {
        let process = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, FALSE, pid);
        if process.is_null() {
            return String::new();
        }
        let mut buf = [0u16; 260];
        let len = GetModuleBaseNameW(process, ptr::null_mut(), buf.as_mut_ptr(), buf.len() as u32);
        CloseHandle(process);
        wide_to_string(&buf[..len as usize])
    }
}

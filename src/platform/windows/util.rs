//! Small Win32 helpers shared by the enumeration and capture paths

use std::mem;
use std::sync::OnceLock;

use windows_sys::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};
use windows_sys::Win32::System::SystemInformation::OSVERSIONINFOW;

/// Converts a nul-terminated UTF-16 buffer into a `String`
///
/// Stops at the first nul; lossy for unpaired surrogates.
pub(super) fn wide_to_string(buf: &[u16]) -> String {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..end])
}

type RtlGetVersionFn = unsafe extern "system" fn(*mut OSVERSIONINFOW) -> i32;

/// Reads the true OS version as `(major, minor)`
///
/// Goes through `RtlGetVersion` because `GetVersionExW` lies to
/// non-manifested processes. Returns `(0, 0)` when the lookup fails.
pub(super) fn os_version() -> (u32, u32) {
    static VERSION: OnceLock<(u32, u32)> = OnceLock::new();
    *VERSION.get_or_init(|| {
        let ntdll: Vec<u16> = "ntdll.dll".encode_utf16().chain(Some(0)).collect();
        unsafe {
            let module = GetModuleHandleW(ntdll.as_ptr());
            if module.is_null() {
                return (0, 0);
            }
            let Some(proc) = GetProcAddress(module, c"RtlGetVersion".as_ptr().cast()) else {
                return (0, 0);
            };
            let rtl_get_version: RtlGetVersionFn = mem::transmute(proc);
            let mut info: OSVERSIONINFOW = mem::zeroed();
            info.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOW>() as u32;
            if rtl_get_version(&mut info) != 0 {
                return (0, 0);
            }
            (info.dwMajorVersion, info.dwMinorVersion)
        }
    })
}

/// Whether `PrintWindow` understands the full-content flag (Windows 8+)
pub(super) fn supports_full_content_print() -> bool {
    let (major, minor) = os_version();
    major > 6 || (major == 6 && minor >= 2)
}

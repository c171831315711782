//! Pixel capture through GDI memory device contexts
//!
//! Both capture paths render into a memory DC backed by a compatible bitmap
//! and read the pixels back with `GetDIBits` as top-down 32-bit BGRA. GDI
//! objects are held in RAII guards declared in acquisition order, so drops
//! release them in strict reverse order even on the error paths.

use std::ffi::c_void;
use std::mem;
use std::ptr;

use image::RgbaImage;
use windows_sys::Win32::Foundation::{BOOL, HWND, RECT};
use windows_sys::Win32::Graphics::Dwm::DwmIsCompositionEnabled;
use windows_sys::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CAPTUREBLT, CreateCompatibleBitmap,
    CreateCompatibleDC,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetDC, GetDIBits, GetWindowDC, HBITMAP, HDC, HGDIOBJ,
    ReleaseDC, SRCCOPY, SelectObject,
};
use windows_sys::Win32::Storage::Xps::PrintWindow;
use windows_sys::Win32::UI::WindowsAndMessaging::GetWindowRect;

use super::util::supports_full_content_print;
use crate::error::{Error, Result};
use crate::fallback::{CaptureStrategy, run_capture_chain};
use crate::frame::FrameBuffer;
use crate::model::{MonitorInfo, WindowInfo};

// PrintWindow flags; only PW_CLIENTONLY is present in the generated
// bindings, the rest come from the SDK headers.
const PW_RENDER_FULL_CONTENT: u32 = 2;
const PW_DEFAULT: u32 = 0;
const PW_ALTERNATE: u32 = 4;

/// A borrowed screen or window DC, released on drop
struct DeviceContext {
    hwnd: HWND,
    hdc: HDC,
}

impl DeviceContext {
    /// DC covering the whole virtual desktop
    fn desktop() -> Result<Self> {
        let hdc = unsafe { GetDC(ptr::null_mut()) };
        if hdc.is_null() {
            return Err(Error::CaptureFailed("GetDC failed for the desktop".to_string()));
        }
        Ok(Self {
            hwnd: ptr::null_mut(),
            hdc,
        })
    }

    /// DC covering one window including its frame
    fn window(hwnd: HWND) -> Result<Self> {
        let hdc = unsafe { GetWindowDC(hwnd) };
        if hdc.is_null() {
            return Err(Error::CaptureFailed("GetWindowDC failed".to_string()));
        }
        Ok(Self { hwnd, hdc })
    }
}

impl Drop for DeviceContext {
    fn drop(&mut self) {
        unsafe { ReleaseDC(self.hwnd, self.hdc) };
    }
}

/// An owned memory DC, deleted on drop
struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(source: &DeviceContext) -> Result<Self> {
        let hdc = unsafe { CreateCompatibleDC(source.hdc) };
        if hdc.is_null() {
            return Err(Error::CaptureFailed("CreateCompatibleDC failed".to_string()));
        }
        Ok(Self(hdc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        unsafe { DeleteDC(self.0) };
    }
}

/// An owned GDI bitmap, deleted on drop
struct GdiBitmap(HBITMAP);

impl GdiBitmap {
    fn compatible_with(source: &DeviceContext, width: i32, height: i32) -> Result<Self> {
        let bitmap = unsafe { CreateCompatibleBitmap(source.hdc, width, height) };
        if bitmap.is_null() {
            return Err(Error::CaptureFailed(format!(
                "CreateCompatibleBitmap failed for {width}x{height}"
            )));
        }
        Ok(Self(bitmap))
    }
}

impl Drop for GdiBitmap {
    fn drop(&mut self) {
        unsafe { DeleteObject(self.0 as HGDIOBJ) };
    }
}

/// Keeps a bitmap selected into a DC, restoring the previous object on drop
struct Selection {
    hdc: HDC,
    previous: HGDIOBJ,
}

impl Selection {
    fn select(dc: &MemoryDc, bitmap: &GdiBitmap) -> Result<Self> {
        let previous = unsafe { SelectObject(dc.0, bitmap.0 as HGDIOBJ) };
        if previous.is_null() {
            return Err(Error::CaptureFailed("SelectObject failed".to_string()));
        }
        Ok(Self { hdc: dc.0, previous })
    }
}

impl Drop for Selection {
    fn drop(&mut self) {
        unsafe { SelectObject(self.hdc, self.previous) };
    }
}

pub(crate) fn capture_monitor(info: &MonitorInfo) -> Result<RgbaImage> {
    super::ensure_dpi_awareness();

    let width = info.width as i32;
    let height = info.height as i32;
    let screen = DeviceContext::desktop()?;
    let memory = MemoryDc::compatible_with(&screen)?;
    let bitmap = GdiBitmap::compatible_with(&screen, width, height)?;

    // GetDIBits wants the bitmap deselected, so the selection lives in its
    // own scope.
    {
        let _selection = Selection::select(&memory, &bitmap)?;
        // CAPTUREBLT includes layered windows the plain copy would miss.
        let ok = unsafe {
            BitBlt(
                memory.0,
                0,
                0,
                width,
                height,
                screen.hdc,
                info.x,
                info.y,
                SRCCOPY | CAPTUREBLT,
            )
        };
        if ok == 0 {
            return Err(Error::CaptureFailed("BitBlt from the screen failed".to_string()));
        }
    }

    read_pixels(&memory, &bitmap, width, height)?.into_rgba_image()
}

pub(crate) fn capture_window(info: &WindowInfo) -> Result<RgbaImage> {
    super::ensure_dpi_awareness();

    let hwnd = info.handle as HWND;

    // Geometry is re-read so the frame matches the window as it is now, not
    // as it was at enumeration time.
    let mut rect: RECT = unsafe { mem::zeroed() };
    if unsafe { GetWindowRect(hwnd, &mut rect) } == 0 {
        return Err(Error::CaptureFailed("window no longer exists".to_string()));
    }
    let width = rect.right - rect.left;
    let height = rect.bottom - rect.top;
    if width <= 0 || height <= 0 {
        return Err(Error::CaptureFailed(format!(
            "window has degenerate size {width}x{height}"
        )));
    }

    let window_dc = DeviceContext::window(hwnd)?;
    let memory = MemoryDc::compatible_with(&window_dc)?;
    let bitmap = GdiBitmap::compatible_with(&window_dc, width, height)?;

    {
        let _selection = Selection::select(&memory, &bitmap)?;
        let target = memory.0;
        let source = window_dc.hdc;
        let mut strategies = [
            CaptureStrategy::new("print-window-full-content", supports_full_content_print(), || {
                unsafe { PrintWindow(hwnd, target, PW_RENDER_FULL_CONTENT) != 0 }
            }),
            CaptureStrategy::new("print-window-default", dwm_composition_enabled(), || {
                unsafe { PrintWindow(hwnd, target, PW_DEFAULT) != 0 }
            }),
            CaptureStrategy::new("print-window-alternate", true, || {
                unsafe { PrintWindow(hwnd, target, PW_ALTERNATE) != 0 }
            }),
            CaptureStrategy::new("bitblt-window-dc", true, || {
                unsafe { BitBlt(target, 0, 0, width, height, source, 0, 0, SRCCOPY) != 0 }
            }),
        ];
        run_capture_chain(&mut strategies)?;
    }

    read_pixels(&memory, &bitmap, width, height)?.into_rgba_image()
}

fn dwm_composition_enabled() -> bool {
    let mut enabled: BOOL = 0;
    unsafe { DwmIsCompositionEnabled(&mut enabled) == 0 && enabled != 0 }
}

/// Reads the bitmap back as top-down BGRA
///
/// A negative height in the header requests top-down scanline order, which
/// is already the canonical orientation.
fn read_pixels(dc: &MemoryDc, bitmap: &GdiBitmap, width: i32, height: i32) -> Result<FrameBuffer> {
    let mut info: BITMAPINFO = unsafe { mem::zeroed() };
    info.bmiHeader.biSize = mem::size_of::<BITMAPINFOHEADER>() as u32;
    info.bmiHeader.biWidth = width;
    info.bmiHeader.biHeight = -height;
    info.bmiHeader.biPlanes = 1;
    info.bmiHeader.biBitCount = 32;
    info.bmiHeader.biCompression = BI_RGB as u32;

    let mut data = vec![0u8; width as usize * height as usize * 4];
    let scanlines = unsafe {
        GetDIBits(
            dc.0,
            bitmap.0,
            0,
            height as u32,
            data.as_mut_ptr() as *mut c_void,
            &mut info,
            DIB_RGB_COLORS,
        )
    };
    if scanlines != height {
        return Err(Error::CaptureFailed(format!(
            "GetDIBits copied {scanlines} of {height} scanlines"
        )));
    }

    FrameBuffer::new(data, width as u32, height as u32, width as u32 * 4)
}

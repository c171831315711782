//! Cross-platform monitor and window enumeration and still-frame capture.
//!
//! The crate exposes two facade types, [`Monitor`] and [`Window`], backed by
//! a native backend per platform (GDI and DWM on Windows, CoreGraphics on
//! macOS). Every capture produces the same canonical format: a tightly
//! packed, top-down [`image::RgbaImage`].
//!
//! ```no_run
//! use framegrab::{Monitor, Window};
//!
//! # fn main() -> framegrab::Result<()> {
//! for monitor in Monitor::all()? {
//!     let image = monitor.capture_image()?;
//!     println!("{}: {}x{}", monitor.name(), image.width(), image.height());
//! }
//!
//! for window in Window::all()? {
//!     println!("{} [{}]", window.title(), window.app_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All calls are synchronous and may be made from any thread; no global
//! state is shared beyond one-time platform initialization.

mod error;
#[cfg(any(target_os = "windows", test))]
mod fallback;
#[cfg(any(target_os = "windows", target_os = "macos", test))]
mod filter;
#[cfg(any(target_os = "windows", target_os = "macos", test))]
mod frame;
pub mod model;
mod monitor;
mod platform;
mod window;

pub use error::{Error, Result};
pub use image::RgbaImage;
pub use monitor::Monitor;
pub use window::Window;

//! Window enumeration via the CoreGraphics on-screen window list
//!
//! The list arrives as an array of CFDictionaries keyed by the documented
//! `kCGWindow*` strings. Everything here is best effort: a missing owner
//! name or title becomes an empty string, a missing numeric field its
//! documented default. Window titles only appear once the user has granted
//! screen-recording consent; enumeration itself needs no permission.

use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowListExcludeDesktopElements,
    kCGWindowListOptionOnScreenOnly,
};

use crate::error::{Error, Result};
use crate::filter::{FilterPolicy, WindowCandidate, should_include};
use crate::model::WindowInfo;

/// The Dock sits on a non-zero layer but is a window users ask for; the
/// Window Server owner covers pure compositor surfaces.
const POLICY: FilterPolicy = FilterPolicy {
    tool_window_allowlist: &["Dock"],
    placeholder_kinds: &["Window Server"],
};

pub(crate) fn list_windows(exclude_current_process: bool) -> Result<Vec<WindowInfo>> {
    let list = copy_window_info(
        kCGWindowListOptionOnScreenOnly | kCGWindowListExcludeDesktopElements,
        kCGNullWindowID,
    )
    .ok_or_else(|| Error::PlatformQuery("CGWindowListCopyWindowInfo failed".to_string()))?;

    let exclude_pid = exclude_current_process.then(|| std::process::id());

    // Front-to-back order; the index of a kept window is its z value.
    let mut windows = Vec::new();
    for item in list.iter() {
        let dict = unsafe {
            CFDictionary::<CFString, CFType>::wrap_under_get_rule(*item as CFDictionaryRef)
        };
        if let Some(info) = window_from_dict(&dict, exclude_pid, windows.len() as i32) {
            windows.push(info);
        }
    }
    // An empty list is a valid result here; a fresh session can have nothing
    // on screen that passes the filter.
    Ok(windows)
}

fn window_from_dict(
    dict: &CFDictionary<CFString, CFType>,
    exclude_pid: Option<u32>,
    z: i32,
) -> Option<WindowInfo> {
    let handle = number_field(dict, "kCGWindowNumber")?;
    let pid = number_field(dict, "kCGWindowOwnerPID").unwrap_or(0) as u32;
    let owner = string_field(dict, "kCGWindowOwnerName");
    let layer = number_field(dict, "kCGWindowLayer").unwrap_or(0);
    let alpha = float_field(dict, "kCGWindowAlpha").unwrap_or(1.0);
    let (x, y, width, height) = bounds_field(dict)?;

    let candidate = WindowCandidate {
        visible: bool_field(dict, "kCGWindowIsOnscreen").unwrap_or(true),
        cloaked: false,
        pid,
        tool_window: layer != 0,
        never_redirected: alpha == 0.0,
        kind: owner.clone(),
        width,
        height,
    };
    if !should_include(&candidate, exclude_pid, &POLICY) {
        return None;
    }

    Some(WindowInfo {
        handle: handle as isize,
        pid,
        app_name: owner,
        title: string_field(dict, "kCGWindowName"),
        x,
        y,
        z,
        width: width as u32,
        height: height as u32,
        is_minimized: false,
        is_maximized: false,
        is_focused: false,
    })
}

fn field(dict: &CFDictionary<CFString, CFType>, key: &'static str) -> Option<CFType> {
    dict.find(CFString::from_static_string(key))
        .map(|value| value.clone())
}

fn number_field(dict: &CFDictionary<CFString, CFType>, key: &'static str) -> Option<i64> {
    field(dict, key)?.downcast::<CFNumber>()?.to_i64()
}

fn float_field(dict: &CFDictionary<CFString, CFType>, key: &'static str) -> Option<f64> {
    field(dict, key)?.downcast::<CFNumber>()?.to_f64()
}

fn bool_field(dict: &CFDictionary<CFString, CFType>, key: &'static str) -> Option<bool> {
    field(dict, key)
        .and_then(|value| value.downcast::<CFBoolean>())
        .map(Into::into)
}

fn string_field(dict: &CFDictionary<CFString, CFType>, key: &'static str) -> String {
    field(dict, key)
        .and_then(|value| value.downcast::<CFString>())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Parses the `kCGWindowBounds` dictionary representation of a CGRect
fn bounds_field(dict: &CFDictionary<CFString, CFType>) -> Option<(i32, i32, i32, i32)> {
    let value = field(dict, "kCGWindowBounds")?;
    if !value.instance_of::<CFDictionary>() {
        return None;
    }
    let bounds = unsafe {
        CFDictionary::<CFString, CFType>::wrap_under_get_rule(value.as_CFTypeRef().cast())
    };
    let x = float_field(&bounds, "X")?;
    let y = float_field(&bounds, "Y")?;
    let width = float_field(&bounds, "Width")?;
    let height = float_field(&bounds, "Height")?;
    Some((x as i32, y as i32, width as i32, height as i32))
}

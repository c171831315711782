//! Display enumeration via the CoreGraphics active display list

use core_graphics::display::CGDisplay;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::MonitorInfo;

pub(crate) fn list_monitors() -> Result<Vec<MonitorInfo>> {
    let ids = CGDisplay::active_displays()
        .map_err(|code| Error::PlatformQuery(format!("CGGetActiveDisplayList failed ({code})")))?;

    let mut monitors = Vec::with_capacity(ids.len());
    for id in ids {
        match describe_display(CGDisplay::new(id)) {
            Some(info) => monitors.push(info),
            None => warn!(display = id, "skipping display with degenerate bounds"),
        }
    }
    Ok(monitors)
}

fn describe_display(display: CGDisplay) -> Option<MonitorInfo> {
    let bounds = display.bounds();
    // The whole descriptor stays in the global display space (points), the
    // same space window bounds are reported in; otherwise the overlap-based
    // window-to-monitor relation compares rects from different spaces. The
    // pixel density is carried by scale_factor instead.
    let width = bounds.size.width as u32;
    let height = bounds.size.height as u32;
    if width == 0 || height == 0 {
        return None;
    }

    let scale_factor = (display.pixels_wide() as f64 / bounds.size.width) as f32;
    let frequency = display
        .display_mode()
        .map(|mode| mode.refresh_rate() as f32)
        .unwrap_or(0.0);

    Some(MonitorInfo {
        handle: display.id as isize,
        name: format!("Display {}", display.id),
        x: bounds.origin.x as i32,
        y: bounds.origin.y as i32,
        width,
        height,
        rotation: display.rotation() as f32,
        scale_factor,
        frequency,
        is_primary: display.is_main(),
        is_builtin: display.is_builtin(),
    })
}

//! Integration tests for the public enumeration and capture API
//!
//! Enumeration tests run wherever a desktop session exists and only assert
//! invariants that hold on any machine (no fixed monitor counts or names).
//! Capture tests are marked `#[ignore]` because they need a real, unlocked
//! session (and granted screen-recording consent on macOS). Execute them
//! manually with:
//!
//! ```bash
//! cargo test -- --ignored
//! ```

use framegrab::Error;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
mod unsupported_platform {
    use super::*;
    use framegrab::{Monitor, Window};

    #[test]
    fn test_monitor_all_is_not_supported() {
        init_tracing();
        assert!(matches!(Monitor::all(), Err(Error::NotSupported)));
    }

    #[test]
    fn test_window_all_is_not_supported() {
        init_tracing();
        assert!(matches!(Window::all(), Err(Error::NotSupported)));
        assert!(matches!(
            Window::all_with_options(false),
            Err(Error::NotSupported)
        ));
    }
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
mod desktop {
    use super::*;
    use framegrab::{Monitor, Window};

    /// A headless or locked session legitimately has no displays; those
    /// runs skip instead of failing.
    fn monitors_or_skip() -> Option<Vec<Monitor>> {
        match Monitor::all() {
            Ok(monitors) => Some(monitors),
            Err(Error::NoMonitors) => None,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_monitor_enumeration_invariants() {
        init_tracing();
        let Some(monitors) = monitors_or_skip() else {
            return;
        };
        assert!(!monitors.is_empty());
        assert_eq!(
            monitors.iter().filter(|m| m.is_primary()).count(),
            1,
            "exactly one monitor must be primary"
        );
        for monitor in &monitors {
            assert!(monitor.width() > 0);
            assert!(monitor.height() > 0);
            assert!(monitor.scale_factor() > 0.0);
            assert!([0.0, 90.0, 180.0, 270.0].contains(&monitor.rotation()));
        }
    }

    #[test]
    fn test_window_enumeration_invariants() {
        init_tracing();
        // An empty list is legal on macOS; an error other than NoWindows is
        // not.
        let windows = match Window::all() {
            Ok(windows) => windows,
            Err(Error::NoWindows) => return,
            Err(other) => panic!("unexpected error: {other}"),
        };
        for (index, window) in windows.iter().enumerate() {
            assert!(window.width() > 0);
            assert!(window.height() > 0);
            // z is the front-to-back position in the returned list.
            assert_eq!(window.z(), index as i32);
        }
    }

    #[test]
    fn test_own_process_can_be_excluded() {
        init_tracing();
        let pid = std::process::id();
        if let Ok(windows) = Window::all_with_options(true) {
            assert!(windows.iter().all(|w| w.pid() != pid));
        }
    }

    #[test]
    #[ignore = "requires an unlocked desktop session"]
    fn test_monitor_capture_matches_descriptor() {
        init_tracing();
        let monitors = Monitor::all().unwrap();
        let monitor = &monitors[0];
        let image = monitor.capture_image().unwrap();
        // Windows descriptors are already in physical pixels; macOS ones
        // are in points and the image scales with the display density.
        #[cfg(target_os = "windows")]
        let expected = (monitor.width(), monitor.height());
        #[cfg(target_os = "macos")]
        let expected = (
            (monitor.width() as f32 * monitor.scale_factor()).round() as u32,
            (monitor.height() as f32 * monitor.scale_factor()).round() as u32,
        );
        assert_eq!(image.dimensions(), expected);
    }

    #[test]
    #[ignore = "requires an unlocked desktop session"]
    fn test_monitor_region_capture() {
        init_tracing();
        let monitors = Monitor::all().unwrap();
        let monitor = &monitors[0];
        let region = monitor.capture_region(10, 10, 64, 48).unwrap();
        #[cfg(target_os = "windows")]
        let expected = (64, 48);
        #[cfg(target_os = "macos")]
        let expected = (
            (64.0 * monitor.scale_factor()).round() as u32,
            (48.0 * monitor.scale_factor()).round() as u32,
        );
        assert_eq!(region.dimensions(), expected);
    }

    #[test]
    #[ignore = "requires an unlocked desktop session with open windows"]
    fn test_window_capture_produces_pixels() {
        init_tracing();
        let windows = Window::all().unwrap();
        let window = &windows[0];
        let image = window.capture_image().unwrap();
        assert!(image.width() > 0);
        assert!(image.height() > 0);
    }

    #[test]
    fn test_invalid_region_is_rejected_without_capturing() {
        init_tracing();
        let Some(monitors) = monitors_or_skip() else {
            return;
        };
        let result = monitors[0].capture_region(0, 0, 0, 10);
        assert!(matches!(result, Err(Error::InvalidRegion { .. })));
    }

    #[test]
    fn test_current_monitor_resolves() {
        init_tracing();
        if let Ok(windows) = Window::all() {
            if let Some(window) = windows.first() {
                let monitor = window.current_monitor().unwrap();
                assert!(monitor.width() > 0);
            }
        }
    }
}

#[test]
fn test_error_messages_are_stable() {
    assert_eq!(Error::NoMonitors.to_string(), "no monitors found");
    assert_eq!(Error::NoWindows.to_string(), "no capturable windows found");
    assert_eq!(
        Error::PermissionDenied.to_string(),
        "screen recording permission denied"
    );
    assert_eq!(
        Error::NotSupported.to_string(),
        "not supported on this platform"
    );
}

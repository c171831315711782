//! Window eligibility rules
//!
//! Each platform enumerates far more surfaces than a user would call
//! "windows": cloaked virtual-desktop leftovers, tool palettes, shell
//! placeholders, zero-sized layout helpers. The backends collect the raw
//! facts about a candidate into a [`WindowCandidate`] and this module makes
//! the keep/drop decision, so the rules stay identical in structure across
//! platforms and testable without a desktop.
//!
//! The checks run in a fixed order; later checks assume the earlier ones
//! already passed (a cloaked window is dropped before its style is ever
//! considered).

use tracing::trace;

/// Raw facts about one enumerated window, before filtering
///
/// `width`/`height` are signed because they come straight from rectangle
/// arithmetic; degenerate and inverted rectangles are dropped here.
#[derive(Debug, Clone)]
pub(crate) struct WindowCandidate {
    /// OS-native visibility flag
    pub visible: bool,
    /// Nominally visible but hidden by the compositor (inactive virtual
    /// desktop and similar)
    pub cloaked: bool,
    /// Owning process id
    pub pid: u32,
    /// Tool/utility styling (non-primary chrome)
    pub tool_window: bool,
    /// Rendering never reaches a capturable surface
    pub never_redirected: bool,
    /// Platform kind string matched against the policy lists: the window
    /// class on Windows, the owning application on macOS
    pub kind: String,
    pub width: i32,
    pub height: i32,
}

/// Per-platform lists consulted by the shared rules
pub(crate) struct FilterPolicy {
    /// Tool-styled windows that are still meaningful to capture (taskbar
    /// equivalents)
    pub tool_window_allowlist: &'static [&'static str],
    /// Pure system placeholders dropped by kind
    pub placeholder_kinds: &'static [&'static str],
}

/// Applies the ordered eligibility rules to one candidate
pub(crate) fn should_include(
    candidate: &WindowCandidate,
    exclude_pid: Option<u32>,
    policy: &FilterPolicy,
) -> bool {
    if !candidate.visible {
        return false;
    }
    if candidate.cloaked {
        trace!(kind = %candidate.kind, "dropping cloaked window");
        return false;
    }
    if exclude_pid == Some(candidate.pid) {
        return false;
    }
    if candidate.tool_window
        && !policy
            .tool_window_allowlist
            .contains(&candidate.kind.as_str())
    {
        return false;
    }
    if candidate.never_redirected {
        return false;
    }
    if policy.placeholder_kinds.contains(&candidate.kind.as_str()) {
        return false;
    }
    if candidate.width <= 0 || candidate.height <= 0 {
        trace!(
            kind = %candidate.kind,
            width = candidate.width,
            height = candidate.height,
            "dropping window with degenerate bounds"
        );
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: FilterPolicy = FilterPolicy {
        tool_window_allowlist: &["Shell_TrayWnd", "Shell_SecondaryTrayWnd"],
        placeholder_kinds: &["Progman", "Button", "Windows.UI.Core.CoreWindow"],
    };

    fn candidate() -> WindowCandidate {
        WindowCandidate {
            visible: true,
            cloaked: false,
            pid: 1234,
            tool_window: false,
            never_redirected: false,
            kind: "Chrome_WidgetWin_1".to_string(),
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_ordinary_window_is_kept() {
        assert!(should_include(&candidate(), None, &POLICY));
    }

    #[test]
    fn test_invisible_window_is_dropped() {
        let mut c = candidate();
        c.visible = false;
        assert!(!should_include(&c, None, &POLICY));
    }

    #[test]
    fn test_cloaked_window_is_dropped_under_any_other_flags() {
        // A cloaked window must never appear, whatever else is set.
        for tool_window in [false, true] {
            for never_redirected in [false, true] {
                for kind in ["Chrome_WidgetWin_1", "Shell_TrayWnd", "Progman"] {
                    let mut c = candidate();
                    c.cloaked = true;
                    c.tool_window = tool_window;
                    c.never_redirected = never_redirected;
                    c.kind = kind.to_string();
                    assert!(
                        !should_include(&c, None, &POLICY),
                        "cloaked window leaked with kind {kind}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_current_process_exclusion() {
        let c = candidate();
        assert!(!should_include(&c, Some(1234), &POLICY));
        assert!(should_include(&c, Some(9999), &POLICY));
        assert!(should_include(&c, None, &POLICY));
    }

    #[test]
    fn test_tool_window_dropped_unless_allowlisted() {
        let mut c = candidate();
        c.tool_window = true;
        assert!(!should_include(&c, None, &POLICY));

        c.kind = "Shell_TrayWnd".to_string();
        assert!(should_include(&c, None, &POLICY));

        c.kind = "Shell_SecondaryTrayWnd".to_string();
        assert!(should_include(&c, None, &POLICY));
    }

    #[test]
    fn test_never_redirected_window_is_dropped() {
        let mut c = candidate();
        c.never_redirected = true;
        assert!(!should_include(&c, None, &POLICY));
    }

    #[test]
    fn test_placeholder_kinds_are_dropped() {
        for kind in ["Progman", "Button", "Windows.UI.Core.CoreWindow"] {
            let mut c = candidate();
            c.kind = kind.to_string();
            assert!(!should_include(&c, None, &POLICY), "{kind} leaked");
        }
    }

    #[test]
    fn test_degenerate_bounds_are_dropped() {
        for (w, h) in [(0, 5), (5, 0), (0, 0), (-3, 100), (100, -1)] {
            let mut c = candidate();
            c.width = w;
            c.height = h;
            assert!(!should_include(&c, None, &POLICY), "{w}x{h} leaked");
        }
    }

    #[test]
    fn test_one_by_one_window_is_kept() {
        let mut c = candidate();
        c.width = 1;
        c.height = 1;
        assert!(should_include(&c, None, &POLICY));
    }
}

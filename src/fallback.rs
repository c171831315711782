//! Ordered capture strategy chain
//!
//! No single native method captures every window class: some windows render
//! only through compositor-level printing, others only through a direct
//! device-context copy. Window capture therefore tries an ordered list of
//! strategies and commits to the first one that succeeds; strategies after
//! the winner are never invoked. A strategy may be disabled up front (for
//! example when the OS version is too old for full-content printing) and is
//! then skipped without being attempted.

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// One entry in the fallback chain
pub(crate) struct CaptureStrategy<'a> {
    /// Short name used for logging and error context
    pub name: &'static str,
    /// Whether this strategy applies in the current environment
    pub enabled: bool,
    /// Attempts the capture; true means the target surface now holds the
    /// window content
    pub attempt: Box<dyn FnMut() -> bool + 'a>,
}

impl<'a> CaptureStrategy<'a> {
    pub(crate) fn new(
        name: &'static str,
        enabled: bool,
        attempt: impl FnMut() -> bool + 'a,
    ) -> Self {
        Self {
            name,
            enabled,
            attempt: Box::new(attempt),
        }
    }
}

/// Runs the chain in order and returns the name of the winning strategy
///
/// Fails with [`Error::CaptureFailed`] when every enabled strategy fails; a
/// partially filled surface is never reported as success.
pub(crate) fn run_capture_chain(strategies: &mut [CaptureStrategy<'_>]) -> Result<&'static str> {
    for strategy in strategies.iter_mut() {
        if !strategy.enabled {
            trace!(strategy = strategy.name, "capture strategy disabled, skipping");
            continue;
        }
        if (strategy.attempt)() {
            debug!(strategy = strategy.name, "capture strategy succeeded");
            return Ok(strategy.name);
        }
        trace!(strategy = strategy.name, "capture strategy failed, falling back");
    }
    Err(Error::CaptureFailed(
        "every capture strategy failed".to_string(),
    ))
}

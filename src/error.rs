//! Error types for enumeration and capture operations
//!
//! Every OS-level failure is mapped to one of these variants at the platform
//! boundary; no raw platform error code crosses the public API. Partial
//! failures during enumeration (a title or process name that cannot be read)
//! are absorbed as empty-string defaults and never surface here.

/// Result type alias for all public operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by every platform backend
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Display enumeration ran successfully but found zero displays
    #[error("no monitors found")]
    NoMonitors,

    /// Window enumeration ran successfully but found zero eligible windows
    ///
    /// Only the Windows backend reports this; on macOS an empty window list
    /// is a valid empty result.
    #[error("no capturable windows found")]
    NoWindows,

    /// The underlying OS query itself failed, as opposed to finding nothing
    #[error("platform query failed: {0}")]
    PlatformQuery(String),

    /// Every strategy in the capture chain failed, or the OS returned an
    /// invalid or wrongly sized buffer
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// The OS denied the operation because the user has not granted
    /// screen-recording consent
    #[error("screen recording permission denied")]
    PermissionDenied,

    /// The operation has no implementation on the current platform
    #[error("not supported on this platform")]
    NotSupported,

    /// A requested sub-region has non-positive size or lies outside the
    /// source bounds
    #[error("invalid capture region {width}x{height} at ({x}, {y})")]
    InvalidRegion {
        /// Region left edge, relative to the source
        x: u32,
        /// Region top edge, relative to the source
        y: u32,
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
}

//! Error types for the host boundary.
//!
//! State transitions never fail: out-of-range requests are clamped and malformed input is
//! dropped. Errors only exist where the engine talks to host services (settings storage and
//! the clipboard), and even those are logged and swallowed by
//! [`HexViewer::dispatch_with`](crate::HexViewer::dispatch_with).

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or saving persisted settings.
pub enum SettingsError {
    #[error("settings JSON error: {0}")]
    /// The stored blob is not valid JSON (or not the expected shape).
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    /// The backing store failed to read or write.
    Io(#[from] std::io::Error),

    #[error("settings storage error: {0}")]
    /// Any other storage-specific failure.
    Storage(String),
}

#[derive(Debug, Error)]
/// Errors produced by a [`Clipboard`](crate::host::Clipboard) implementation.
pub enum ClipboardError {
    #[error("clipboard is unavailable")]
    /// No clipboard is reachable from this host (e.g. headless sessions).
    Unavailable,

    #[error("clipboard write failed: {0}")]
    /// The platform rejected the write.
    Write(String),
}

#[derive(Debug, Error)]
/// Any failure raised while executing an [`Effect`](crate::pipeline::Effect) against a host.
pub enum HostError {
    #[error(transparent)]
    /// Settings could not be saved.
    Settings(#[from] SettingsError),

    #[error(transparent)]
    /// The clipboard write failed.
    Clipboard(#[from] ClipboardError),
}

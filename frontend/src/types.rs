//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **File Types** - staged file handles
//! - **Progress Types** - upload percentage and render phase
//! - **API Types** - upload response structures
//! - **Error Types** - frontend error handling

use serde::Serialize;
use std::fmt;

// =============================================================================
// File Types
// =============================================================================

/// A file staged for upload.
///
/// Implemented for [`web_sys::File`] in the browser. Kept as a trait so
/// the widget state can be driven without a DOM.
pub trait FileHandle: Clone + 'static {
    /// Original file name, used as the multipart field key.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
}

impl FileHandle for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        // Blob sizes are reported as f64 but are always whole byte counts.
        web_sys::Blob::size(self) as u64
    }
}

/// Human-readable byte count (`512B`, `1.5KB`, `3.2GB`).
///
/// Binary units up to `EB`, which is enough for the whole `u64` range.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", value, UNITS[unit])
}

// =============================================================================
// Progress Types
// =============================================================================

/// Aggregate upload progress, a whole percentage in `0..=100`.
///
/// `0` means no upload is running, anything strictly between `0` and
/// `100` means a request is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadProgress(u8);

impl UploadProgress {
    pub const IDLE: UploadProgress = UploadProgress(0);
    pub const COMPLETE: UploadProgress = UploadProgress(100);

    /// Build from a transport fraction (`loaded / total`).
    ///
    /// Rounded to the nearest percent and clamped; NaN maps to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::IDLE;
        }
        let percent = (fraction * 100.0).round().clamp(0.0, 100.0);
        UploadProgress(percent as u8)
    }

    /// Build from raw byte counts as reported by a progress event.
    ///
    /// Returns `None` when the total is unknown.
    pub fn from_bytes(loaded: f64, total: f64) -> Option<Self> {
        if total > 0.0 && total.is_finite() {
            Some(Self::from_fraction(loaded / total))
        } else {
            None
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_in_flight(self) -> bool {
        self.0 > 0 && self.0 < 100
    }

    pub fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl fmt::Display for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Render phase of the widget, derived from selection and progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Drop-zone, nothing selected.
    Idle,
    /// Files staged, waiting for the user to upload or clear.
    Reviewing,
    /// Request in flight with a percentage strictly between 0 and 100.
    Uploading,
    /// Upload reached 100%; the selection is gone and the drop-zone shows.
    Done,
}

impl Phase {
    /// Whether the drop-zone (rather than the file list) is rendered.
    pub fn shows_dropzone(self) -> bool {
        matches!(self, Phase::Idle | Phase::Done)
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// What the endpoint answered to a successful upload.
///
/// The endpoint has no documented body, so the body is kept only when
/// it happens to be JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UploadReceipt {
    /// HTTP status (always 2xx).
    pub status: u16,
    /// Parsed JSON body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl UploadReceipt {
    pub fn from_response(status: u16, text: &str) -> Self {
        Self {
            status,
            body: serde_json::from_str(text).ok(),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for upload operations.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// A browser API threw (FormData, XHR open/send).
    Browser(String),
    /// Transport-level failure, no HTTP response.
    Network(String),
    /// The endpoint answered with a non-2xx status.
    Server { status: u16, body: String },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Browser(msg) => write!(f, "Browser error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, body } if body.is_empty() => {
                write!(f, "Server error ({})", status)
            }
            AppError::Server { status, body } => write!(f, "Server error ({}): {}", status, body),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

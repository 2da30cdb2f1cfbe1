//! Application configuration.
//!
//! Centralized configuration for the Dropzone frontend.
//! Everything is compiled in; nothing is read from the environment
//! or persisted between sessions.

/// Upload endpoint.
///
/// Relative to the page origin so the widget works behind any host
/// that serves both the bundle and the API.
pub const UPLOAD_URL: &str = "/api/upload";

/// Application name, used as the document title.
pub const APP_NAME: &str = "Dropzone";

/// DOM id of the hidden `<input type="file">`.
pub const INPUT_ID: &str = "dropzoneInput";

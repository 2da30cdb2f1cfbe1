//! UI Components for the Dropzone application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//!
//! # Feature Components
//! - [`FileUpload`] - Drop-zone with click-to-browse and upload
//! - [`StagedFileList`] - Files waiting to be uploaded
//! - [`UploadControls`] - Upload / Clear buttons, progress and errors

mod hero;
mod upload;
mod file_list;
mod progress;

pub use hero::*;
pub use upload::*;
pub use file_list::*;
pub use progress::*;

//! Backend services.
//!
//! # Services
//!
//! - [`upload`] - multipart upload to the fixed endpoint, with progress

pub mod upload;

pub use upload::*;

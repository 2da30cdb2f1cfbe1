//! Dropzone - Frontend Rust/Leptos Application
//!
//! A WebAssembly drag-and-drop widget that stages files and uploads
//! them in a single multipart request, reporting aggregate progress.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hero (title, description)                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FileUpload (drop target, owns UploadWidget state)           │
//! │  ├── drop-zone          (Idle / Done)                        │
//! │  └── StagedFileList +                                        │
//! │      UploadControls     (Reviewing / Uploading)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (FileHandle, UploadProgress, AppError, etc.)
//! - [`state`] - Widget state machine, driven by [`WidgetEvent`]s
//! - [`components`] - UI components
//! - [`services`] - Backend communication (upload)

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod state;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    format_bytes, FileHandle,
    // Progress
    Phase, UploadProgress,
    // API
    UploadReceipt,
    // Errors
    AppError, AppResult,
};

// State
pub use state::{UploadWidget, WidgetEvent};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Root
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <FileUpload/>
        </div>
    }
}

//! Entry point for the WASM application.
//!
//! The only place the app is mounted; trunk builds this binary.

use dropzone::App;
use leptos::*;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Dropzone - Starting Leptos App");

    mount_to_body(|| view! { <App/> })
}

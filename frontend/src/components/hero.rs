//! Hero section component

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{APP_NAME}</h1>
            <p class="subtitle">
                "Drop files below or pick them from disk, review the list, "
                "then send them all in one upload."
            </p>
        </div>
    }
}

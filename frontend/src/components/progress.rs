//! Upload / Clear buttons, progress bar and error line.

use leptos::*;
use web_sys::File;

use crate::{UploadWidget, WidgetEvent};

#[component]
pub fn UploadControls(
    widget: ReadSignal<UploadWidget<File>>,
    set_widget: WriteSignal<UploadWidget<File>>,
    /// Starts the upload of the current selection.
    #[prop(into)]
    on_upload: Callback<()>,
) -> impl IntoView {
    let uploading = move || widget.with(|w| w.is_uploading());
    let busy = move || widget.with(|w| w.is_uploading() || w.has_request_in_flight());

    view! {
        <div class="controls">
            <button
                class=move || if busy() { "upload-button busy" } else { "upload-button" }
                disabled=busy
                on:click=move |_| on_upload.call(())
            >
                {move || widget.with(|w| w.upload_button_label())}
            </button>

            <Show
                when=move || !uploading()
                fallback=|| view! { }
            >
                <button
                    class="clear-button"
                    on:click=move |_| set_widget.update(|w| w.apply(WidgetEvent::Clear))
                >
                    "Clear"
                </button>
            </Show>
        </div>

        <Show
            when=uploading
            fallback=|| view! { }
        >
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%;", widget.with(|w| w.progress().percent()))
                ></div>
            </div>
        </Show>

        <Show
            when=move || widget.with(|w| w.last_error().is_some())
            fallback=|| view! { }
        >
            <div class="error-message">
                {move || widget.with(|w| w.last_error().unwrap_or_default().to_string())}
            </div>
        </Show>
    }
}

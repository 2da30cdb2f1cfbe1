//! Multi-file upload component with drag & drop support.
//!
//! Renders the drop-zone while nothing is staged and the review list
//! once files are chosen; handles the upload request.

use leptos::*;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement};

use crate::components::{StagedFileList, UploadControls};
use crate::services::upload_files;
use crate::{UploadWidget, WidgetEvent, INPUT_ID, UPLOAD_URL};

/// Copy the entries of a browser `FileList` into owned handles.
fn collect_files(list: Option<FileList>) -> Vec<File> {
    list.map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

/// Keep the browser from opening the dragged file itself.
fn suppress(ev: &DragEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub fn FileUpload() -> impl IntoView {
    let (widget, set_widget) = create_signal(UploadWidget::<File>::new());
    let input_ref = create_node_ref::<html::Input>();

    let dispatch = move |event: WidgetEvent<File>| set_widget.update(|w| w.apply(event));

    let open_dialog = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        dispatch(WidgetEvent::FilesChosen(collect_files(input.files())));
        // Let the same files be picked again.
        input.set_value("");
    };

    let on_drag_enter = move |ev: DragEvent| {
        suppress(&ev);
        dispatch(WidgetEvent::DragEnter);
    };
    let on_drag_over = move |ev: DragEvent| {
        suppress(&ev);
        dispatch(WidgetEvent::DragOver);
    };
    let on_drag_leave = move |ev: DragEvent| {
        suppress(&ev);
        dispatch(WidgetEvent::DragLeave);
    };
    let on_drop = move |ev: DragEvent| {
        suppress(&ev);
        let files = collect_files(ev.data_transfer().and_then(|dt| dt.files()));
        dispatch(WidgetEvent::Drop(files));
    };

    let on_upload = move |_: ()| {
        let Some(files) = set_widget.try_update(|w| w.begin_upload()).flatten() else {
            return;
        };

        log::info!("📤 Uploading {} file(s) to {}", files.len(), UPLOAD_URL);

        spawn_local(async move {
            let result = upload_files(&files, UPLOAD_URL, move |progress| {
                dispatch(WidgetEvent::Progress(progress))
            })
            .await;

            match result {
                Ok(receipt) => {
                    log::info!("✅ Upload finished with status {}", receipt.status);
                    dispatch(WidgetEvent::UploadSucceeded);
                }
                Err(e) => {
                    log::error!("❌ Upload failed: {}", e);
                    dispatch(WidgetEvent::UploadFailed(e.to_string()));
                }
            }
        });
    };

    view! {
        <div
            class=move || widget.with(|w| w.dropzone_class())
            on:dragenter=on_drag_enter
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <div class="dropzone-body">
                <Show
                    when=move || widget.with(|w| w.phase().shows_dropzone())
                    fallback=move || view! {
                        <StagedFileList widget=widget/>
                        <UploadControls
                            widget=widget
                            set_widget=set_widget
                            on_upload=on_upload
                        />
                    }
                >
                    <input
                        type="file"
                        id=INPUT_ID
                        multiple=true
                        style="display:none"
                        node_ref=input_ref
                        on:change=on_file_change
                    />
                    <div class="upload-icon">"☁️"</div>
                    <div class="upload-text">
                        <button class="link-button" on:click=open_dialog>
                            "Upload files"
                        </button>
                        <span>" or drag it here"</span>
                    </div>
                </Show>
            </div>
        </div>
    }
}

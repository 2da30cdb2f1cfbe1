//! List of the files staged for upload.

use leptos::*;
use web_sys::File;

use crate::{format_bytes, FileHandle, UploadWidget};

#[component]
pub fn StagedFileList(widget: ReadSignal<UploadWidget<File>>) -> impl IntoView {
    let rows = move || {
        widget.with(|w| {
            w.selection()
                .map(|files| {
                    files
                        .iter()
                        .map(|f| (FileHandle::name(f), FileHandle::size(f)))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let summary = move || {
        widget.with(|w| {
            let count = w.selection().map(|files| files.len()).unwrap_or(0);
            format!("{} file(s), {}", count, format_bytes(w.total_bytes()))
        })
    };

    view! {
        <p class="dropzone-title">"Files to Upload"</p>
        <ul class="file-list">
            <For
                each=move || rows().into_iter().enumerate()
                key=|(i, (name, size))| (*i, name.clone(), *size)
                children=move |(_, (name, size))| {
                    view! {
                        <li class="file-row">
                            <span class="file-name">{name}</span>
                            <span class="file-size">{format_bytes(size)}</span>
                        </li>
                    }
                }
            />
        </ul>
        <p class="file-summary">{summary}</p>
    }
}

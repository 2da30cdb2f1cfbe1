//! Multipart upload to the backend with progress reporting.
//!
//! `fetch` does not expose upload progress, so the request is sent
//! through a raw `XMLHttpRequest` whose `loadend` resolves a promise we
//! can await.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::{AppError, AppResult, UploadProgress, UploadReceipt};

fn browser_error(context: &'static str) -> impl Fn(JsValue) -> AppError {
    move |e| AppError::Browser(format!("{}: {:?}", context, e))
}

/// Runs its cleanup when dropped.
///
/// Holds the handler unregistration so every exit path of
/// [`upload_files`], `?` included, detaches the callbacks before the
/// `Closure` they point to is freed.
struct Unregister<C: FnMut()> {
    cleanup: C,
}

impl<C: FnMut()> Unregister<C> {
    fn new(cleanup: C) -> Self {
        Self { cleanup }
    }
}

impl<C: FnMut()> Drop for Unregister<C> {
    fn drop(&mut self) {
        (self.cleanup)()
    }
}

/// One part per file, keyed by the file's own name.
///
/// Files sharing a name produce several parts with the same key.
pub fn build_form_data(files: &[File]) -> AppResult<FormData> {
    let form_data = FormData::new().map_err(browser_error("Failed to create FormData"))?;

    for file in files {
        form_data
            .append_with_blob(&file.name(), file)
            .map_err(browser_error("Failed to append file"))?;
    }

    Ok(form_data)
}

/// Turn the settled request into a receipt or an error.
///
/// Status `0` is what XHR reports when no response was received.
fn settle(status: u16, text: String) -> AppResult<UploadReceipt> {
    match status {
        0 => Err(AppError::Network("request did not complete".to_string())),
        200..=299 => Ok(UploadReceipt::from_response(status, &text)),
        _ => Err(AppError::Server {
            status,
            body: text.trim().to_string(),
        }),
    }
}

/// POST `files` as `multipart/form-data` to `url`.
///
/// `on_progress` is called for every upload progress event whose total
/// is known. Resolves once the request settles.
pub async fn upload_files(
    files: &[File],
    url: &str,
    on_progress: impl Fn(UploadProgress) + 'static,
) -> AppResult<UploadReceipt> {
    let form_data = build_form_data(files)?;

    let xhr = XmlHttpRequest::new().map_err(browser_error("Failed to create XMLHttpRequest"))?;
    xhr.open("POST", url)
        .map_err(browser_error("Failed to open request"))?;

    let upload = xhr
        .upload()
        .map_err(browser_error("Upload progress unavailable"))?;
    let onprogress = Closure::wrap(Box::new(move |event: ProgressEvent| {
        if !event.length_computable() {
            return;
        }
        if let Some(progress) = UploadProgress::from_bytes(event.loaded(), event.total()) {
            on_progress(progress);
        }
    }) as Box<dyn FnMut(ProgressEvent)>);
    upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
    // Declared after `onprogress`, so dropped (and run) before it.
    let _handlers = Unregister::new(|| {
        upload.set_onprogress(None);
        xhr.set_onloadend(None);
    });

    // loadend fires after load, error, abort and timeout alike.
    let settled = Promise::new(&mut |resolve, _reject| {
        xhr.set_onloadend(Some(&resolve));
    });

    xhr.send_with_opt_form_data(Some(&form_data))
        .map_err(browser_error("Failed to send request"))?;

    JsFuture::from(settled)
        .await
        .map_err(|e| AppError::Network(format!("{:?}", e)))?;

    let status = xhr
        .status()
        .map_err(browser_error("Failed to read status"))?;
    let text = xhr.response_text().ok().flatten().unwrap_or_default();

    let receipt = settle(status, text)?;
    match serde_json::to_string(&receipt) {
        Ok(json) => log::debug!("Upload receipt: {}", json),
        Err(e) => log::warn!("Could not serialize upload receipt: {}", e),
    }
    Ok(receipt)
}

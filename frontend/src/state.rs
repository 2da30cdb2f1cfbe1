//! Interaction state of the upload widget.
//!
//! [`UploadWidget`] owns everything the drop-zone renders from: the
//! staged selection, the drag highlight, the upload percentage and the
//! last error. Components never poke at fields directly; they turn DOM
//! callbacks into a [`WidgetEvent`] and hand it to [`UploadWidget::apply`].
//!
//! ```text
//!            select / drop            upload + progress
//!   Idle ───────────────────▶ Reviewing ─────────────▶ Uploading
//!    ▲ ◀──────── clear ───────┘  ▲                         │
//!    │                           └──────── failure ────────┤
//!    └──────────────── Done ◀──────── progress 100 ────────┘
//! ```

use crate::types::{FileHandle, Phase, UploadProgress};

/// Everything that can happen to the widget.
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetEvent<F> {
    /// The file dialog closed with these files.
    FilesChosen(Vec<F>),
    DragEnter,
    DragOver,
    DragLeave,
    /// Files extracted from a drop payload.
    Drop(Vec<F>),
    /// The user pressed "Clear".
    Clear,
    /// Upload progress reported by the transport.
    Progress(UploadProgress),
    /// The request settled with a 2xx.
    UploadSucceeded,
    /// The request failed; carries the user-facing message.
    UploadFailed(String),
}

/// State of a single drop-zone instance.
#[derive(Clone, Debug)]
pub struct UploadWidget<F> {
    selection: Option<Vec<F>>,
    highlight: bool,
    progress: UploadProgress,
    in_flight: Option<Vec<F>>,
    /// The staged selection is the batch in `in_flight`.
    sent_is_staged: bool,
    last_error: Option<String>,
}

impl<F> Default for UploadWidget<F> {
    fn default() -> Self {
        Self {
            selection: None,
            highlight: false,
            progress: UploadProgress::IDLE,
            in_flight: None,
            sent_is_staged: false,
            last_error: None,
        }
    }
}

impl<F: FileHandle> UploadWidget<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files staged for upload; `None` while the drop-zone is shown.
    pub fn selection(&self) -> Option<&[F]> {
        self.selection.as_deref()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress
    }

    /// True while the percentage is strictly between 0 and 100.
    pub fn is_uploading(&self) -> bool {
        self.progress.is_in_flight()
    }

    /// True from [`begin_upload`](Self::begin_upload) until the request settles.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        match &self.selection {
            None if self.progress.is_complete() => Phase::Done,
            None => Phase::Idle,
            Some(_) if self.progress.is_in_flight() => Phase::Uploading,
            Some(_) => Phase::Reviewing,
        }
    }

    /// Sum of the staged file sizes.
    pub fn total_bytes(&self) -> u64 {
        self.selection
            .iter()
            .flatten()
            .map(FileHandle::size)
            .sum()
    }

    /// Apply one interaction and update the state accordingly.
    pub fn apply(&mut self, event: WidgetEvent<F>) {
        match event {
            WidgetEvent::FilesChosen(files) | WidgetEvent::Drop(files) => {
                self.highlight = false;
                self.stage(files);
            }
            WidgetEvent::DragEnter | WidgetEvent::DragOver => self.highlight = true,
            WidgetEvent::DragLeave => self.highlight = false,
            WidgetEvent::Clear => {
                if self.in_flight.is_some() {
                    log::debug!("Ignoring clear while a request is in flight");
                    return;
                }
                self.selection = None;
                self.last_error = None;
            }
            WidgetEvent::Progress(progress) => {
                if self.in_flight.is_none() {
                    log::debug!("Ignoring stale progress event ({})", progress);
                    return;
                }
                if !self.sent_is_staged {
                    return;
                }
                self.progress = progress;
                if progress.is_complete() {
                    // Files stay in `in_flight` until the request settles.
                    self.selection = None;
                    self.sent_is_staged = false;
                }
            }
            WidgetEvent::UploadSucceeded => {
                self.in_flight = None;
                if self.sent_is_staged {
                    self.selection = None;
                    self.sent_is_staged = false;
                }
                self.progress = if self.selection.is_none() {
                    UploadProgress::COMPLETE
                } else {
                    UploadProgress::IDLE
                };
            }
            WidgetEvent::UploadFailed(message) => {
                let sent = self.in_flight.take();
                if self.selection.is_none() {
                    self.selection = sent;
                }
                self.sent_is_staged = false;
                self.progress = UploadProgress::IDLE;
                self.last_error = Some(message);
            }
        }
    }

    /// Start an upload of the current selection.
    ///
    /// Returns the files to send, or `None` when there is nothing staged
    /// or another request has not settled yet.
    pub fn begin_upload(&mut self) -> Option<Vec<F>> {
        if self.in_flight.is_some() {
            log::warn!("Upload already in flight, ignoring");
            return None;
        }
        let files = self.selection.clone().filter(|files| !files.is_empty())?;
        self.progress = UploadProgress::IDLE;
        self.last_error = None;
        self.in_flight = Some(files.clone());
        self.sent_is_staged = true;
        Some(files)
    }

    /// Text of the upload button.
    pub fn upload_button_label(&self) -> String {
        if self.is_uploading() {
            format!("Uploading...  ( {} )", self.progress)
        } else {
            "Upload".to_string()
        }
    }

    /// CSS classes of the drop target.
    pub fn dropzone_class(&self) -> &'static str {
        if self.highlight {
            "dropzone dropzone--highlight"
        } else {
            "dropzone"
        }
    }

    fn stage(&mut self, files: Vec<F>) {
        if files.is_empty() {
            return;
        }
        if self.in_flight.is_some() && !self.progress.is_complete() {
            log::debug!("Ignoring {} file(s) while uploading", files.len());
            return;
        }
        log::debug!("Staged {} file(s)", files.len());
        self.selection = Some(files);
        self.sent_is_staged = false;
        self.progress = UploadProgress::IDLE;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct MemFile {
        name: &'static str,
        content: Vec<u8>,
    }

    impl FileHandle for MemFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn size(&self) -> u64 {
            self.content.len() as u64
        }
    }

    fn file(name: &'static str, len: usize) -> MemFile {
        MemFile {
            name,
            content: vec![0; len],
        }
    }

    fn two_files() -> Vec<MemFile> {
        vec![file("a.txt", 10), file("b.txt", 20)]
    }

    fn progress(fraction: f64) -> WidgetEvent<MemFile> {
        WidgetEvent::Progress(UploadProgress::from_fraction(fraction))
    }

    fn reviewing() -> UploadWidget<MemFile> {
        let mut widget = UploadWidget::new();
        widget.apply(WidgetEvent::FilesChosen(two_files()));
        widget
    }

    #[test]
    fn starts_idle() {
        let widget = UploadWidget::<MemFile>::new();
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(widget.selection().is_none());
        assert!(!widget.is_highlighted());
        assert_eq!(widget.progress(), UploadProgress::IDLE);
        assert_eq!(widget.dropzone_class(), "dropzone");
    }

    #[test]
    fn choosing_files_moves_to_reviewing() {
        let widget = reviewing();
        assert_eq!(widget.phase(), Phase::Reviewing);
        assert_eq!(widget.selection().map(|files| files.len()), Some(2));
        assert_eq!(widget.total_bytes(), 30);
        assert_eq!(widget.upload_button_label(), "Upload");
    }

    #[test]
    fn empty_choice_is_ignored() {
        let mut widget = UploadWidget::<MemFile>::new();
        widget.apply(WidgetEvent::FilesChosen(vec![]));
        assert_eq!(widget.phase(), Phase::Idle);

        let mut widget = reviewing();
        widget.apply(WidgetEvent::FilesChosen(vec![]));
        assert_eq!(widget.selection(), Some(two_files().as_slice()));
    }

    #[test]
    fn empty_drop_keeps_previous_selection() {
        let mut widget = UploadWidget::<MemFile>::new();
        widget.apply(WidgetEvent::DragEnter);
        widget.apply(WidgetEvent::Drop(vec![]));
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(!widget.is_highlighted());

        let mut widget = reviewing();
        widget.apply(WidgetEvent::Drop(vec![]));
        assert_eq!(widget.selection(), Some(two_files().as_slice()));
    }

    #[test]
    fn drop_replaces_selection_wholesale() {
        let mut widget = reviewing();
        widget.apply(WidgetEvent::DragOver);
        widget.apply(WidgetEvent::Drop(vec![file("c.png", 5)]));
        assert_eq!(widget.selection(), Some([file("c.png", 5)].as_slice()));
        assert!(!widget.is_highlighted());
    }

    #[test]
    fn drag_enter_and_leave_toggle_highlight_only() {
        let mut widget = UploadWidget::<MemFile>::new();
        widget.apply(WidgetEvent::DragEnter);
        assert!(widget.is_highlighted());
        assert_eq!(widget.dropzone_class(), "dropzone dropzone--highlight");
        widget.apply(WidgetEvent::DragLeave);
        assert!(!widget.is_highlighted());
        assert!(widget.selection().is_none());

        let mut widget = reviewing();
        widget.apply(WidgetEvent::DragOver);
        widget.apply(WidgetEvent::DragLeave);
        assert_eq!(widget.selection().map(|files| files.len()), Some(2));
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut widget = reviewing();
        widget.apply(WidgetEvent::Clear);
        assert_eq!(widget.phase(), Phase::Idle);
        assert_eq!(widget.progress(), UploadProgress::IDLE);
    }

    #[test]
    fn successful_upload_walks_back_to_idle() {
        let mut widget = reviewing();
        let sent = widget.begin_upload().expect("files staged");
        assert_eq!(sent.len(), 2);
        assert!(!widget.is_uploading());

        widget.apply(progress(0.0));
        assert!(!widget.is_uploading());
        widget.apply(progress(0.45));
        assert!(widget.is_uploading());
        assert_eq!(widget.phase(), Phase::Uploading);
        assert_eq!(widget.upload_button_label(), "Uploading...  ( 45% )");

        widget.apply(progress(1.0));
        assert!(!widget.is_uploading());
        assert!(widget.selection().is_none());
        assert_eq!(widget.phase(), Phase::Done);
        assert!(widget.phase().shows_dropzone());

        widget.apply(WidgetEvent::UploadSucceeded);
        assert!(!widget.has_request_in_flight());
        assert_eq!(widget.phase(), Phase::Done);
        assert_eq!(widget.progress(), UploadProgress::COMPLETE);
        assert!(widget.selection().is_none());
    }

    #[test]
    fn success_below_full_progress_still_settles() {
        let mut widget = reviewing();
        widget.begin_upload();
        widget.apply(progress(0.99));
        assert!(widget.is_uploading());

        widget.apply(WidgetEvent::UploadSucceeded);
        assert!(!widget.is_uploading());
        assert!(!widget.has_request_in_flight());
        assert!(widget.selection().is_none());
        assert_eq!(widget.progress(), UploadProgress::COMPLETE);
        assert_eq!(widget.phase(), Phase::Done);

        widget.apply(WidgetEvent::Drop(vec![file("next.txt", 3)]));
        assert_eq!(widget.phase(), Phase::Reviewing);
    }

    #[test]
    fn success_without_progress_events_clears_selection() {
        let mut widget = UploadWidget::new();
        widget.apply(WidgetEvent::FilesChosen(vec![file("a.txt", 10)]));
        widget.begin_upload();

        widget.apply(WidgetEvent::UploadSucceeded);
        assert!(widget.selection().is_none());
        assert_eq!(widget.progress(), UploadProgress::COMPLETE);
        assert_eq!(widget.phase(), Phase::Done);
    }

    #[test]
    fn drop_before_first_progress_event_is_ignored() {
        let mut widget = UploadWidget::new();
        widget.apply(WidgetEvent::FilesChosen(vec![file("a.txt", 10)]));
        widget.begin_upload();
        widget.apply(WidgetEvent::Drop(vec![file("late.bin", 1)]));
        widget.apply(WidgetEvent::FilesChosen(vec![file("later.bin", 2)]));
        assert_eq!(widget.selection(), Some([file("a.txt", 10)].as_slice()));

        widget.apply(progress(0.5));
        widget.apply(progress(0.7));
        assert_eq!(widget.phase(), Phase::Uploading);
        assert_eq!(widget.selection(), Some([file("a.txt", 10)].as_slice()));

        widget.apply(WidgetEvent::UploadSucceeded);
        assert!(widget.selection().is_none());
        assert!(!widget.is_uploading());
        assert_eq!(widget.phase(), Phase::Done);
    }

    #[test]
    fn network_error_keeps_selection_for_retry() {
        let mut widget = reviewing();
        widget.begin_upload();
        widget.apply(progress(0.3));
        widget.apply(WidgetEvent::UploadFailed("Network error: offline".into()));

        assert_eq!(widget.progress(), UploadProgress::IDLE);
        assert_eq!(widget.phase(), Phase::Reviewing);
        assert_eq!(widget.selection(), Some(two_files().as_slice()));
        assert_eq!(widget.last_error(), Some("Network error: offline"));

        assert!(widget.begin_upload().is_some());
        assert_eq!(widget.last_error(), None);
    }

    #[test]
    fn failure_after_full_transfer_restores_selection() {
        let mut widget = reviewing();
        widget.begin_upload();
        widget.apply(progress(1.0));
        assert!(widget.selection().is_none());

        widget.apply(WidgetEvent::UploadFailed("Server error (500)".into()));
        assert_eq!(widget.phase(), Phase::Reviewing);
        assert_eq!(widget.selection(), Some(two_files().as_slice()));
    }

    #[test]
    fn overlapping_upload_is_rejected() {
        let mut widget = reviewing();
        assert!(widget.begin_upload().is_some());
        assert!(widget.begin_upload().is_none());
        widget.apply(WidgetEvent::UploadSucceeded);
        assert!(!widget.has_request_in_flight());
        assert_eq!(widget.phase(), Phase::Done);
        assert!(widget.begin_upload().is_none());
    }

    #[test]
    fn nothing_to_upload_without_selection() {
        let mut widget = UploadWidget::<MemFile>::new();
        assert!(widget.begin_upload().is_none());
        assert!(!widget.has_request_in_flight());
    }

    #[test]
    fn progress_before_upload_is_ignored() {
        let mut widget = reviewing();
        widget.apply(progress(0.5));
        assert!(!widget.is_uploading());
        assert_eq!(widget.phase(), Phase::Reviewing);
    }

    #[test]
    fn clear_and_drop_are_ignored_mid_upload() {
        let mut widget = reviewing();
        widget.begin_upload();
        widget.apply(progress(0.2));
        widget.apply(WidgetEvent::Clear);
        widget.apply(WidgetEvent::Drop(vec![file("late.bin", 1)]));
        assert_eq!(widget.selection(), Some(two_files().as_slice()));
        assert!(widget.is_uploading());
    }

    #[test]
    fn new_selection_while_settling_survives_success() {
        let mut widget = reviewing();
        widget.begin_upload();
        widget.apply(progress(1.0));
        widget.apply(WidgetEvent::Drop(vec![file("next.txt", 3)]));
        assert_eq!(widget.phase(), Phase::Reviewing);

        widget.apply(WidgetEvent::UploadSucceeded);
        assert_eq!(widget.selection(), Some([file("next.txt", 3)].as_slice()));
        assert_eq!(widget.progress(), UploadProgress::IDLE);
        assert_eq!(widget.phase(), Phase::Reviewing);
        assert!(widget.begin_upload().is_some());
    }

    #[test]
    fn failure_while_settling_keeps_newer_selection() {
        let mut widget = reviewing();
        widget.begin_upload();
        widget.apply(progress(1.0));
        widget.apply(WidgetEvent::FilesChosen(vec![file("next.txt", 3)]));

        widget.apply(WidgetEvent::UploadFailed("Server error (502)".into()));
        assert_eq!(widget.selection(), Some([file("next.txt", 3)].as_slice()));
        assert_eq!(widget.phase(), Phase::Reviewing);
        assert!(!widget.has_request_in_flight());
    }

    #[test]
    fn progress_stays_in_bounds() {
        let mut widget = reviewing();
        widget.begin_upload();
        for fraction in [-1.0, 0.0, 0.333, 0.999, 1.0, 2.5, f64::NAN] {
            widget.apply(progress(fraction));
            assert!(widget.progress().percent() <= 100);
        }
    }
}

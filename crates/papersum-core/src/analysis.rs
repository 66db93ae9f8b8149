//! Analysis flow: the text buffer, loading flag, and last result.
//!
//! Unlike search, only one analysis may be pending at a time; `begin`
//! refuses while loading. Outcomes are reported through the [`Notifier`].

use crate::AnalysisResult;
use crate::api::{ApiError, PaperApi};
use crate::ingest::{self, FileCandidate, IngestError};
use crate::notify::{Notification, Notifier};

/// An analysis request that has been started and awaits its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct AnalysisController {
    text: String,
    result: Option<AnalysisResult>,
    loading: bool,
    next_id: u64,
    pending_id: Option<u64>,
}

impl AnalysisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether [`begin`](Self::begin) would start a request.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.text.trim().is_empty()
    }

    /// Replace the whole buffer.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Delete the last character, if any.
    pub fn delete_char(&mut self) {
        self.text.pop();
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    /// Start analyzing the current buffer. `None` when the buffer is blank or
    /// a request is already pending.
    pub fn begin(&mut self) -> Option<AnalysisTicket> {
        if !self.can_submit() {
            return None;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.pending_id = Some(id);
        self.loading = true;
        Some(AnalysisTicket {
            id,
            text: self.text.clone(),
        })
    }

    /// Apply the response for ticket `id`. Returns `false` if `id` is not the
    /// pending request.
    pub fn complete(
        &mut self,
        id: u64,
        outcome: Result<AnalysisResult, ApiError>,
        notifier: &mut Notifier,
    ) -> bool {
        if self.pending_id != Some(id) {
            tracing::debug!(id, pending = ?self.pending_id, "ignoring unexpected analysis response");
            return false;
        }
        self.pending_id = None;
        self.loading = false;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                notifier.push(Notification::success(
                    "Analysis complete",
                    "Text has been analyzed successfully.",
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "error analyzing text");
                notifier.push(Notification::error(
                    "Error",
                    "Failed to analyze text. Please try again.",
                ));
            }
        }
        true
    }

    /// Begin, await `api`, and complete in one step. Returns `false` when
    /// nothing was sent.
    pub async fn submit(&mut self, api: &dyn PaperApi, notifier: &mut Notifier) -> bool {
        let Some(ticket) = self.begin() else {
            return false;
        };
        let outcome = api.analyze(&ticket.text).await;
        self.complete(ticket.id, outcome, notifier)
    }

    /// Type gate for a picked file. On rejection, notifies and leaves the
    /// buffer alone.
    pub fn check_file(&self, candidate: &FileCandidate, notifier: &mut Notifier) -> bool {
        match ingest::check_file_type(candidate) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "rejected file");
                notifier.push(Notification::error(
                    "Invalid file type",
                    "Please upload a text file (UTF-8 encoded)",
                ));
                false
            }
        }
    }

    /// Apply the result of reading `name`: replace the buffer on success,
    /// notify either way.
    pub fn apply_ingest(
        &mut self,
        name: &str,
        read: Result<String, IngestError>,
        notifier: &mut Notifier,
    ) {
        match read {
            Ok(content) => {
                self.text = content;
                notifier.push(Notification::success(
                    "File uploaded",
                    format!("{name} has been loaded successfully."),
                ));
            }
            Err(e) => {
                tracing::error!(file = name, error = %e, "error reading file");
                notifier.push(Notification::error(
                    "Error reading file",
                    "Failed to read the uploaded file",
                ));
            }
        }
    }

    /// Gate, read, and apply `candidate` in one step.
    pub async fn ingest_file(&mut self, candidate: &FileCandidate, notifier: &mut Notifier) {
        if !self.check_file(candidate, notifier) {
            return;
        }
        let read = ingest::read_text_file(&candidate.path).await;
        self.apply_ingest(&candidate.name, read, notifier);
    }
}

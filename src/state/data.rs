/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the orchestrator and the views.
use chrono::{DateTime, Local};
use iced::widget::image::Handle;
use std::path::PathBuf;

use crate::intake::loader;

/// Text shown when the backend replies without a usable `answer` field
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer received from the backend.";

/// The image currently selected for questioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    /// Full path to the file on disk
    pub path: PathBuf,
    /// Filename only (e.g., "cat.jpg")
    pub name: String,
    /// MIME type guessed from the extension
    pub mime: &'static str,
}

impl PendingImage {
    pub fn from_path(path: PathBuf) -> Self {
        let name = loader::file_name(&path);
        let mime = loader::mime_type(&path);
        Self { path, name, mime }
    }
}

/// What the answer area shows. Exactly one of these holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnswerState {
    #[default]
    Absent,
    Loading,
    Error(String),
    Answer(String),
}

/// Unique, strictly increasing history entry identifier
///
/// Values are milliseconds since the Unix epoch at creation time, bumped
/// when two entries land in the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub i64);

/// One completed question/answer exchange
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// Thumbnail built from the bytes that were uploaded
    pub thumbnail: Handle,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Local>,
}

/// Request payload handed to the backend client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub image: PendingImage,
    pub question: String,
    /// Selection generation at submit time
    pub generation: u64,
}

/// A successful backend exchange
#[derive(Debug, Clone)]
pub struct Reply {
    /// Answer text, already defaulted to the placeholder if missing
    pub answer: String,
    /// Exact bytes that were uploaded, reused for the history thumbnail
    pub image_bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_image_from_path() {
        let image = PendingImage::from_path(PathBuf::from("/home/me/cat.jpg"));
        assert_eq!(image.name, "cat.jpg");
        assert_eq!(image.mime, "image/jpeg");
    }

    #[test]
    fn test_answer_state_default_is_absent() {
        assert_eq!(AnswerState::default(), AnswerState::Absent);
    }
}

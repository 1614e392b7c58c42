/// The orchestrator: owns every piece of mutable state the views read
///
/// Views never touch this directly. They emit messages, `main.rs` turns
/// those into calls here, and the only side effect the session asks for is
/// a single `SubmitRequest` at a time.
use chrono::Local;
use iced::widget::image::Handle;

use super::data::{AnswerState, PendingImage, Reply, SubmitRequest};
use super::history::HistoryList;
use crate::error::{BackendError, SubmitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// How a finished request turned out, for notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Answered,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<PendingImage>,
    question: String,
    answer: AnswerState,
    history: HistoryList,
    phase: Phase,
    /// Bumped whenever the selection changes, so late replies can tell
    /// whether they still belong to what's on screen
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new image was chosen. Question and answer start over; history stays.
    pub fn select_image(&mut self, image: PendingImage) {
        tracing::info!(name = %image.name, path = %image.path.display(), "image selected");
        self.image = Some(image);
        self.reset_for_selection();
    }

    /// The intake's clear button was pressed
    pub fn clear_image(&mut self) {
        self.image = None;
        self.reset_for_selection();
    }

    pub fn set_question(&mut self, question: String) {
        self.question = question;
    }

    /// Whether the submit control should be live
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle && self.image.is_some() && !self.question.trim().is_empty()
    }

    /// Start a submission, producing the one request to send
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SubmitError> {
        if self.phase == Phase::Submitting {
            return Err(SubmitError::AlreadySubmitting);
        }

        let image = match &self.image {
            Some(image) if !self.question.trim().is_empty() => image.clone(),
            _ => return Err(SubmitError::MissingInput),
        };

        self.phase = Phase::Submitting;
        self.answer = AnswerState::Loading;

        Ok(SubmitRequest {
            image,
            question: self.question.clone(),
            generation: self.generation,
        })
    }

    /// Apply the backend's verdict for `request`
    pub fn finish_submit(
        &mut self,
        request: &SubmitRequest,
        result: Result<Reply, BackendError>,
    ) -> Completion {
        self.phase = Phase::Idle;
        let current = request.generation == self.generation;

        match result {
            Ok(reply) => {
                let thumbnail = Handle::from_bytes(reply.image_bytes);
                self.history.push_front(
                    thumbnail,
                    request.question.clone(),
                    reply.answer.clone(),
                    Local::now(),
                );
                if current {
                    self.answer = AnswerState::Answer(reply.answer);
                } else {
                    tracing::debug!("selection changed while request was in flight");
                }
                Completion::Answered
            }
            Err(e) => {
                let detail = e.to_string();
                tracing::warn!(error = %detail, "VQA request failed");
                if current {
                    self.answer = AnswerState::Error(format!("Failed to analyze image: {detail}"));
                }
                Completion::Failed(detail)
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn image(&self) -> Option<&PendingImage> {
        self.image.as_ref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &AnswerState {
        &self.answer
    }

    pub fn history(&self) -> &HistoryList {
        &self.history
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    fn reset_for_selection(&mut self) {
        self.question.clear();
        self.answer = AnswerState::Absent;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::NO_ANSWER_PLACEHOLDER;
    use std::path::PathBuf;

    fn cat() -> PendingImage {
        PendingImage::from_path(PathBuf::from("cat.jpg"))
    }

    fn reply(answer: &str) -> Result<Reply, BackendError> {
        Ok(Reply {
            answer: answer.to_string(),
            image_bytes: vec![1, 2, 3],
        })
    }

    #[test]
    fn test_submit_needs_image() {
        let mut session = Session::new();
        session.set_question("What is this?".into());

        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), Err(SubmitError::MissingInput));
        assert!(!session.is_submitting());
        assert_eq!(session.answer(), &AnswerState::Absent);
    }

    #[test]
    fn test_submit_needs_non_blank_question() {
        let mut session = Session::new();
        session.select_image(cat());
        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), Err(SubmitError::MissingInput));

        session.set_question("   \t\n".into());
        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), Err(SubmitError::MissingInput));
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_selecting_image_resets_question_and_answer() {
        let mut session = Session::new();
        session.select_image(cat());
        session.set_question("What is this?".into());
        let request = session.begin_submit().unwrap();
        session.finish_submit(&request, Err(BackendError::Status(500)));
        assert!(matches!(session.answer(), AnswerState::Error(_)));

        session.select_image(PendingImage::from_path(PathBuf::from("dog.png")));
        assert_eq!(session.question(), "");
        assert_eq!(session.answer(), &AnswerState::Absent);
        assert_eq!(session.image().unwrap().name, "dog.png");
    }

    #[test]
    fn test_successful_exchange() {
        let mut session = Session::new();
        session.select_image(cat());
        assert!(!session.can_submit());

        session.set_question("What is this?".into());
        assert!(session.can_submit());

        let request = session.begin_submit().unwrap();
        assert_eq!(request.question, "What is this?");
        assert_eq!(request.image.name, "cat.jpg");
        assert_eq!(session.answer(), &AnswerState::Loading);
        assert!(session.is_submitting());
        assert!(!session.can_submit());

        let completion = session.finish_submit(&request, reply("A cat."));
        assert_eq!(completion, Completion::Answered);
        assert_eq!(session.answer(), &AnswerState::Answer("A cat.".into()));
        assert!(!session.is_submitting());

        assert_eq!(session.history().len(), 1);
        let entry = session.history().first().unwrap();
        assert_eq!(entry.question, "What is this?");
        assert_eq!(entry.answer, "A cat.");

        // The question survives the submit
        assert_eq!(session.question(), "What is this?");
    }

    #[test]
    fn test_http_failure_leaves_history_alone() {
        let mut session = Session::new();
        session.select_image(cat());
        session.set_question("What is this?".into());
        let request = session.begin_submit().unwrap();

        let completion = session.finish_submit(&request, Err(BackendError::Status(500)));
        assert_eq!(completion, Completion::Failed("HTTP error! status: 500".into()));

        match session.answer() {
            AnswerState::Error(message) => {
                assert!(message.starts_with("Failed to analyze image:"));
                assert!(message.contains("500"));
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert!(session.history().is_empty());
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_placeholder_answer_is_not_an_error() {
        let mut session = Session::new();
        session.select_image(cat());
        session.set_question("What is this?".into());
        let request = session.begin_submit().unwrap();

        session.finish_submit(&request, reply(NO_ANSWER_PLACEHOLDER));
        assert_eq!(
            session.answer(),
            &AnswerState::Answer(NO_ANSWER_PLACEHOLDER.into())
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut session = Session::new();
        session.select_image(cat());
        session.set_question("What is this?".into());
        let request = session.begin_submit().unwrap();

        assert_eq!(session.begin_submit(), Err(SubmitError::AlreadySubmitting));
        assert_eq!(session.answer(), &AnswerState::Loading);

        session.finish_submit(&request, reply("A cat."));
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn test_reselect_during_flight() {
        let mut session = Session::new();
        session.select_image(cat());
        session.set_question("What is this?".into());
        let request = session.begin_submit().unwrap();

        session.select_image(PendingImage::from_path(PathBuf::from("dog.png")));
        assert_eq!(session.answer(), &AnswerState::Absent);
        // Still guarded until the old request resolves
        session.set_question("And this?".into());
        assert!(!session.can_submit());

        session.finish_submit(&request, reply("A cat."));
        assert_eq!(session.answer(), &AnswerState::Absent);
        assert_eq!(session.history().first().unwrap().question, "What is this?");
        assert!(session.can_submit());
    }

    #[test]
    fn test_clear_history_keeps_answer_and_image() {
        let mut session = Session::new();
        session.select_image(cat());
        for question in ["one?", "two?", "three?"] {
            session.set_question(question.into());
            let request = session.begin_submit().unwrap();
            session.finish_submit(&request, reply("yes"));
        }
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().first().unwrap().question, "three?");

        session.clear_history();
        assert!(session.history().is_empty());
        assert_eq!(session.answer(), &AnswerState::Answer("yes".into()));
        assert!(session.image().is_some());
    }

    #[test]
    fn test_clear_image() {
        let mut session = Session::new();
        session.select_image(cat());
        session.set_question("What is this?".into());
        session.clear_image();

        assert!(session.image().is_none());
        assert_eq!(session.question(), "");
        assert_eq!(session.answer(), &AnswerState::Absent);
        assert_eq!(session.begin_submit(), Err(SubmitError::MissingInput));
    }
}

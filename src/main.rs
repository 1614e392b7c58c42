use iced::widget::{column, container, scrollable, text, Column};
use iced::{event, time, window, Alignment, Element, Event, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod backend;
mod config;
mod error;
mod intake;
mod state;
mod ui;

use backend::VqaClient;
use config::Settings;
use error::{BackendError, SubmitError};
use intake::loader;
use state::data::{EntryId, PendingImage, Reply, SubmitRequest};
use state::session::{Completion, Session};
use state::suggestions::Suggestions;
use ui::history_panel::HistoryPanel;
use ui::image_intake::ImageIntake;
use ui::question_input::{self, QuestionView};
use ui::toast::{self, Toasts};

/// How often toast lifetimes are checked while any are visible
const TOAST_TICK: Duration = Duration::from_millis(250);

/// Main application state
struct VisualQa {
    /// Orchestrator state: selection, question, answer, history
    session: Session,
    /// Preview and drag-hover state of the upload area
    intake: ImageIntake,
    /// Suggested questions panel
    suggestions: Suggestions,
    /// Expanded history rows
    history_panel: HistoryPanel,
    toasts: Toasts,
    client: VqaClient,
    settings: Settings,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the upload area
    PickImage,
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// Background read of a selected file finished
    PreviewLoaded(PathBuf, Result<Vec<u8>, String>),
    ClearImage,
    QuestionChanged(String),
    SuggestionPicked(&'static str),
    Submit,
    /// The backend call resolved
    SubmitDone(SubmitRequest, Result<Reply, BackendError>),
    ClearHistory,
    ToggleHistoryEntry(EntryId),
    DismissToast(u64),
    Tick(Instant),
}

impl VisualQa {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let app = Self::with_settings(Settings::load());
        tracing::info!(endpoint = %app.client.endpoint(), "Visual Q&A initialized");

        (app, Task::none())
    }

    fn with_settings(settings: Settings) -> Self {
        VisualQa {
            session: Session::new(),
            intake: ImageIntake::default(),
            suggestions: Suggestions::default(),
            history_panel: HistoryPanel::default(),
            toasts: Toasts::new(settings.toast_duration()),
            client: VqaClient::new(config::DEFAULT_ENDPOINT),
            settings,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", loader::PICKER_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => self.select_image(path),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.intake.set_hovering(true);
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.intake.set_hovering(false);
                Task::none()
            }
            Message::FileDropped(path) => match self.intake.take_drop(path, Instant::now()) {
                Some(path) => self.select_image(path),
                None => Task::none(),
            },
            Message::PreviewLoaded(path, result) => {
                self.intake.preview_loaded(&path, result);
                Task::none()
            }
            Message::ClearImage => {
                self.session.clear_image();
                self.intake.clear();
                Task::none()
            }
            Message::QuestionChanged(question) => {
                self.session.set_question(question);
                Task::none()
            }
            Message::SuggestionPicked(suggestion) => {
                self.session.set_question(suggestion.to_string());
                self.suggestions.dismiss();
                Task::none()
            }
            Message::Submit => self.submit(),
            Message::SubmitDone(request, result) => {
                match self.session.finish_submit(&request, result) {
                    Completion::Answered => self.notify(
                        toast::Kind::Info,
                        "Analysis Complete",
                        "Your image has been analyzed successfully!",
                    ),
                    Completion::Failed(detail) => {
                        self.notify(toast::Kind::Destructive, "Analysis Failed", detail)
                    }
                }
                Task::none()
            }
            Message::ClearHistory => {
                self.session.clear_history();
                self.history_panel.retain_existing(self.session.history());
                self.notify(
                    toast::Kind::Info,
                    "History Cleared",
                    "All previous questions and answers have been removed.",
                );
                Task::none()
            }
            Message::ToggleHistoryEntry(id) => {
                self.history_panel.toggle(id);
                Task::none()
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
            Message::Tick(now) => {
                self.toasts.expire(now);
                Task::none()
            }
        };

        self.suggestions.refresh(
            self.session.image().is_some(),
            self.session.question(),
            self.settings.suggestion_count,
            &mut rand::rng(),
        );

        task
    }

    /// Record a new selection and start reading its preview
    fn select_image(&mut self, path: PathBuf) -> Task<Message> {
        self.session.select_image(PendingImage::from_path(path.clone()));
        self.intake.begin(path.clone());

        Task::perform(
            async move {
                let result = loader::read_bytes(path.clone())
                    .await
                    .map_err(|e| e.to_string());
                (path, result)
            },
            |(path, result)| Message::PreviewLoaded(path, result),
        )
    }

    fn submit(&mut self) -> Task<Message> {
        match self.session.begin_submit() {
            Ok(request) => {
                let client = self.client.clone();
                Task::perform(
                    async move {
                        let result = client.ask(request.clone()).await;
                        (request, result)
                    },
                    |(request, result)| Message::SubmitDone(request, result),
                )
            }
            Err(SubmitError::MissingInput) => {
                self.notify(
                    toast::Kind::Destructive,
                    "Missing Information",
                    SubmitError::MissingInput.to_string(),
                );
                Task::none()
            }
            Err(e @ SubmitError::AlreadySubmitting) => {
                tracing::debug!("ignoring submit: {e}");
                Task::none()
            }
        }
    }

    fn notify(&mut self, kind: toast::Kind, title: &str, body: impl Into<String>) {
        self.toasts.push(kind, title, body, Instant::now());
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Visual Q&A").size(40),
            text("Upload an image and ask questions about it. The model will analyze the visual content and answer.")
                .size(16)
                .style(text::secondary),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let question = question_input::view(QuestionView {
            question: self.session.question(),
            has_image: self.session.image().is_some(),
            can_submit: self.session.can_submit(),
            submitting: self.session.is_submitting(),
            suggestions: self.suggestions.visible(),
        });

        let main_card = column![
            section_title(1, "Upload Image"),
            self.intake.view(self.session.image()),
            section_title(2, "Ask Question"),
            question,
        ]
        .spacing(16)
        .push_maybe(ui::answer_display::view(self.session.answer()));

        let footer = text(format!(
            "Connected to VQA backend at {}",
            self.client.endpoint()
        ))
        .size(12)
        .style(text::secondary);

        let content: Column<Message> = Column::new()
            .push_maybe(self.toasts.view())
            .push(header)
            .push(
                container(main_card)
                    .padding(24)
                    .width(Length::Fill)
                    .style(container::rounded_box),
            )
            .push_maybe(self.history_panel.view(self.session.history()))
            .push(container(footer).center_x(Length::Fill))
            .spacing(24)
            .padding(32)
            .max_width(900);

        scrollable(container(content).center_x(Length::Fill)).into()
    }

    /// File drops always; a clock only while toasts are up
    fn subscription(&self) -> Subscription<Message> {
        let drops = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.toasts.is_empty() {
            drops
        } else {
            Subscription::batch([drops, time::every(TOAST_TICK).map(Message::Tick)])
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn section_title(step: u8, title: &str) -> Element<'_, Message> {
    text(format!("{step}. {title}")).size(22).into()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,visual_qa=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application("Visual Q&A", VisualQa::update, VisualQa::view)
        .subscription(VisualQa::subscription)
        .theme(VisualQa::theme)
        .window_size(Size::new(960.0, 900.0))
        .centered()
        .run_with(VisualQa::new)
}

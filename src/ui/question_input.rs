use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Element, Length};

use crate::Message;

/// What the question field needs from the orchestrator
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub question: &'a str,
    pub has_image: bool,
    pub can_submit: bool,
    pub submitting: bool,
    pub suggestions: Option<&'a [&'static str]>,
}

pub fn view(props: QuestionView<'_>) -> Element<'_, Message> {
    let placeholder = if props.has_image {
        "Ask a question about your image..."
    } else {
        "Upload an image first to ask questions"
    };

    // No input handler means the field is disabled
    let mut input = text_input(placeholder, props.question)
        .padding(12)
        .size(16);
    if props.has_image {
        input = input
            .on_input(Message::QuestionChanged)
            .on_submit(Message::Submit);
    }

    let label = if props.submitting {
        "Analyzing..."
    } else {
        "Ask Question"
    };
    let submit = button(container(text(label)).center_x(Length::Fill))
        .padding(12)
        .width(Length::Fill)
        .style(button::primary)
        .on_press_maybe(props.can_submit.then_some(Message::Submit));

    column![input, submit]
        .spacing(12)
        .push_maybe(props.suggestions.map(suggestion_list))
        .into()
}

fn suggestion_list<'a>(suggestions: &'a [&'static str]) -> Element<'a, Message> {
    let items = suggestions.iter().map(|&suggestion| {
        button(text(suggestion).size(14))
            .padding(10)
            .width(Length::Fill)
            .style(button::secondary)
            .on_press(Message::SuggestionPicked(suggestion))
            .into()
    });

    column![
        text("Suggested questions:").size(14).style(text::secondary),
        Column::with_children(items).spacing(8),
    ]
    .spacing(8)
    .into()
}

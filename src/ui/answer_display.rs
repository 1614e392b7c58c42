use iced::widget::{column, container, text};
use iced::{Element, Length};

use crate::state::data::AnswerState;
use crate::Message;

/// Render the answer area. `None` when there's nothing to show.
pub fn view(answer: &AnswerState) -> Option<Element<'_, Message>> {
    let body: Element<'_, Message> = match answer {
        AnswerState::Absent => return None,
        AnswerState::Loading => text("Analyzing your image...").style(text::primary).into(),
        AnswerState::Error(message) => column![
            text("Error occurred").style(text::danger),
            text(message).size(14).style(text::danger),
        ]
        .spacing(4)
        .into(),
        AnswerState::Answer(answer) => text(answer).into(),
    };

    let panel = container(body)
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box);

    Some(column![text("Answer").size(20), panel].spacing(10).into())
}

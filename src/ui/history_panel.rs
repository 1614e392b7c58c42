use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, ContentFit, Element, Length, Padding};
use std::collections::HashSet;

use crate::state::data::{EntryId, HistoryEntry};
use crate::state::history::HistoryList;
use crate::Message;

/// Characters kept in a collapsed row before the ellipsis
const SUMMARY_CHARS: usize = 80;
const THUMBNAIL_SIZE: f32 = 48.0;

/// Which history rows are expanded. Purely local to the panel.
#[derive(Debug, Default)]
pub struct HistoryPanel {
    expanded: HashSet<EntryId>,
}

impl HistoryPanel {
    pub fn toggle(&mut self, id: EntryId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Forget ids that are no longer in the list
    pub fn retain_existing(&mut self, history: &HistoryList) {
        let live: HashSet<EntryId> = history.entries().iter().map(|e| e.id).collect();
        self.expanded.retain(|id| live.contains(id));
    }

    pub fn view<'a>(&'a self, history: &'a HistoryList) -> Option<Element<'a, Message>> {
        if history.is_empty() {
            return None;
        }

        let header = row![
            text(format!("Recent Questions ({})", history.len()))
                .size(20)
                .width(Length::Fill),
            button(text("Clear All").size(14))
                .style(button::danger)
                .on_press(Message::ClearHistory),
        ]
        .align_y(Alignment::Center);

        let rows = history
            .entries()
            .iter()
            .map(|entry| self.entry_view(entry));

        Some(
            column![header, Column::with_children(rows).spacing(10)]
                .spacing(12)
                .into(),
        )
    }

    fn entry_view<'a>(&self, entry: &'a HistoryEntry) -> Element<'a, Message> {
        let expanded = self.is_expanded(entry.id);

        let mut summary = column![
            text(truncate(&entry.question, SUMMARY_CHARS)).size(14),
            text(entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string())
                .size(12)
                .style(text::secondary),
        ]
        .spacing(4)
        .width(Length::Fill);
        if !expanded {
            summary = summary.push(
                text(truncate(&entry.answer, SUMMARY_CHARS))
                    .size(14)
                    .style(text::secondary),
            );
        }

        let toggle = button(
            row![
                image(entry.thumbnail.clone())
                    .width(Length::Fixed(THUMBNAIL_SIZE))
                    .height(Length::Fixed(THUMBNAIL_SIZE))
                    .content_fit(ContentFit::Cover),
                summary,
                text(if expanded { "▲" } else { "▼" }).size(14),
            ]
            .spacing(12)
            .align_y(Alignment::Start),
        )
        .padding(12)
        .width(Length::Fill)
        .style(button::text)
        .on_press(Message::ToggleHistoryEntry(entry.id));

        let details = expanded.then(|| {
            column![
                text("Question:").size(14).style(text::secondary),
                text(&entry.question).size(14),
                text("Answer:").size(14).style(text::secondary),
                text(&entry.answer).size(14),
            ]
            .spacing(6)
            .padding(Padding {
                top: 0.0,
                right: 12.0,
                bottom: 12.0,
                left: 12.0,
            })
        });

        container(column![toggle].push_maybe(details))
            .width(Length::Fill)
            .style(container::bordered_box)
            .into()
    }
}

/// Cut `text` to at most `max` characters, adding an ellipsis when cut
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}…", text[..end].trim_end()),
        None => text.to_string(),
    }
}

/// Transient notifications
///
/// Shown once, dismissed automatically after a fixed lifetime or on click.
use iced::widget::{button, column, container, text, Column};
use iced::{Element, Length, Theme};
use std::time::{Duration, Instant};

use crate::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: Kind,
    pub title: String,
    pub body: String,
    shown_at: Instant,
}

#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    pub fn push(
        &mut self,
        kind: Kind,
        title: impl Into<String>,
        body: impl Into<String>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            title: title.into(),
            body: body.into(),
            shown_at: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Drop toasts that have outlived their lifetime
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.items
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < lifetime);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn view(&self) -> Option<Element<'_, Message>> {
        if self.items.is_empty() {
            return None;
        }

        let cards = self.items.iter().map(|toast| {
            let kind = toast.kind;
            button(
                column![
                    text(&toast.title).size(16),
                    text(&toast.body).size(14),
                ]
                .spacing(4),
            )
            .padding(12)
            .width(Length::Fill)
            .style(move |theme: &Theme, status: button::Status| match kind {
                Kind::Info => button::secondary(theme, status),
                Kind::Destructive => button::danger(theme, status),
            })
            .on_press(Message::DismissToast(toast.id))
            .into()
        });

        Some(
            container(Column::with_children(cards).spacing(8))
                .width(Length::Fill)
                .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        let now = Instant::now();
        let first = toasts.push(Kind::Info, "History Cleared", "gone", now);
        let second = toasts.push(Kind::Destructive, "Analysis Failed", "HTTP 500", now);
        assert_ne!(first, second);
        assert_eq!(toasts.items().len(), 2);

        toasts.dismiss(first);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].title, "Analysis Failed");
        assert_eq!(toasts.items()[0].kind, Kind::Destructive);
    }

    #[test]
    fn test_expire() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        let start = Instant::now();
        toasts.push(Kind::Info, "old", "", start);
        toasts.push(Kind::Info, "new", "", start + Duration::from_secs(3));

        toasts.expire(start + Duration::from_secs(2));
        assert_eq!(toasts.items().len(), 2);

        toasts.expire(start + Duration::from_secs(5));
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].title, "new");

        toasts.expire(start + Duration::from_secs(10));
        assert!(toasts.is_empty());
        assert!(toasts.view().is_none());
    }
}

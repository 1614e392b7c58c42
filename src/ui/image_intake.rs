use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, mouse_area, row, text};
use iced::{Alignment, Background, Border, Color, ContentFit, Element, Length, Theme};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::intake::loader;
use crate::state::data::PendingImage;
use crate::Message;

/// Drop events closer together than this belong to one multi-file drop
const DROP_BATCH_WINDOW: Duration = Duration::from_millis(250);

/// Local display state of the intake area.
///
/// The orchestrator only knows which file is selected; the preview and the
/// hover highlight live here.
#[derive(Debug, Default)]
pub struct ImageIntake {
    /// Path whose bytes we're waiting on or showing
    current: Option<PathBuf>,
    preview: Option<Handle>,
    hovering: bool,
    last_drop: Option<Instant>,
}

impl ImageIntake {
    /// A file was selected; forget the old preview and wait for the new one
    pub fn begin(&mut self, path: PathBuf) {
        self.current = Some(path);
        self.preview = None;
    }

    /// Background read finished
    pub fn preview_loaded(&mut self, path: &Path, result: Result<Vec<u8>, String>) {
        if self.current.as_deref() != Some(path) {
            tracing::debug!(path = %path.display(), "discarding stale preview");
            return;
        }

        match result {
            Ok(bytes) => self.preview = Some(Handle::from_bytes(bytes)),
            Err(e) => tracing::warn!(path = %path.display(), "no preview: {e}"),
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.preview = None;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Decide what to do with one dropped file.
    ///
    /// Only the first file of a drop counts, and it's dropped silently when
    /// it isn't an image.
    pub fn take_drop(&mut self, path: PathBuf, now: Instant) -> Option<PathBuf> {
        self.hovering = false;

        let same_batch = self
            .last_drop
            .is_some_and(|last| now.saturating_duration_since(last) < DROP_BATCH_WINDOW);
        self.last_drop = Some(now);
        if same_batch {
            tracing::debug!(path = %path.display(), "ignoring extra file in drop");
            return None;
        }

        loader::accept_drop(path)
    }

    #[cfg(test)]
    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    pub fn view<'a>(&'a self, selected: Option<&'a PendingImage>) -> Element<'a, Message> {
        match selected {
            Some(selected) => self.view_selected(selected),
            None => self.view_drop_zone(),
        }
    }

    fn view_drop_zone(&self) -> Element<'_, Message> {
        let hovering = self.hovering;
        let prompt = column![
            text("Upload an image").size(20),
            text("Drag and drop or click to select")
                .size(14)
                .style(text::secondary),
            text("Supports JPG, PNG, GIF and other common formats")
                .size(12)
                .style(text::secondary),
        ]
        .spacing(6)
        .align_x(Alignment::Center);

        let zone = container(prompt)
            .padding(32)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(move |theme: &Theme| drop_zone_style(theme, hovering));

        mouse_area(zone).on_press(Message::PickImage).into()
    }

    fn view_selected<'a>(&'a self, selected: &'a PendingImage) -> Element<'a, Message> {
        let preview: Element<'a, Message> = match &self.preview {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(256.0))
                .content_fit(ContentFit::Contain)
                .into(),
            None => container(text("No preview available").style(text::secondary))
                .padding(24)
                .center_x(Length::Fill)
                .into(),
        };

        let footer = row![
            text(&selected.name).size(14).width(Length::Fill),
            button(text("Remove").size(14))
                .style(button::danger)
                .on_press(Message::ClearImage),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        container(column![preview, footer].spacing(10))
            .padding(10)
            .width(Length::Fill)
            .style(container::bordered_box)
            .into()
    }
}

fn drop_zone_style(theme: &Theme, hovering: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (border_color, background): (Color, Option<Background>) = if hovering {
        (palette.primary.strong.color, Some(palette.primary.weak.color.into()))
    } else {
        (palette.background.strong.color, None)
    };

    container::Style {
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 8.0.into(),
        },
        background,
        text_color: Some(Color {
            a: 0.9,
            ..palette.background.base.text
        }),
        ..container::Style::default()
    }
}

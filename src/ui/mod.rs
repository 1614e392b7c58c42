/// Views for the four regions of the window, plus toasts
///
/// Each view borrows what it needs from the session and emits
/// `crate::Message`s; none of them mutate shared state.

pub mod answer_display;
pub mod history_panel;
pub mod image_intake;
pub mod question_input;
pub mod toast;

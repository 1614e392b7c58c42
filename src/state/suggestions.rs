/// Canned questions offered when a fresh image has no question yet
use rand::seq::IndexedRandom;
use rand::Rng;

pub const SAMPLE_QUESTIONS: [&str; 8] = [
    "What objects are visible in this image?",
    "Describe the main subject of this image.",
    "What colors are prominent in this image?",
    "What is happening in this scene?",
    "What is the setting or location shown?",
    "Are there any people in this image?",
    "What is the mood or atmosphere of this image?",
    "What details can you observe in the background?",
];

/// Suggestion panel state for the question field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// `Some` while the panel is shown
    shown: Option<Vec<&'static str>>,
}

impl Suggestions {
    /// Re-evaluate after the image or question changed.
    ///
    /// A new draw happens on each transition into "image present, question
    /// empty"; the panel hides as soon as that stops holding.
    pub fn refresh<R: Rng + ?Sized>(
        &mut self,
        has_image: bool,
        question: &str,
        count: usize,
        rng: &mut R,
    ) {
        let wanted = has_image && question.is_empty();
        match (wanted, self.shown.is_some()) {
            (true, false) => self.shown = Some(draw(count, rng)),
            (false, true) => self.shown = None,
            _ => {}
        }
    }

    /// A suggestion was picked; the panel goes away
    pub fn dismiss(&mut self) {
        self.shown = None;
    }

    pub fn visible(&self) -> Option<&[&'static str]> {
        self.shown.as_deref()
    }
}

/// Draw `count` distinct questions from the pool
pub fn draw<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<&'static str> {
    SAMPLE_QUESTIONS
        .choose_multiple(rng, count)
        .copied()
        .collect()
}

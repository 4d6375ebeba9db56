//! What the front end should currently show.

use crate::models::Question;

use super::state::Ending;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Intro,
    Quiz,
    Celebration,
    Final(Ending),
}

/// Snapshot of every visible element, kept up to date by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub panel: Panel,
    /// Question currently on screen with its answer controls.
    pub question: Option<Question>,
    /// Bumped every time a question is presented.
    pub presented: u64,
    pub level: u8,
    pub score: u32,
    /// Seconds left, shown only while a countdown runs.
    pub timer: Option<u32>,
    pub ten_correct_popup: bool,
    pub muted: bool,
    pub confirm_restart: bool,
}

impl View {
    pub fn new(level: u8, score: u32) -> Self {
        Self {
            panel: Panel::Intro,
            question: None,
            presented: 0,
            level,
            score,
            timer: None,
            ten_correct_popup: false,
            muted: false,
            confirm_restart: false,
        }
    }

    pub fn choice_count(&self) -> usize {
        self.question
            .as_ref()
            .map_or(0, |question| question.choices.len())
    }
}

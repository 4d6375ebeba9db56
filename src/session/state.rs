//! Session state owned by the controller.

use thiserror::Error;

use crate::models::{Progress, QuestionRecord};

use super::rules::COUNTDOWN_SECONDS;
use super::timer::TimerId;

/// Which of the two final screens the game ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Good,
    Bad,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Intro screen shown, nothing loaded yet.
    Intro,
    Playing,
    /// Waiting out the 100-question interlude before the next level.
    Celebrating,
    Finished(Ending),
}

/// A running countdown for a timed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub id: TimerId,
    pub remaining: u32,
}

impl Countdown {
    pub fn new(id: TimerId) -> Self {
        Self {
            id,
            remaining: COUNTDOWN_SECONDS,
        }
    }

    /// Counts one second down. Returns true once time is up.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Handler preconditions that did not hold. The command is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardViolation {
    #[error("no question at index {index}")]
    NoCurrentQuestion { index: usize },
    #[error("question at index {index} is malformed")]
    MalformedQuestion { index: usize },
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub level: u8,
    pub question_index: usize,
    pub score: u32,
    /// Question set of the current level, in quiz order.
    pub questions: Vec<QuestionRecord>,
    pub muted: bool,
    pub countdown: Option<Countdown>,
    pub phase: Phase,
}

impl SessionState {
    pub fn from_progress(progress: Progress) -> Self {
        Self {
            level: progress.level,
            question_index: 0,
            score: progress.score,
            questions: Vec::new(),
            muted: false,
            countdown: None,
            phase: Phase::Intro,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.score, self.level)
    }

    pub fn current_record(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.question_index)
    }

    pub fn has_more_questions(&self) -> bool {
        self.question_index < self.questions.len()
    }
}

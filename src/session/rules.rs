//! Fixed thresholds of the ten-level game.

use std::time::Duration;

use super::state::Ending;

pub const COUNTDOWN_SECONDS: u32 = 9;
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
pub const TEN_CORRECT_POPUP: Duration = Duration::from_millis(1500);
pub const CELEBRATION_DELAY: Duration = Duration::from_secs(10);

pub const QUESTIONS_PER_LEVEL: usize = 100;
pub const MAX_SCORE: u32 = 1000;
pub const GOOD_ENDING_SCORE: u32 = 950;

/// Whether the question at `index` of `level` runs a countdown.
///
/// The ordinal counts ten questions per level, so only every 10th question
/// of a level is timed.
pub fn is_timed(level: u8, index: usize) -> bool {
    let ordinal = (usize::from(level) - 1) * 10 + index + 1;
    ordinal % 10 == 0
}

/// Game-wide 1-based ordinal of the question being answered.
pub fn answered_ordinal(level: u8, index: usize) -> usize {
    level_offset(level) + index + 1
}

/// Questions answered since the game started, once `index` questions of
/// `level` are done.
pub fn cumulative_answered(level: u8, index: usize) -> usize {
    level_offset(level) + index
}

pub fn is_ten_correct(score: u32) -> bool {
    score > 0 && score % 10 == 0
}

pub fn is_hundred(count: usize) -> bool {
    count > 0 && count % QUESTIONS_PER_LEVEL == 0
}

pub fn ending_for(score: u32) -> Ending {
    if score >= GOOD_ENDING_SCORE {
        Ending::Good
    } else {
        Ending::Bad
    }
}

fn level_offset(level: u8) -> usize {
    (usize::from(level) - 1) * QUESTIONS_PER_LEVEL
}

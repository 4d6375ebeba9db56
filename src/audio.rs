//! Named sound cues and the players that emit them.

use std::io::{self, Stdout, Write};

/// Fixed set of cues the quiz can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Correct,
    Wrong,
    Intro,
    TenInARow,
    HundredComplete,
    GoodEnding,
    BadEnding,
}

impl Cue {
    pub const ALL: [Cue; 7] = [
        Cue::Correct,
        Cue::Wrong,
        Cue::Intro,
        Cue::TenInARow,
        Cue::HundredComplete,
        Cue::GoodEnding,
        Cue::BadEnding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cue::Correct => "correct",
            Cue::Wrong => "wrong",
            Cue::Intro => "intro",
            Cue::TenInARow => "tenInARow",
            Cue::HundredComplete => "hundredComplete",
            Cue::GoodEnding => "goodEnding",
            Cue::BadEnding => "badEnding",
        }
    }

    /// How many bells the terminal player rings for this cue.
    fn bells(self) -> usize {
        match self {
            Cue::Correct | Cue::Intro => 1,
            Cue::Wrong | Cue::TenInARow => 2,
            Cue::HundredComplete | Cue::GoodEnding | Cue::BadEnding => 3,
        }
    }
}

/// Plays a cue from its start every time it is invoked.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell, a different number of times per cue.
pub struct TerminalBell<W: Write = Stdout> {
    out: W,
}

impl TerminalBell<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        let bells = "\x07".repeat(cue.bells());
        let result = self
            .out
            .write_all(bells.as_bytes())
            .and_then(|()| self.out.flush());

        if let Err(err) = result {
            tracing::debug!(cue = cue.name(), error = %err, "could not ring terminal bell");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names_are_unique() {
        let mut names: Vec<_> = Cue::ALL.iter().map(|cue| cue.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Cue::ALL.len());
    }

    #[test]
    fn test_terminal_bell_restarts_each_call() {
        let mut player = TerminalBell::new(Vec::new());
        player.play(Cue::Correct);
        player.play(Cue::Correct);
        player.play(Cue::Wrong);
        assert_eq!(player.into_inner(), b"\x07\x07\x07\x07".to_vec());
    }
}

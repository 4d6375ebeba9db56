use super::timer::TimerId;

/// Everything the controller reacts to.
///
/// The front end turns key presses into these and the scheduler reports
/// elapsed timers as [`Command::TimerFired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The intro screen was closed.
    IntroDismissed,
    /// The player picked the choice at this index.
    AnswerSubmitted(usize),
    MuteToggled,
    /// Asks for a restart; nothing changes until it is confirmed.
    RestartRequested,
    RestartConfirmed,
    RestartCancelled,
    TimerFired(TimerId),
}

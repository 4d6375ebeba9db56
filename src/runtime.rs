//! Event loop connecting the terminal, the timers and the controller.

use std::collections::HashMap;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::QuizError;
use crate::session::{Command, Controller, Panel, TimerId, TimerRequest, View};
use crate::terminal::AppTerminal;
use crate::ui;

/// Runs timer requests as tokio tasks that report back over a channel.
pub struct Scheduler {
    tx: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(tx: mpsc::UnboundedSender<TimerId>) -> Self {
        Self {
            tx,
            tasks: HashMap::new(),
        }
    }

    pub fn apply(&mut self, request: TimerRequest) {
        self.tasks.retain(|_, task| !task.is_finished());

        match request {
            TimerRequest::Repeat { id, every } => {
                let tx = self.tx.clone();
                let task = tokio::spawn(async move {
                    let mut interval = time::interval_at(Instant::now() + every, every);
                    loop {
                        interval.tick().await;
                        if tx.send(id).is_err() {
                            break;
                        }
                    }
                });
                self.track(id, task);
            }
            TimerRequest::Once { id, after } => {
                let tx = self.tx.clone();
                let task = tokio::spawn(async move {
                    time::sleep(after).await;
                    let _ = tx.send(id);
                });
                self.track(id, task);
            }
            TimerRequest::Cancel(id) => {
                if let Some(task) = self.tasks.remove(&id) {
                    task.abort();
                }
            }
        }
    }

    /// Number of timers that have not fired for the last time yet.
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn track(&mut self, id: TimerId, task: JoinHandle<()>) {
        if let Some(previous) = self.tasks.insert(id, task) {
            previous.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}

/// Highlighted answer, local to the front end.
#[derive(Debug, Default)]
pub struct Cursor {
    selected: usize,
    presented: u64,
}

impl Cursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Moves the highlight back to the first choice when a new question appears.
    pub fn sync(&mut self, view: &View) {
        if view.presented != self.presented {
            self.presented = view.presented;
            self.selected = 0;
        }
    }

    pub fn select_next(&mut self, choices: usize) {
        if choices > 0 {
            self.selected = (self.selected + 1) % choices;
        }
    }

    pub fn select_previous(&mut self, choices: usize) {
        if choices > 0 {
            self.selected = (self.selected + choices - 1) % choices;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
    Ignored,
}

/// Translates a key press into a command for the current screen.
pub fn map_key(view: &View, cursor: &mut Cursor, key: KeyCode) -> Input {
    if view.confirm_restart {
        return match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Input::Command(Command::RestartConfirmed)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Input::Command(Command::RestartCancelled)
            }
            _ => Input::Ignored,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Input::Quit,
        KeyCode::Char('m') | KeyCode::Char('M') => return Input::Command(Command::MuteToggled),
        _ => {}
    }

    match view.panel {
        Panel::Intro => match key {
            KeyCode::Enter | KeyCode::Char(' ') => Input::Command(Command::IntroDismissed),
            _ => Input::Ignored,
        },
        Panel::Quiz => map_quiz_key(view, cursor, key),
        Panel::Celebration | Panel::Final(_) => match key {
            KeyCode::Char('r') | KeyCode::Char('R') => Input::Command(Command::RestartRequested),
            _ => Input::Ignored,
        },
    }
}

fn map_quiz_key(view: &View, cursor: &mut Cursor, key: KeyCode) -> Input {
    let choices = view.choice_count();

    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            cursor.select_previous(choices);
            Input::Ignored
        }
        KeyCode::Down | KeyCode::Char('j') => {
            cursor.select_next(choices);
            Input::Ignored
        }
        KeyCode::Enter | KeyCode::Char(' ') if choices > 0 => {
            Input::Command(Command::AnswerSubmitted(cursor.selected()))
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            if index < choices {
                Input::Command(Command::AnswerSubmitted(index))
            } else {
                Input::Ignored
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Input::Command(Command::RestartRequested),
        _ => Input::Ignored,
    }
}

/// Drives `controller` until the player quits.
pub async fn run(terminal: &mut AppTerminal, controller: &mut Controller) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<TimerId>();
    let mut scheduler = Scheduler::new(tx);
    let mut events = EventStream::new();
    let mut cursor = Cursor::default();

    loop {
        for request in controller.take_timer_requests() {
            scheduler.apply(request);
        }

        cursor.sync(controller.view());
        terminal.draw(|frame| ui::render(frame, controller.view(), cursor.selected()))?;

        tokio::select! {
            Some(id) = rx.recv() => dispatch(controller, Command::TimerFired(id)),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match map_key(controller.view(), &mut cursor, key.code) {
                        Input::Command(command) => dispatch(controller, command),
                        Input::Quit => break,
                        Input::Ignored => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }
    }

    tracing::info!(
        score = controller.state().score,
        level = controller.state().level,
        "quiz closed"
    );
    Ok(())
}

fn dispatch(controller: &mut Controller, command: Command) {
    if let Err(violation) = controller.handle(command) {
        tracing::warn!(?command, %violation, "command ignored");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::Question;

    fn quiz_view(choices: usize) -> View {
        let mut view = View::new(1, 0);
        view.panel = Panel::Quiz;
        view.presented = 1;
        view.question = Some(Question {
            text: "Which?".to_string(),
            choices: (0..choices).map(|n| format!("choice {}", n)).collect(),
            correct: Some(0),
        });
        view
    }

    #[test]
    fn test_cursor_wraps_and_resets_on_new_question() {
        let mut view = quiz_view(3);
        let mut cursor = Cursor::default();
        cursor.sync(&view);

        cursor.select_previous(3);
        assert_eq!(cursor.selected(), 2);
        cursor.select_next(3);
        assert_eq!(cursor.selected(), 0);
        cursor.select_next(3);

        cursor.sync(&view);
        assert_eq!(cursor.selected(), 1);

        view.presented += 1;
        cursor.sync(&view);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn test_quiz_keys() {
        let view = quiz_view(4);
        let mut cursor = Cursor::default();
        cursor.sync(&view);

        assert_eq!(map_key(&view, &mut cursor, KeyCode::Char('j')), Input::Ignored);
        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Enter),
            Input::Command(Command::AnswerSubmitted(1))
        );
        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Char('4')),
            Input::Command(Command::AnswerSubmitted(3))
        );
        assert_eq!(map_key(&view, &mut cursor, KeyCode::Char('5')), Input::Ignored);
        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Char('r')),
            Input::Command(Command::RestartRequested)
        );
        assert_eq!(map_key(&view, &mut cursor, KeyCode::Char('q')), Input::Quit);
    }

    #[test]
    fn test_confirmation_captures_keys() {
        let mut view = quiz_view(2);
        view.confirm_restart = true;
        let mut cursor = Cursor::default();

        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Char('y')),
            Input::Command(Command::RestartConfirmed)
        );
        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Esc),
            Input::Command(Command::RestartCancelled)
        );
        assert_eq!(map_key(&view, &mut cursor, KeyCode::Char('1')), Input::Ignored);
        assert_eq!(map_key(&view, &mut cursor, KeyCode::Char('q')), Input::Ignored);
    }

    #[test]
    fn test_intro_keys() {
        let view = View::new(1, 0);
        let mut cursor = Cursor::default();
        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Enter),
            Input::Command(Command::IntroDismissed)
        );
        assert_eq!(map_key(&view, &mut cursor, KeyCode::Char('1')), Input::Ignored);
        assert_eq!(
            map_key(&view, &mut cursor, KeyCode::Char('m')),
            Input::Command(Command::MuteToggled)
        );
    }

    fn timer_ids(count: u64) -> Vec<TimerId> {
        (1..=count).map(TimerId::from_raw).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_timer_fires_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        let id = timer_ids(1)[0];

        scheduler.apply(TimerRequest::Repeat {
            id,
            every: Duration::from_secs(1),
        });

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(id));
        }

        scheduler.apply(TimerRequest::Cancel(id));
        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_once_timer_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        let ids = timer_ids(2);

        scheduler.apply(TimerRequest::Once {
            id: ids[0],
            after: Duration::from_secs(10),
        });
        scheduler.apply(TimerRequest::Once {
            id: ids[1],
            after: Duration::from_millis(1500),
        });
        scheduler.apply(TimerRequest::Cancel(ids[0]));

        let start = Instant::now();
        assert_eq!(rx.recv().await, Some(ids[1]));
        assert!(start.elapsed() >= Duration::from_millis(1500));

        time::sleep(Duration::from_secs(20)).await;
        assert!(rx.try_recv().is_err());
    }
}

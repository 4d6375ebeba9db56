//! The quiz session controller.
//!
//! All state transitions go through [`Controller::handle`]. Timers are not run
//! here: the controller queues [`TimerRequest`]s which the caller drains with
//! [`Controller::take_timer_requests`] and answers with
//! [`Command::TimerFired`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::audio::{Cue, CuePlayer};
use crate::data::{LevelSource, ProgressStore};
use crate::models::{Answer, FINAL_LEVEL, FIRST_LEVEL, Progress};

use super::command::Command;
use super::rules;
use super::state::{Countdown, Ending, GuardViolation, Phase, SessionState};
use super::timer::{TimerId, TimerIds, TimerRequest};
use super::view::{Panel, View};

pub struct Controller {
    state: SessionState,
    view: View,
    levels: Box<dyn LevelSource>,
    progress: Box<dyn ProgressStore>,
    cues: Box<dyn CuePlayer>,
    rng: StdRng,
    timer_ids: TimerIds,
    timer_requests: Vec<TimerRequest>,
    popup_timer: Option<TimerId>,
    celebration_timer: Option<TimerId>,
}

impl Controller {
    /// Creates a controller resuming from whatever `progress` has stored.
    pub fn new(
        levels: Box<dyn LevelSource>,
        progress: Box<dyn ProgressStore>,
        cues: Box<dyn CuePlayer>,
    ) -> Self {
        let saved = progress.load();
        tracing::info!(score = saved.score, level = saved.level, "resuming progress");

        Self {
            state: SessionState::from_progress(saved),
            view: View::new(saved.level, saved.score),
            levels,
            progress,
            cues,
            rng: StdRng::from_os_rng(),
            timer_ids: TimerIds::default(),
            timer_requests: Vec::new(),
            popup_timer: None,
            celebration_timer: None,
        }
    }

    /// Replaces the shuffling RNG, mostly so tests get a fixed order.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.state.muted = muted;
        self.view.muted = muted;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Drains the timer requests queued since the last call.
    pub fn take_timer_requests(&mut self) -> Vec<TimerRequest> {
        std::mem::take(&mut self.timer_requests)
    }

    /// Applies one command.
    ///
    /// A command whose preconditions do not hold leaves the session untouched
    /// and reports why.
    pub fn handle(&mut self, command: Command) -> Result<(), GuardViolation> {
        tracing::trace!(?command, "handling command");

        match command {
            Command::IntroDismissed => self.dismiss_intro(),
            Command::AnswerSubmitted(index) => {
                if self.view.confirm_restart {
                    tracing::debug!(index, "answer ignored while restart confirmation is open");
                    return Ok(());
                }
                return self.submit_answer(Answer::Choice(index));
            }
            Command::MuteToggled => self.toggle_mute(),
            Command::RestartRequested => self.request_restart(),
            Command::RestartConfirmed => {
                if self.view.confirm_restart {
                    self.restart();
                }
            }
            Command::RestartCancelled => {
                self.view.confirm_restart = false;
            }
            Command::TimerFired(id) => return self.timer_fired(id),
        }

        Ok(())
    }

    fn dismiss_intro(&mut self) {
        if self.state.phase != Phase::Intro {
            return;
        }

        tracing::info!("intro closed, starting quiz");
        self.state.phase = Phase::Playing;
        self.view.panel = Panel::Quiz;
        self.play(Cue::Intro);
        self.load_level(self.state.level);
    }

    /// Fetches, shuffles and presents the question set of `level`.
    fn load_level(&mut self, level: u8) {
        tracing::info!(level, "loading level");

        match self.levels.fetch(level) {
            Ok(mut records) => {
                records.shuffle(&mut self.rng);
                tracing::info!(level, count = records.len(), "level loaded");
                self.state.questions = records;
                self.state.question_index = 0;
                self.present_question();
            }
            Err(err) => {
                tracing::error!(level, error = %err, "error loading level");
            }
        }
    }

    fn present_question(&mut self) {
        self.view.panel = Panel::Quiz;
        let index = self.state.question_index;

        let Some(record) = self.state.current_record() else {
            let violation = GuardViolation::NoCurrentQuestion { index };
            tracing::error!(%violation, "cannot show question");
            return;
        };
        let Some(question) = record.to_question() else {
            let violation = GuardViolation::MalformedQuestion { index };
            tracing::error!(%violation, ?record, "cannot show question");
            return;
        };

        tracing::debug!(index, text = %question.text, "showing question");
        self.view.question = Some(question);
        self.view.presented += 1;

        if rules::is_timed(self.state.level, index) {
            self.start_countdown();
        } else {
            self.stop_countdown();
        }

        self.view.level = self.state.level;
        self.view.score = self.state.score;
    }

    fn submit_answer(&mut self, answer: Answer) -> Result<(), GuardViolation> {
        self.stop_countdown();

        let index = self.state.question_index;
        let Some(record) = self.state.current_record() else {
            return Err(GuardViolation::NoCurrentQuestion { index });
        };

        if record.is_correct(answer) {
            self.state.score += 1;

            if rules::is_ten_correct(self.state.score) {
                self.play(Cue::TenInARow);
                self.show_ten_correct_popup();
            }

            if rules::is_hundred(rules::answered_ordinal(self.state.level, index)) {
                self.play(Cue::HundredComplete);
            }

            self.play(Cue::Correct);
        } else {
            self.play(Cue::Wrong);
        }
        self.view.score = self.state.score;
        tracing::debug!(?answer, index, score = self.state.score, "answer checked");

        self.state.question_index += 1;
        if self.state.has_more_questions() {
            self.present_question();
        } else {
            self.complete_level();
        }

        Ok(())
    }

    fn complete_level(&mut self) {
        let answered = rules::cumulative_answered(self.state.level, self.state.question_index);

        if self.state.level >= FINAL_LEVEL {
            tracing::info!("game finished, evaluating final ending");
            self.end_game();
            return;
        }

        if rules::is_hundred(answered) {
            tracing::info!(answered, "100 questions completed");
            self.play(Cue::HundredComplete);

            self.state.phase = Phase::Celebrating;
            self.view.panel = Panel::Celebration;

            let id = self.timer_ids.next();
            self.celebration_timer = Some(id);
            self.timer_requests.push(TimerRequest::Once {
                id,
                after: rules::CELEBRATION_DELAY,
            });
            return;
        }

        self.advance_level();
    }

    fn finish_celebration(&mut self) {
        tracing::info!("moving to next level");
        self.celebration_timer = None;
        self.state.phase = Phase::Playing;
        self.view.panel = Panel::Quiz;
        self.advance_level();
    }

    fn advance_level(&mut self) {
        self.state.level += 1;
        self.save_progress();
        self.load_level(self.state.level);
    }

    fn end_game(&mut self) {
        let ending = rules::ending_for(self.state.score);
        self.state.phase = Phase::Finished(ending);
        self.view.panel = Panel::Final(ending);
        self.view.score = self.state.score;

        match ending {
            Ending::Good => self.play(Cue::GoodEnding),
            Ending::Bad => self.play(Cue::BadEnding),
        }
        tracing::info!(score = self.state.score, ?ending, "game over");

        if let Err(err) = self.progress.clear() {
            tracing::warn!(error = %err, "could not clear saved progress");
        }
    }

    fn show_ten_correct_popup(&mut self) {
        if let Some(previous) = self.popup_timer.take() {
            self.timer_requests.push(TimerRequest::Cancel(previous));
        }

        let id = self.timer_ids.next();
        self.popup_timer = Some(id);
        self.view.ten_correct_popup = true;
        self.timer_requests.push(TimerRequest::Once {
            id,
            after: rules::TEN_CORRECT_POPUP,
        });
    }

    fn start_countdown(&mut self) {
        self.stop_countdown();

        let id = self.timer_ids.next();
        let countdown = Countdown::new(id);
        self.view.timer = Some(countdown.remaining);
        self.state.countdown = Some(countdown);
        self.timer_requests.push(TimerRequest::Repeat {
            id,
            every: rules::COUNTDOWN_TICK,
        });
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.state.countdown.take() {
            self.timer_requests.push(TimerRequest::Cancel(countdown.id));
        }
        self.view.timer = None;
    }

    fn timer_fired(&mut self, id: TimerId) -> Result<(), GuardViolation> {
        if let Some(countdown) = self.state.countdown.as_mut().filter(|c| c.id == id) {
            let expired = countdown.tick();
            self.view.timer = Some(countdown.remaining);

            if expired {
                tracing::info!(index = self.state.question_index, "time is up");
                self.stop_countdown();
                return self.submit_answer(Answer::Timeout);
            }
        } else if self.popup_timer == Some(id) {
            self.popup_timer = None;
            self.view.ten_correct_popup = false;
        } else if self.celebration_timer == Some(id) {
            self.finish_celebration();
        } else {
            tracing::debug!(timer = id.raw(), "ignoring stale timer");
        }

        Ok(())
    }

    fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.view.muted = self.state.muted;
        tracing::debug!(muted = self.state.muted, "mute toggled");
    }

    fn request_restart(&mut self) {
        if self.state.phase == Phase::Intro {
            return;
        }
        self.view.confirm_restart = true;
    }

    fn restart(&mut self) {
        tracing::info!("restarting game");
        self.view.confirm_restart = false;

        self.stop_countdown();
        if let Some(id) = self.popup_timer.take() {
            self.timer_requests.push(TimerRequest::Cancel(id));
        }
        if let Some(id) = self.celebration_timer.take() {
            self.timer_requests.push(TimerRequest::Cancel(id));
        }

        self.state.level = FIRST_LEVEL;
        self.state.score = 0;
        self.state.questions.clear();
        self.state.question_index = 0;
        self.state.phase = Phase::Playing;

        self.view.panel = Panel::Quiz;
        self.view.question = None;
        self.view.ten_correct_popup = false;
        self.view.level = FIRST_LEVEL;
        self.view.score = 0;

        self.save_progress();
        self.load_level(FIRST_LEVEL);
    }

    fn save_progress(&mut self) {
        let progress: Progress = self.state.progress();
        if let Err(err) = self.progress.save(progress) {
            tracing::warn!(error = %err, "could not save progress");
        }
    }

    fn play(&mut self, cue: Cue) {
        if self.state.muted {
            return;
        }
        self.cues.play(cue);
    }
}

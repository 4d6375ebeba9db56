//! # level-quiz
//!
//! A ten-level terminal trivia quiz.
//!
//! Questions are read from `level1.json` ... `level10.json`, each shaped as
//! `{ "questions": [ { "question": ..., "answers": [...], "correct": 0 } ] }`.
//! Score and level are saved between runs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use level_quiz::{Config, Quiz, QuizError};
//! use level_quiz::config::PlayArgs;
//!
//! # async fn example(args: PlayArgs) -> Result<(), QuizError> {
//! let config = Config::from_args(&args);
//! let quiz = Quiz::from_config(&config)?;
//! quiz.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod config;
pub mod contact;
mod data;
pub mod logging;
mod models;
pub mod runtime;
pub mod session;
pub mod terminal;
mod ui;

use std::io;

use thiserror::Error;

pub use audio::{Cue, CuePlayer, TerminalBell};
pub use config::Config;
pub use data::{
    DirLevelSource, FileProgressStore, LevelSource, LoadError, MemoryProgressStore, ProgressError,
    ProgressStore, load_level_file, parse_level,
};
pub use models::{Answer, FINAL_LEVEL, FIRST_LEVEL, Progress, Question, QuestionRecord};
pub use session::{Command, Controller};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A level file could not be loaded before the quiz started.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to set up logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    controller: Controller,
}

impl Quiz {
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    /// Builds a quiz from `config`.
    ///
    /// The level the saved progress points at is read once up front so a
    /// missing data directory is reported before the terminal is taken over.
    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let levels = DirLevelSource::new(&config.data_dir);
        let progress: Box<dyn ProgressStore> = match &config.progress_file {
            Some(path) => Box::new(FileProgressStore::new(path)),
            None => Box::new(MemoryProgressStore::new()),
        };

        let saved = progress.load();
        levels.fetch(saved.level)?;

        let controller = Controller::new(Box::new(levels), progress, Box::new(TerminalBell::stdout()))
            .with_muted(config.muted);
        Ok(Self::new(controller))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut session = terminal::TerminalSession::enter()?;
        runtime::run(session.terminal(), &mut self.controller).await
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn config(data_dir: PathBuf) -> Config {
        Config {
            data_dir,
            progress_file: None,
            log_dir: PathBuf::from("logs"),
            log_filter: "info".to_string(),
            muted: true,
        }
    }

    #[test]
    fn test_from_config_requires_level_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Quiz::from_config(&config(dir.path().to_path_buf()))
            .err()
            .expect("missing level file");
        assert!(matches!(err, QuizError::Load(LoadError::Io { .. })));
    }

    #[test]
    fn test_from_config_starts_at_intro() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("level1.json"),
            r#"{"questions": [{"question": "q", "answers": ["a", "b"], "correct": 1}]}"#,
        )
        .unwrap();

        let quiz = Quiz::from_config(&config(dir.path().to_path_buf())).unwrap();
        let state = quiz.controller().state();
        assert_eq!(state.phase, session::Phase::Intro);
        assert_eq!((state.score, state.level), (0, 1));
        assert!(state.muted);
    }
}

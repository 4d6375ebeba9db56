//! Command line arguments and the runtime configuration built from them.

use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub play: PlayArgs,

    #[command(subcommand)]
    pub command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Validate a contact form submission
    Contact(ContactArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Directory holding level1.json to level10.json
    #[arg(short, long, env = "QUIZ_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// File the score and level are saved to
    #[arg(short, long, env = "QUIZ_PROGRESS_FILE", default_value = "quiz-progress.json")]
    pub progress_file: PathBuf,

    /// Directory for log files
    #[arg(long, env = "QUIZ_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Start with sound cues muted
    #[arg(short, long)]
    pub muted: bool,

    /// Keep progress in memory only
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// `None` when progress should not touch the disk.
    pub progress_file: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub log_filter: String,
    pub muted: bool,
}

impl Config {
    pub fn from_args(args: &PlayArgs) -> Self {
        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            data_dir: args.data_dir.clone(),
            progress_file: (!args.no_save).then(|| args.progress_file.clone()),
            log_dir: args.log_dir.clone(),
            log_filter,
            muted: args.muted,
        }
    }
}

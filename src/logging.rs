use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::QuizError;

const LOG_FILE_PREFIX: &str = "level-quiz.log";

/// Sends log output to a daily rolling file in `log_dir`.
///
/// The terminal belongs to the quiz UI, so nothing is written to stdout.
/// Keep the returned guard alive until the program exits.
pub fn init(log_dir: &Path, filter: &str) -> Result<WorkerGuard, QuizError> {
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

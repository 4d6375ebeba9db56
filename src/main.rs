use std::process::ExitCode;

use clap::Parser;
use level_quiz::config::{Cli, ContactArgs, Mode};
use level_quiz::contact::ContactForm;
use level_quiz::{Config, Quiz, QuizError, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Mode::Contact(args)) => {
            if submit_contact(args) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        None => {
            let config = Config::from_args(&cli.play);
            match play(&config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "quiz failed");
                    eprintln!("Error running quiz: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn play(config: &Config) -> Result<(), QuizError> {
    let _guard = logging::init(&config.log_dir, &config.log_filter)?;
    tracing::info!(data_dir = %config.data_dir.display(), "starting quiz");

    let quiz = Quiz::from_config(config)?;
    quiz.run().await
}

/// Validates the form and prints the outcome. Nothing is logged.
fn submit_contact(args: ContactArgs) -> bool {
    let mut form = ContactForm::new(args.name, args.email, args.message);
    let status = form.submit();
    println!("{}", status.message());
    status.is_success()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, email: &str, message: &str) -> ContactArgs {
        ContactArgs {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_contact_outcome() {
        assert!(submit_contact(args("Ada", "ada@example.com", "Hello")));
        assert!(!submit_contact(args("Ada", "", "Hello")));
    }
}

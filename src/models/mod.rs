mod progress;
mod question;

pub use progress::{FINAL_LEVEL, FIRST_LEVEL, Progress};
pub use question::{Answer, Question, QuestionRecord};

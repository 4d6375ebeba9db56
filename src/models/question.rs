use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A player's response to the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Index of the chosen option.
    Choice(usize),
    /// The countdown ran out before anything was chosen.
    Timeout,
}

/// A question that passed validation and can be shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    /// `None` when the file gave no usable index; nothing is then correct.
    pub correct: Option<i64>,
}

/// One entry of a level file as it appears on disk.
///
/// Records are kept as loaded and only validated when presented, so a single
/// broken entry does not reject the whole level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub answers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub choices: Option<Vec<String>>,
    #[serde(default, deserialize_with = "answer_index")]
    pub correct: Option<i64>,
}

impl QuestionRecord {
    /// Reads one entry of the `questions` array. An entry that is not an
    /// object becomes an empty record, which is never presented.
    pub fn from_entry(entry: Value) -> Self {
        serde_json::from_value(entry).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "question entry is not an object");
            Self::default()
        })
    }

    /// Choice list, taken from `answers` first and `choices` otherwise.
    pub fn options(&self) -> Option<&[String]> {
        self.answers.as_deref().or(self.choices.as_deref())
    }

    pub fn is_correct(&self, answer: Answer) -> bool {
        match (answer, self.correct) {
            (Answer::Choice(index), Some(correct)) => {
                i64::try_from(index).is_ok_and(|index| index == correct)
            }
            _ => false,
        }
    }

    /// Returns `None` when the text is missing or fewer than two choices exist.
    pub fn to_question(&self) -> Option<Question> {
        let text = self.question.as_deref().filter(|text| !text.is_empty())?;
        let choices = self.options().filter(|choices| choices.len() >= 2)?;

        Some(Question {
            text: text.to_string(),
            choices: choices.to_vec(),
            correct: self.correct,
        })
    }
}

/// Deserializes a field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Accepts integers and whole-valued floats such as `1.0`.
fn answer_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|float| float.fract() == 0.0 && float.abs() <= i64::MAX as f64)
            .map(|float| float as i64)
    }))
}

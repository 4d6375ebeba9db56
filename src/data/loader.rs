use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::models::QuestionRecord;

/// Errors raised while fetching the question set of a level.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: 'questions' key missing or not an array", .path.display())]
    Schema { path: PathBuf },
}

/// Something that can hand out the question set of a level.
pub trait LevelSource {
    fn fetch(&self, level: u8) -> Result<Vec<QuestionRecord>, LoadError>;
}

/// Reads `level<N>.json` files from a directory.
#[derive(Debug, Clone)]
pub struct DirLevelSource {
    dir: PathBuf,
}

impl DirLevelSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn level_path(&self, level: u8) -> PathBuf {
        self.dir.join(format!("level{}.json", level))
    }
}

impl LevelSource for DirLevelSource {
    fn fetch(&self, level: u8) -> Result<Vec<QuestionRecord>, LoadError> {
        load_level_file(self.level_path(level))
    }
}

pub fn load_level_file<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRecord>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_level(&json_content, path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "level file loaded");
    Ok(records)
}

/// Parses a level document of the form `{ "questions": [...] }`.
pub fn parse_level(json: &str, path: &Path) -> Result<Vec<QuestionRecord>, LoadError> {
    let parse_error = |source: serde_json::Error| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut document: Value = serde_json::from_str(json).map_err(parse_error)?;
    let entries = match document.get_mut("questions").map(Value::take) {
        Some(Value::Array(entries)) => entries,
        _ => {
            return Err(LoadError::Schema {
                path: path.to_path_buf(),
            });
        }
    };

    Ok(entries.into_iter().map(QuestionRecord::from_entry).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let json = r#"{
            "questions": [
                {"question": "2 + 2?", "answers": ["3", "4"], "correct": 1},
                {"question": "Largest planet?", "choices": ["Mars", "Jupiter", "Venus"], "correct": 1}
            ]
        }"#;
        let records = parse_level(json, Path::new("level1.json")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].options().unwrap().len(), 3);
    }

    #[test]
    fn test_broken_record_does_not_reject_level() {
        let json = r#"{
            "questions": [
                {"question": "2 + 2?", "answers": ["3", "4"], "correct": 1},
                {"question": "No index?", "answers": ["a", "b"]},
                {"question": "Float index?", "answers": ["a", "b"], "correct": 1.0},
                {"question": "String index?", "answers": ["a", "b"], "correct": "0"},
                42
            ]
        }"#;
        let records = parse_level(json, Path::new("level1.json")).unwrap();
        assert_eq!(records.len(), 5);

        let indices: Vec<_> = records.iter().map(|record| record.correct).collect();
        assert_eq!(indices, vec![Some(1), None, Some(1), None, None]);
        assert!(records[..4].iter().all(|record| record.to_question().is_some()));
        assert!(records[4].to_question().is_none());
    }

    #[test]
    fn test_missing_or_non_array_questions_is_schema_error() {
        for json in [r#"{}"#, r#"{"questions": {}}"#, r#"{"questions": null}"#, r#"[]"#] {
            let err = parse_level(json, Path::new("level3.json")).unwrap_err();
            assert!(matches!(err, LoadError::Schema { .. }), "{json}");
        }
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_level("{ not json", Path::new("level1.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse level1.json"));
    }

    #[test]
    fn test_dir_source_reads_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("level4.json"),
            r#"{"questions": [{"question": "q", "answers": ["a", "b"], "correct": 0}]}"#,
        )
        .unwrap();

        let source = DirLevelSource::new(dir.path());
        assert_eq!(source.fetch(4).unwrap().len(), 1);
        assert!(matches!(source.fetch(5), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_bundled_levels_parse() {
        let source = DirLevelSource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
        for level in 1..=10 {
            let records = source.fetch(level).unwrap();
            assert_eq!(records.len(), 100, "level {level}");
            assert!(records.iter().all(|record| record.to_question().is_some()));
        }
    }
}

//! Persistence of `{score, level}` between runs.
//!
//! Progress is stored as a flat key-value JSON object (`quizScore`,
//! `quizLevel`) with the numbers written as text.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{FINAL_LEVEL, FIRST_LEVEL, Progress};

const SCORE_KEY: &str = "quizScore";
const LEVEL_KEY: &str = "quizLevel";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait ProgressStore {
    /// Returns the saved progress, or the defaults when nothing usable is stored.
    fn load(&self) -> Progress;
    fn save(&mut self, progress: Progress) -> Result<(), ProgressError>;
    fn clear(&mut self) -> Result<(), ProgressError>;
}

/// Stores progress in a JSON file.
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Map::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "could not read progress file");
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "progress file is not a JSON object, ignoring it");
                Map::new()
            }
        }
    }

    fn write_entries(&self, entries: Map<String, Value>) -> Result<(), ProgressError> {
        let io_error = |source: io::Error| ProgressError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(entries))?;
        fs::write(&self.path, json).map_err(io_error)
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Progress {
        progress_from_entries(&self.read_entries())
    }

    fn save(&mut self, progress: Progress) -> Result<(), ProgressError> {
        let mut entries = self.read_entries();
        entries.insert(SCORE_KEY.to_string(), Value::String(progress.score.to_string()));
        entries.insert(LEVEL_KEY.to_string(), Value::String(progress.level.to_string()));
        self.write_entries(entries)
    }

    fn clear(&mut self) -> Result<(), ProgressError> {
        let mut entries = self.read_entries();
        entries.remove(SCORE_KEY);
        entries.remove(LEVEL_KEY);
        self.write_entries(entries)
    }
}

/// Keeps progress in memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    slot: Rc<RefCell<Option<Progress>>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: Progress) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(progress))),
        }
    }

    /// The raw stored value, `None` when nothing has been saved or it was cleared.
    pub fn stored(&self) -> Option<Progress> {
        *self.slot.borrow()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Progress {
        self.stored().unwrap_or_default()
    }

    fn save(&mut self, progress: Progress) -> Result<(), ProgressError> {
        *self.slot.borrow_mut() = Some(progress);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ProgressError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

fn progress_from_entries(entries: &Map<String, Value>) -> Progress {
    let defaults = Progress::default();

    let score = read_integer(entries, SCORE_KEY)
        .and_then(|score| u32::try_from(score).ok())
        .unwrap_or(defaults.score);

    let level = read_integer(entries, LEVEL_KEY)
        .and_then(|level| u8::try_from(level).ok())
        .filter(|level| (FIRST_LEVEL..=FINAL_LEVEL).contains(level))
        .unwrap_or(defaults.level);

    Progress { score, level }
}

fn read_integer(entries: &Map<String, Value>, key: &str) -> Option<i64> {
    match entries.get(key)? {
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(number) => number.as_i64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProgressStore::new(dir.path().join("progress.json"));
        assert_eq!(store.load(), Progress::new(0, 1));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileProgressStore::new(dir.path().join("nested/progress.json"));
        store.save(Progress::new(42, 5)).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"quizScore\": \"42\""));
        assert!(raw.contains("\"quizLevel\": \"5\""));
        assert_eq!(store.load(), Progress::new(42, 5));
    }

    #[test]
    fn test_clear_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"theme": "dark", "quizScore": "7", "quizLevel": "2"}"#).unwrap();

        let mut store = FileProgressStore::new(&path);
        store.clear().unwrap();

        assert_eq!(store.load(), Progress::default());
        assert!(fs::read_to_string(&path).unwrap().contains("theme"));
    }

    #[test]
    fn test_non_numeric_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        fs::write(&path, r#"{"quizScore": "lots", "quizLevel": "high"}"#).unwrap();
        assert_eq!(FileProgressStore::new(&path).load(), Progress::default());

        fs::write(&path, r#"{"quizScore": "-3", "quizLevel": "0"}"#).unwrap();
        assert_eq!(FileProgressStore::new(&path).load(), Progress::default());

        fs::write(&path, r#"{"quizScore": 12, "quizLevel": "11"}"#).unwrap();
        assert_eq!(FileProgressStore::new(&path).load(), Progress::new(12, 1));

        fs::write(&path, "garbage").unwrap();
        assert_eq!(FileProgressStore::new(&path).load(), Progress::default());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryProgressStore::new();
        let mut handle = store.clone();
        handle.save(Progress::new(3, 2)).unwrap();
        assert_eq!(store.stored(), Some(Progress::new(3, 2)));

        handle.clear().unwrap();
        assert_eq!(store.stored(), None);
        assert_eq!(store.load(), Progress::default());
    }
}

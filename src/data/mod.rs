mod loader;
mod progress_store;

pub use loader::{DirLevelSource, LevelSource, LoadError, load_level_file, parse_level};
pub use progress_store::{FileProgressStore, MemoryProgressStore, ProgressError, ProgressStore};

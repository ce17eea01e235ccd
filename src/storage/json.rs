//! JSON file store
//!
//! Layout under the data directory:
//!
//! ```text
//! stats.json                  player statistics
//! sessions/<YYYY-MM-DD>.json  one saved game per daily puzzle
//! words/answers.txt           optional custom answer list
//! words/allowed.txt           acceptable guesses for the custom answers
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a crash
//! never leaves a half-written file behind.

use super::{Storage, StorageError, WordLists};
use crate::core::Word;
use crate::game::{DateKey, PlayerStats, SessionState};
use crate::wordlists::loader::parse_word_list;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

const STATS_FILE: &str = "stats.json";
const SESSIONS_DIR: &str = "sessions";
const WORDS_DIR: &str = "words";
const ANSWERS_FILE: &str = "answers.txt";
const ALLOWED_FILE: &str = "allowed.txt";

/// Stores everything as files under one directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn stats_path(&self) -> PathBuf {
        self.root.join(STATS_FILE)
    }

    fn session_path(&self, date: DateKey) -> PathBuf {
        self.root.join(SESSIONS_DIR).join(format!("{date}.json"))
    }

    fn words_path(&self, file: &str) -> PathBuf {
        self.root.join(WORDS_DIR).join(file)
    }
}

impl Storage for JsonStore {
    fn load_word_bank(&self) -> Result<Option<WordLists>, StorageError> {
        let answers_path = self.words_path(ANSWERS_FILE);
        let Some(answers) = read_word_list(&answers_path)? else {
            return Ok(None);
        };

        // Without a separate allowed list the answers are the only guesses
        let allowed_path = self.words_path(ALLOWED_FILE);
        let acceptable = read_word_list(&allowed_path)?.unwrap_or_else(|| answers.clone());

        tracing::info!(
            answers = answers.len(),
            acceptable = acceptable.len(),
            "loaded custom word lists from {}",
            answers_path.display()
        );
        Ok(Some(WordLists {
            answers,
            acceptable,
        }))
    }

    fn load_stats(&self) -> Result<PlayerStats, StorageError> {
        Ok(read_json(&self.stats_path())?.unwrap_or_default())
    }

    fn save_stats(&self, stats: &PlayerStats) -> Result<(), StorageError> {
        write_json(&self.stats_path(), stats)
    }

    fn load_session(&self, date: DateKey) -> Result<Option<SessionState>, StorageError> {
        read_json(&self.session_path(date))
    }

    fn save_session(&self, date: DateKey, state: &SessionState) -> Result<(), StorageError> {
        write_json(&self.session_path(date), state)
    }
}

/// Read a file, mapping "not found" to `None`
fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_word_list(path: &Path) -> Result<Option<Vec<Word>>, StorageError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    parse_word_list(&content)
        .map(Some)
        .map_err(|source| StorageError::WordList {
            path: path.to_path_buf(),
            source,
        })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&content).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded {}", path.display());
    Ok(Some(value))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &bytes)?;
    tracing::debug!("saved {}", path.display());
    Ok(())
}

/// Write via a temp file and rename
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(io_error("create", &temp_path))?;
    file.write_all(bytes).map_err(io_error("write", &temp_path))?;
    file.sync_all().map_err(io_error("sync", &temp_path))?;

    fs::rename(&temp_path, path).map_err(io_error("rename", path))?;
    Ok(())
}

fn io_error(operation: &'static str, path: &Path) -> impl FnOnce(io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io {
        operation,
        path,
        source,
    }
}

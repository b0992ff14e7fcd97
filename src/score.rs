use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "classic-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failures of the backing key-value store.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("cannot access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk layout: a flat JSON object mapping slot names to values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct SlotFile(BTreeMap<String, u32>);

/// Key-value store of named integer slots.
pub trait ScoreStore {
    /// Reads a slot; `Ok(None)` when it has never been written.
    fn get(&self, key: &str) -> Result<Option<u32>, ScoreStoreError>;

    /// Writes a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: u32) -> Result<(), ScoreStoreError>;
}

/// Volatile store; used by tests and when no file is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, u32>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates one slot.
    #[must_use]
    pub fn with_slot(mut self, key: &str, value: u32) -> Self {
        self.slots.insert(key.to_owned(), value);
        self
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, ScoreStoreError> {
        Ok(self.slots.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), ScoreStoreError> {
        self.slots.insert(key.to_owned(), value);
        Ok(())
    }
}

/// JSON object of slots kept in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct data directory.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<SlotFile, ScoreStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SlotFile::default()),
            Err(source) => {
                return Err(ScoreStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ScoreStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: io::Error) -> ScoreStoreError {
        ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u32>, ScoreStoreError> {
        Ok(self.read_slots()?.0.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), ScoreStoreError> {
        // An unreadable file is replaced rather than blocking every future save.
        let mut slots = self.read_slots().unwrap_or_default();
        slots.0.insert(key.to_owned(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&slots).map_err(|source| ScoreStoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Reads the high score slot, treating absence and store failures as zero.
#[must_use]
pub fn load_high_score<S: ScoreStore + ?Sized>(store: &S, key: &str) -> u32 {
    match store.get(key) {
        Ok(value) => value.unwrap_or(0),
        Err(error) => {
            log::warn!("failed to read high score, starting from 0: {error}");
            0
        }
    }
}

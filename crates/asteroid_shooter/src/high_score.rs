//! High score persistence
//!
//! A single integer stored under the `HighScore` key. It is only written
//! when a finished session beats it.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// High score storage errors
#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored file could not be parsed
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: String,
        /// Parser message
        message: String,
    },

    /// The value could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Persisted high score
pub trait HighScoreStore {
    /// Stored high score, `0` when nothing was stored yet
    fn load(&self) -> Result<i32, HighScoreError>;

    /// Overwrite the stored high score
    fn save(&mut self, score: i32) -> Result<(), HighScoreError>;

    /// Store `final_score` if it beats the stored value. Returns the high
    /// score after the update.
    fn record(&mut self, final_score: i32) -> Result<i32, HighScoreError> {
        let stored = self.load()?;
        if final_score > stored {
            self.save(final_score)?;
            info!("New high score {} (was {})", final_score, stored);
            Ok(final_score)
        } else {
            Ok(stored)
        }
    }
}

/// In-memory store for tests and sessions without persistence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    value: Option<i32>,
    writes: usize,
}

impl MemoryHighScoreStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `score`
    pub fn with_score(score: i32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    /// Number of calls to [`HighScoreStore::save`]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<i32, HighScoreError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: i32) -> Result<(), HighScoreError> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(rename = "HighScore", default)]
    high_score: i32,
}

/// High score kept in a small TOML file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    /// Store backed by the file at `path`; the file is created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<i32, HighScoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No high score file at {}", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let file: HighScoreFile = toml::from_str(&contents).map_err(|e| HighScoreError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: i32) -> Result<(), HighScoreError> {
        let contents = toml::to_string(&HighScoreFile { high_score: score })
            .map_err(|e| HighScoreError::Serialize(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

//! Level resources
//!
//! Levels are looked up by name (`level1` → `level1.txt`). A missing level
//! is reported, never replaced by a fallback.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use crate::sim::ParseError;

/// Levels compiled into the binary
const BUILTIN_LEVELS: &[(&str, &str)] = &[("level1", include_str!("../levels/level1.txt"))];

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not find level {name:?}")]
    NotFound { name: String },
    #[error("could not read level {name:?}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse level {name:?}: {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}

/// Supplies raw level text by name
pub trait LevelSource {
    fn read_level(&self, name: &str) -> Result<String, LevelError>;
}

/// Levels stored as `<root>/<name>.txt`
#[derive(Debug, Clone)]
pub struct LevelDir {
    root: PathBuf,
}

impl LevelDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.txt"))
    }
}

impl LevelSource for LevelDir {
    fn read_level(&self, name: &str) -> Result<String, LevelError> {
        let path = self.path_for(name);
        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LevelError::NotFound {
                name: name.to_string(),
            },
            _ => LevelError::Io {
                name: name.to_string(),
                source,
            },
        })
    }
}

/// Levels held in memory
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedLevels<'a> {
    levels: &'a [(&'a str, &'a str)],
}

impl<'a> EmbeddedLevels<'a> {
    pub fn new(levels: &'a [(&'a str, &'a str)]) -> Self {
        Self { levels }
    }
}

impl EmbeddedLevels<'static> {
    /// Levels shipped with the game
    pub fn builtin() -> Self {
        Self::new(BUILTIN_LEVELS)
    }
}

impl LevelSource for EmbeddedLevels<'_> {
    fn read_level(&self, name: &str) -> Result<String, LevelError> {
        self.levels
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| LevelError::NotFound {
                name: name.to_string(),
            })
    }
}

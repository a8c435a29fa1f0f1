use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExclusionError {
    #[error("failed to read exclusion list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("exclusion list is not a JSON array of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Owner identifiers to suppress, stored trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExclusionSet {
    owners: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owners = owners
            .into_iter()
            .map(|owner| owner.as_ref().trim().to_lowercase())
            .filter(|owner| !owner.is_empty())
            .collect();
        Self { owners }
    }

    pub fn from_json(text: &str) -> Result<Self, ExclusionError> {
        let owners: Vec<String> = serde_json::from_str(text)?;
        Ok(Self::new(owners))
    }

    /// Case-insensitive membership test.
    pub fn is_excluded(&self, owner: &str) -> bool {
        self.owners.contains(&owner.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Backing store for the exclusion list, read once at the start of every query.
pub trait ExclusionSource: Send + Sync {
    fn load(&self) -> Result<ExclusionSet, ExclusionError>;
}

impl ExclusionSource for ExclusionSet {
    fn load(&self) -> Result<ExclusionSet, ExclusionError> {
        Ok(self.clone())
    }
}

/// JSON file store. A missing file means "exclude nobody"; an unreadable or
/// malformed file is an error.
#[derive(Debug, Clone)]
pub struct FileExclusionStore {
    path: PathBuf,
}

impl FileExclusionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExclusionSource for FileExclusionStore {
    fn load(&self) -> Result<ExclusionSet, ExclusionError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(ExclusionSet::default());
            }
            Err(source) => {
                return Err(ExclusionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        ExclusionSet::from_json(&text)
    }
}

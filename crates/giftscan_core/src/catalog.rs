use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read model catalog: {0}")]
    Io(#[from] io::Error),
    #[error("model catalog is not a JSON object of positive integers: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model {model:?} has max id {max_id}; every model needs at least one id")]
    InvalidMaxId { model: String, max_id: u64 },
}

/// Model name to highest valid item id. Built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelCatalog {
    models: HashMap<String, u64>,
}

impl ModelCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let models: HashMap<String, u64> = serde_json::from_str(text)?;
        Self::from_entries(models)
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut models = HashMap::new();
        for (model, max_id) in entries {
            let model = model.into();
            if max_id < 1 {
                return Err(CatalogError::InvalidMaxId { model, max_id });
            }
            models.insert(model, max_id);
        }
        Ok(Self { models })
    }

    pub fn max_id(&self, model: &str) -> Option<u64> {
        self.models.get(model).copied()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

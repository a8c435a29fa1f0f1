use thiserror::Error;

use crate::ExclusionError;

/// Failures that abort a whole query. Per-item fetch failures never surface here.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid gift model")]
    InvalidModel(String),
    #[error("Invalid id_range format")]
    InvalidRangeFormat(String),
    #[error("Invalid order {0:?}; expected asc or desc")]
    InvalidOrder(String),
    #[error("exclusion list unavailable: {0}")]
    Exclusions(#[from] ExclusionError),
}

impl QueryError {
    /// True for errors caused by the caller's input rather than server state.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryError::Exclusions(_))
    }
}

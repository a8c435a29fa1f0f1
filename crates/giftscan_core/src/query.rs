use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(QueryError::InvalidOrder(other.to_string())),
        }
    }
}

/// Result count used when the caller does not pass a limit.
pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub model: String,
    /// Unparsed `"<start>-<end>"`.
    pub id_range: String,
    pub limit: usize,
    pub order: SortOrder,
}

impl Query {
    pub fn new(model: impl Into<String>, id_range: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id_range: id_range.into(),
            limit: DEFAULT_LIMIT,
            order: SortOrder::Asc,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// One resolved item. `owner` is always a known handle, never the unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub model: String,
    pub id: u64,
    pub owner: String,
    pub link: String,
}

/// Page URL for an item; also used as the record's `link`.
pub fn item_link(base_url: &str, model: &str, id: u64) -> String {
    format!("{}/{}-{}", base_url.trim_end_matches('/'), model, id)
}

/// Sort by id in the requested direction, then keep the first `limit`.
/// Input order (completion order) has no effect on the output.
pub fn finalize_results(
    mut records: Vec<ItemRecord>,
    order: SortOrder,
    limit: usize,
) -> Vec<ItemRecord> {
    match order {
        SortOrder::Asc => records.sort_by_key(|record| record.id),
        SortOrder::Desc => records.sort_by_key(|record| std::cmp::Reverse(record.id)),
    }
    records.truncate(limit);
    records
}

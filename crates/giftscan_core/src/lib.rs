//! Giftscan core: pure domain types, parsing and ordering rules.
mod catalog;
mod error;
mod exclusions;
mod owner;
mod query;
mod range;

pub use catalog::{CatalogError, ModelCatalog};
pub use error::QueryError;
pub use exclusions::{ExclusionError, ExclusionSet, ExclusionSource, FileExclusionStore};
pub use owner::{
    LabelWindowExtractor, Owner, OwnerExtractor, DEFAULT_PROFILE_HOST, OWNER_MARKER,
    OWNER_WINDOW_CHARS, UNKNOWN_OWNER,
};
pub use query::{finalize_results, item_link, ItemRecord, Query, SortOrder, DEFAULT_LIMIT};
pub use range::{IdRange, RequestedRange};

//! PlayFab Economy v2 catalog
//!
//! - [`Filter::search`]: paginated, cached search of the public catalog
//! - [`Query::item`]: uncached lookup of a single [`Item`]

pub mod item;
pub mod query;
pub mod search;

pub use item::{AlternateId, Dictionary, Item, StoreReference};
pub use query::Query;
pub use search::{Filter, MAX_SEARCH_COUNT, SearchResult};

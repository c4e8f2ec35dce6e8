mod queries;
mod search;
mod types;

pub use types::{RepositoryOwner, SearchItem, SearchItemRepository, SearchResults};

pub(crate) use search::{build_search_query, fetch_search_results};

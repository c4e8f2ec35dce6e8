mod client;
mod graphql;

pub use client::Client;
pub use graphql::{RepositoryOwner, SearchItem, SearchItemRepository, SearchResults};

pub(crate) use graphql::{build_search_query, fetch_search_results};

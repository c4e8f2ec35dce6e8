pub(crate) const SEARCH_QUERY: &str = include_str!("queries/search.graphql");

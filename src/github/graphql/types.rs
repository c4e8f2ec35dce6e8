use serde::Deserialize;

/// One issue or pull request returned by the search. Both GraphQL types
/// carry the same fields here; `SearchNode` keeps the discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: String,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Kept as the raw API string; the digest prints it verbatim.
    pub created_at: String,
    pub closed: bool,
    pub closed_at: Option<String>,
    pub url: String,
    pub repository: SearchItemRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchItemRepository {
    pub name: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryOwner {
    pub id: String,
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum SearchNode {
    Issue(SearchItem),
    PullRequest(SearchItem),
}

impl SearchNode {
    pub(crate) fn into_item(self) -> SearchItem {
        match self {
            SearchNode::Issue(item) | SearchNode::PullRequest(item) => item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// All pages of a search, concatenated in page order then in-page
/// order. `page_info` is the last page's.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub items: Vec<SearchItem>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub search: SearchPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    pub page_info: PageInfo,
    pub nodes: Vec<SearchNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

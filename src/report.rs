use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::github::SearchItem;

/// Drops items from ignored organizations (case-sensitive owner login
/// match), then items created outside the half-open `[start, end)`.
pub fn filter_items(
    items: Vec<SearchItem>,
    ignore_orgs: &HashSet<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<SearchItem> {
    items
        .into_iter()
        .filter(|item| !ignore_orgs.contains(&item.repository.owner.login))
        .filter(|item| created_within(item, start, end))
        .collect()
}

fn created_within(item: &SearchItem, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(&item.created_at) {
        Ok(created) => {
            let created = created.with_timezone(&Utc);
            start <= created && created < end
        }
        Err(_) => false,
    }
}

/// Two lines per item; `createdAt` is printed as the API returned it.
pub fn render_digest(items: &[SearchItem]) -> String {
    items
        .iter()
        .map(|item| format!("* {} {}\n    * {}", item.title, item.created_at, item.url))
        .collect::<Vec<_>>()
        .join("\n")
}

//! The explore feed.
//!
//! One search per curated query, all issued concurrently; the merged,
//! deduplicated result is served in fixed-size pages.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::warn;

use crate::domain::Place;

use super::client::PlacesClient;

/// Queries fanned out to build the explore feed.
pub const EXPLORE_QUERIES: [&str; 8] = [
    "museum",
    "park",
    "landmark",
    "temple",
    "beach",
    "restaurant",
    "hotel",
    "attraction",
];

/// Places per feed page.
pub const PLACES_PER_PAGE: usize = 10;

/// One page of the explore feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorePage {
    /// Places on this page, in merged feed order.
    pub places: Vec<Place>,

    /// 1-based page number this page was built for.
    pub page: usize,

    /// Whether further pages exist.
    pub has_more: bool,
}

/// Build one page of the explore feed.
///
/// All queries run concurrently. A single failing query is logged and
/// contributes nothing; the feed is built from whatever succeeded.
/// Pages are 1-based; a page past the end is empty with `has_more`
/// false.
pub async fn explore_page(client: &PlacesClient, page: usize) -> ExplorePage {
    let searches = EXPLORE_QUERIES.map(|query| client.search(query));
    let results = join_all(searches).await;

    let merged: Vec<Vec<Place>> = EXPLORE_QUERIES
        .iter()
        .zip(results)
        .map(|(query, result)| {
            result.unwrap_or_else(|e| {
                warn!(query, error = %e, "explore query failed");
                Vec::new()
            })
        })
        .collect();

    paginate(merged, page)
}

/// Merge query results, dedup by place id (first occurrence wins), and
/// slice out the requested page.
fn paginate(results: Vec<Vec<Place>>, page: usize) -> ExplorePage {
    let page = page.max(1);

    let mut seen = HashSet::new();
    let unique: Vec<Place> = results
        .into_iter()
        .flatten()
        .filter(|place| seen.insert(place.id.clone()))
        .collect();

    let start = (page - 1) * PLACES_PER_PAGE;
    let end = (start + PLACES_PER_PAGE).min(unique.len());
    let has_more = end < unique.len();

    let places = if start < unique.len() {
        unique[start..end].to_vec()
    } else {
        Vec::new()
    };

    ExplorePage {
        places,
        page,
        has_more,
    }
}

//! Places API client and explore feed.
//!
//! The places service is a plain collection endpoint with no query
//! support, so searching filters client-side. The explore feed fans
//! out one search per curated query, merges, and paginates.

mod client;
mod error;
mod feed;

pub use client::{PlacesClient, PlacesConfig};
pub use error::PlacesError;
pub use feed::{EXPLORE_QUERIES, ExplorePage, PLACES_PER_PAGE, explore_page};

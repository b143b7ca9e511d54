//! Transit API HTTP client.
//!
//! Talks to the remote transit query service: place lookups by transit
//! type (with or without a server-side geo filter) and live departure
//! boards for bus stops and train stations. Raw responses are loosely
//! typed; conversion to domain types happens here, at the boundary.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{TransitClient, TransitConfig};
pub use convert::{bus_arrivals, stop_from_member, train_arrivals};
pub use error::TransitError;
pub use mock::MockTransitClient;
pub use types::{PlaceMember, PlacesResponse, TransitType};

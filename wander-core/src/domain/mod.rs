//! Domain types for the travel companion core.
//!
//! Validated identifiers and the place/stop model shared across the
//! crate. Types enforce their invariants at construction time, so code
//! that receives them can trust their validity; the lenient parsing of
//! remote shapes happens in the client modules, not here.

mod codes;
mod place;
mod stop;

pub use codes::{Atco, Crs, InvalidAtco, InvalidCrs};
pub use place::Place;
pub use stop::{Arrival, TransitStop};

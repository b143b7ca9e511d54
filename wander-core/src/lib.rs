//! Headless core for a travel-companion mobile app.
//!
//! Answers: "what's around this place, and how do I get there?"
//! The UI layer calls into this crate for places search, nearby
//! bus stops and train stations, live departure boards, sign-in,
//! and local persistence of the session and favorites.

pub mod auth;
pub mod domain;
pub mod geo;
pub mod nearby;
pub mod places;
pub mod store;
pub mod transit;

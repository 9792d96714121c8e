//! Emergency room finder.
//!
//! Fetches the public emergency-facility and real-time bed feeds, joins them
//! by facility id, and answers: "which operating emergency rooms with a free
//! ICU bed are nearest to me?"

pub mod cache;
pub mod feed;
pub mod geo;
pub mod hospital;
pub mod ranking;
pub mod session;
pub mod uri;
pub mod web;

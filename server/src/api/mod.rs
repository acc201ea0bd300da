//! HTTP API handlers.
//!
//! - [`reservations`]: reservation requests from the website form
//! - [`events`]: the public live-music calendar

pub mod events;
pub mod reservations;

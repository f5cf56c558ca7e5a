//! # REST endpoints
//!
//! HTTP surface of the trip planner: JSON in, JSON out, domain errors
//! translated to status codes. No business logic lives here, and it is
//! the only place HTTP status codes are chosen.

pub mod trip_apis;

pub use trip_apis::*;

//! # Domain Layer
//!
//! Business rules for trip management. The domain layer is the validation
//! boundary: drafts are checked here before they reach storage, and
//! storage outcomes are turned into typed errors here.

pub mod trip_service;

pub use trip_service::{TripError, TripService};

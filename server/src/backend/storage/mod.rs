//! # Storage Layer
//!
//! Home of the canonical trip collection. The store is purely in-memory;
//! nothing survives a process restart.

pub mod memory;

pub use memory::TripStore;

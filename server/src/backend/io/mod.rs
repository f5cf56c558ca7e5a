//! # IO Layer
//!
//! Interface layer that exposes backend functionality over HTTP.

pub mod rest;

pub use rest::*;

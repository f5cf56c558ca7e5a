pub mod use_trip;
pub mod use_trips;

//! Core business logic for bizfeed.

pub mod services;

pub use services::*;

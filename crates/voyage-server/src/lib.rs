//! Voyage analysis server: HTTP API, weather and insight providers.

pub mod api;
pub mod cache;
pub mod config;
pub mod insight;
pub mod state;
pub mod weather;

//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`courts`] - Court matching and viewport listing
//! - [`detect`] - Detection response to GeoJSON
//! - [`geo`] - Distances and meter/degree conversion
//! - [`geocode`] - Reverse geocoding
//! - [`tiles`] - Tile lookup and scan planning

pub mod common;
pub mod config;
pub mod courts;
pub mod detect;
pub mod geo;
pub mod geocode;
pub mod tiles;

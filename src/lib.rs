//! `pco-embed` - `Planning Center` listings as embeddable HTML.
//!
//! Fetches events, sermon series or groups from `Planning Center` Online,
//! renders them as an HTML list and caches the fragment for a short while.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod listing;
pub mod logging;
pub mod planning_center;
pub mod render;
pub mod types;

pub use listing::ListingService;

//! Planning Center API integration.
//!
//! Provides the authenticated collection fetch and the lenient resource types
//! listings are rendered from.

/// API client for Planning Center Online requests
pub mod api;
/// Data types representing Planning Center resources
pub mod types;

// Re-export key components
pub use api::{ListingFetcher, PlanningCenterClient};
pub use types::ListingItem;

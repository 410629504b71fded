//! Pledgewall Core - Domain entities, services, traits, and live feeds.
//!
//! This crate contains the business logic of the climate pledge campaign.
//! It is storage-agnostic and defines traits that are implemented by the
//! `storage-rest` crate.

pub mod constants;
pub mod errors;
pub mod events;
pub mod live;
pub mod pledges;

// Re-export common types from the pledges module
pub use pledges::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

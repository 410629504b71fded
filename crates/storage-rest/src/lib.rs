//! Hosted REST storage implementation for the pledge campaign.
//!
//! This crate implements the repository traits defined in `pledgewall-core`
//! against a PostgREST-compatible endpoint. It contains:
//! - The HTTP client and its authentication headers
//! - A small select-query builder
//! - Repository implementations and their row types
//!
//! # Architecture
//!
//! ```text
//!       core (domain)
//!             │
//!             ▼
//!   storage-rest (this crate)
//!             │  HTTPS + JSON
//!             ▼
//!      hosted pledge store
//! ```

pub mod client;
pub mod errors;
pub mod query;

// Repository implementations
pub mod pledges;

pub use client::{RemoteStore, RestClient, DEFAULT_TIMEOUT_SECS};
pub use errors::{ApiErrorResponse, StoreError};
pub use pledges::PledgeRepository;
pub use query::{Direction, SelectQuery};

// Re-export from pledgewall-core for convenience
pub use pledgewall_core::errors::{Error, Result};

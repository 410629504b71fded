//! REST storage implementation for pledges.

mod model;
mod repository;

pub use model::{NewPledgeRow, PledgeRow, ProfileTypeRow, PublicPledgeRow};
pub use repository::PledgeRepository;

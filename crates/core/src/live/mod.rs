//! Live feeds - periodic polling of stats and the pledge wall.
//!
//! Each feed is an independent poller that owns its last snapshot and
//! publishes a [`FeedView`] to subscribers. Failed polls keep the previous
//! snapshot; changes are signalled for a short window and then cleared.

mod feed;
mod poller;
mod sources;
mod timer;

#[cfg(test)]
pub(crate) mod test_support;

pub use feed::{ChangeSignal, FeedConfig, FeedSource, FeedView};
pub use poller::{spawn_feed, FeedHandle};
pub use sources::{spawn_pledge_wall_feed, spawn_stats_feed, PledgeWallSource, StatsSource};
pub use timer::TimerHandle;

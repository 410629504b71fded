use std::time::Duration;

/// Table holding pledge records in the remote store
pub const PLEDGES_TABLE: &str = "pledges";

/// Campaign goal shown next to the achieved total
pub const TARGET_PLEDGES: u64 = 1_000_000;

/// Default number of rows shown on the public pledge wall
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Shortest poll period a feed accepts; shorter periods are raised to it
pub const MIN_POLL_PERIOD: Duration = Duration::from_millis(100);

/// Stats feed refresh period
pub const STATS_POLL_PERIOD: Duration = Duration::from_secs(5);

/// How long the stats "just updated" pulse stays on
pub const STATS_PULSE_WINDOW: Duration = Duration::from_secs(1);

/// Pledge wall refresh period
pub const WALL_POLL_PERIOD: Duration = Duration::from_secs(10);

/// How long newly arrived pledge numbers stay highlighted
pub const WALL_HIGHLIGHT_WINDOW: Duration = Duration::from_secs(3);

/// Hearts rating bounds
pub const MIN_HEARTS: u8 = 3;
pub const MAX_HEARTS: u8 = 5;

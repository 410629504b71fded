//! The two feeds the campaign page shows: aggregate stats and the pledge wall.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::pledges::{PledgeServiceTrait, PledgeStats, PublicPledge};

use super::feed::{ChangeSignal, FeedConfig, FeedSource};
use super::poller::{spawn_feed, FeedHandle};

/// Polls aggregate counts and pulses when the total moves.
pub struct StatsSource {
    service: Arc<dyn PledgeServiceTrait>,
}

impl StatsSource {
    pub fn new(service: Arc<dyn PledgeServiceTrait>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FeedSource for StatsSource {
    type Snapshot = PledgeStats;

    fn name(&self) -> &'static str {
        "stats"
    }

    async fn fetch(&self) -> Result<PledgeStats> {
        self.service.fetch_stats().await
    }

    /// Before the first success the previous total counts as zero, so a
    /// non-empty campaign pulses once on load.
    fn detect_change(&self, previous: Option<&PledgeStats>, next: &PledgeStats) -> ChangeSignal {
        let previous_total = previous.map(|p| p.total).unwrap_or(0);
        if next.total != previous_total {
            ChangeSignal::Pulse
        } else {
            ChangeSignal::Unchanged
        }
    }
}

/// Polls the most recent public pledges and reports which ones are new.
pub struct PledgeWallSource {
    service: Arc<dyn PledgeServiceTrait>,
    limit: usize,
}

impl PledgeWallSource {
    pub fn new(service: Arc<dyn PledgeServiceTrait>, limit: usize) -> Self {
        Self { service, limit }
    }
}

#[async_trait]
impl FeedSource for PledgeWallSource {
    type Snapshot = Vec<PublicPledge>;

    fn name(&self) -> &'static str {
        "pledge-wall"
    }

    async fn fetch(&self) -> Result<Vec<PublicPledge>> {
        self.service.fetch_recent_pledges(self.limit).await
    }

    /// New items are the pledge numbers absent from the previous list.
    ///
    /// Nothing is highlighted on the first load or when the previous list
    /// was empty.
    fn detect_change(
        &self,
        previous: Option<&Vec<PublicPledge>>,
        next: &Vec<PublicPledge>,
    ) -> ChangeSignal {
        let previous = match previous {
            Some(previous) if !previous.is_empty() => previous,
            _ => return ChangeSignal::Unchanged,
        };

        let known: HashSet<i64> = previous.iter().map(|p| p.pledge_number).collect();
        let fresh: BTreeSet<i64> = next
            .iter()
            .map(|p| p.pledge_number)
            .filter(|n| !known.contains(n))
            .collect();

        if fresh.is_empty() {
            ChangeSignal::Unchanged
        } else {
            ChangeSignal::NewItems(fresh)
        }
    }
}

pub fn spawn_stats_feed(
    service: Arc<dyn PledgeServiceTrait>,
    config: FeedConfig,
) -> FeedHandle<PledgeStats> {
    spawn_feed(StatsSource::new(service), config)
}

pub fn spawn_pledge_wall_feed(
    service: Arc<dyn PledgeServiceTrait>,
    limit: usize,
    config: FeedConfig,
) -> FeedHandle<Vec<PublicPledge>> {
    spawn_feed(PledgeWallSource::new(service, limit), config)
}

//! In-memory pledge service for exercising the live feeds.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::errors::{Error, Result};
use crate::pledges::{
    NewPledge, Pledge, PledgeServiceTrait, PledgeStats, ProfileType, PublicPledge,
};

pub(crate) fn public_pledge(pledge_number: i64) -> PublicPledge {
    PublicPledge {
        pledge_number,
        name: format!("Pledger {}", pledge_number),
        state: "Maharashtra".to_string(),
        profile_type: ProfileType::Student,
        hearts_rating: 3,
        created_at: Utc.with_ymd_and_hms(2025, 6, 5, 8, 0, 0).unwrap()
            + chrono::Duration::minutes(pledge_number),
    }
}

/// Reads are answered from the state at call time, then held back by the
/// next queued delay (if any) before resolving.
#[derive(Default)]
pub(crate) struct MockPledgeService {
    pledges: Mutex<Vec<PublicPledge>>,
    fail: AtomicBool,
    calls: AtomicUsize,
    delays: Mutex<VecDeque<Duration>>,
}

impl MockPledgeService {
    pub(crate) fn with_pledges(count: i64) -> Self {
        let service = Self::default();
        service.add_pledges(count);
        service
    }

    /// Adds `count` pledges with the next pledge numbers, newest first.
    pub(crate) fn add_pledges(&self, count: i64) {
        let mut pledges = self.pledges.lock().unwrap();
        let last = pledges.first().map(|p| p.pledge_number).unwrap_or(0);
        for n in (last + 1)..=(last + count) {
            pledges.insert(0, public_pledge(n));
        }
    }

    pub(crate) fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    async fn answer<T>(&self, value: T) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self.fail.load(Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(Error::Fetch("store unavailable".to_string()));
        }
        Ok(value)
    }
}

#[async_trait]
impl PledgeServiceTrait for MockPledgeService {
    async fn submit_pledge(&self, _new_pledge: NewPledge) -> Result<Pledge> {
        Err(Error::Unexpected("read-only mock".to_string()))
    }

    async fn fetch_stats(&self) -> Result<PledgeStats> {
        let stats = {
            let pledges = self.pledges.lock().unwrap();
            PledgeStats::from_profile_types(pledges.iter().map(|p| p.profile_type))
        };
        self.answer(stats).await
    }

    async fn fetch_recent_pledges(&self, limit: usize) -> Result<Vec<PublicPledge>> {
        let recent: Vec<PublicPledge> = {
            let pledges = self.pledges.lock().unwrap();
            pledges.iter().take(limit).cloned().collect()
        };
        self.answer(recent).await
    }
}

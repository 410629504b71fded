//! Types shared by every live feed.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{
    MIN_POLL_PERIOD, STATS_POLL_PERIOD, STATS_PULSE_WINDOW, WALL_HIGHLIGHT_WINDOW, WALL_POLL_PERIOD,
};
use crate::errors::Result;

/// Timing of a single poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Time between two polls. The first poll runs immediately.
    pub period: Duration,
    /// How long a change signal stays visible before it is cleared.
    pub highlight_window: Duration,
}

impl FeedConfig {
    pub fn stats() -> Self {
        Self {
            period: STATS_POLL_PERIOD,
            highlight_window: STATS_PULSE_WINDOW,
        }
    }

    pub fn pledge_wall() -> Self {
        Self {
            period: WALL_POLL_PERIOD,
            highlight_window: WALL_HIGHLIGHT_WINDOW,
        }
    }

    /// Overrides the poll period. Periods below `MIN_POLL_PERIOD`, zero
    /// included, are raised to it.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(MIN_POLL_PERIOD);
        self
    }

    /// Period the ticker actually runs at, for configs built field by field.
    pub(crate) fn effective_period(&self) -> Duration {
        self.period.max(MIN_POLL_PERIOD)
    }
}

/// What a fresh snapshot changed compared to the one before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChangeSignal {
    #[default]
    Unchanged,
    /// Something changed; the view pulses `just_updated`.
    Pulse,
    /// These pledge numbers were not in the previous snapshot.
    NewItems(BTreeSet<i64>),
}

/// A fetch the poller repeats, plus how to compare two results.
#[async_trait]
pub trait FeedSource: Send + Sync + 'static {
    type Snapshot: Clone + Send + Sync + 'static;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Self::Snapshot>;

    fn detect_change(
        &self,
        previous: Option<&Self::Snapshot>,
        next: &Self::Snapshot,
    ) -> ChangeSignal;
}

/// What a subscriber sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView<T> {
    /// Last successfully fetched snapshot. Kept when a later poll fails.
    pub snapshot: Option<T>,
    /// True until the first poll resolves, successfully or not.
    pub loading: bool,
    pub just_updated: bool,
    pub new_items: BTreeSet<i64>,
    /// Error of the most recent applied poll, cleared by the next success.
    pub last_error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for FeedView<T> {
    fn default() -> Self {
        Self {
            snapshot: None,
            loading: true,
            just_updated: false,
            new_items: BTreeSet::new(),
            last_error: None,
            updated_at: None,
        }
    }
}

impl<T> FeedView<T> {
    pub fn is_new(&self, pledge_number: i64) -> bool {
        self.new_items.contains(&pledge_number)
    }

    pub fn is_highlighted(&self) -> bool {
        self.just_updated || !self.new_items.is_empty()
    }
}

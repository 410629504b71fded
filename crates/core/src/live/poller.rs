//! Generic periodic poller.
//!
//! Each poller owns its view state and publishes it through a `watch` channel.
//! Ticks never wait on each other: every poll runs as its own task, gets a
//! sequence number when it starts, and is applied only if no newer poll has
//! been applied already and the poller is still active.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::Utc;
use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::errors::Result;

use super::feed::{ChangeSignal, FeedConfig, FeedSource, FeedView};
use super::timer::TimerHandle;

struct PollerState<T> {
    active: bool,
    view: FeedView<T>,
    next_seq: u64,
    applied_seq: u64,
    highlight_generation: u64,
    clear_timer: Option<TimerHandle>,
    in_flight: HashMap<u64, AbortHandle>,
    ticker: Option<AbortHandle>,
}

struct Poller<S: FeedSource> {
    source: S,
    config: FeedConfig,
    state: Mutex<PollerState<S::Snapshot>>,
    view_tx: watch::Sender<FeedView<S::Snapshot>>,
}

/// Teardown side of a poller, independent of its source type.
trait FeedControl: Send + Sync {
    fn deactivate(&self);
    fn is_active(&self) -> bool;
}

/// Owner handle of a running feed.
///
/// Dropping the handle tears the feed down. Share it behind an `Arc` when
/// several consumers read the same feed.
pub struct FeedHandle<T> {
    view_rx: watch::Receiver<FeedView<T>>,
    control: Arc<dyn FeedControl>,
}

impl<T: Clone> FeedHandle<T> {
    pub fn current(&self) -> FeedView<T> {
        self.view_rx.borrow().clone()
    }

    /// Receiver notified after every applied poll and every highlight clear.
    pub fn subscribe(&self) -> watch::Receiver<FeedView<T>> {
        self.view_rx.clone()
    }
}

impl<T> FeedHandle<T> {
    /// Stops polling. Results still in flight are dropped and pending
    /// highlight clears are cancelled. Idempotent.
    pub fn shutdown(&self) {
        self.control.deactivate();
    }

    pub fn is_active(&self) -> bool {
        self.control.is_active()
    }
}

impl<T> Drop for FeedHandle<T> {
    fn drop(&mut self) {
        self.control.deactivate();
    }
}

/// Starts polling `source`. Must be called inside a tokio runtime.
pub fn spawn_feed<S: FeedSource>(source: S, config: FeedConfig) -> FeedHandle<S::Snapshot> {
    let (view_tx, view_rx) = watch::channel(FeedView::default());
    let poller = Arc::new(Poller {
        source,
        config,
        state: Mutex::new(PollerState {
            active: true,
            view: FeedView::default(),
            next_seq: 0,
            applied_seq: 0,
            highlight_generation: 0,
            clear_timer: None,
            in_flight: HashMap::new(),
            ticker: None,
        }),
        view_tx,
    });

    {
        let mut state = poller.lock();
        let ticker = tokio::spawn(run_ticker(poller.clone()));
        state.ticker = Some(ticker.abort_handle());
    }
    debug!(
        "[{}] feed started, polling every {:?}",
        poller.source.name(),
        config.effective_period()
    );

    FeedHandle {
        view_rx,
        control: poller,
    }
}

async fn run_ticker<S: FeedSource>(poller: Arc<Poller<S>>) {
    let mut ticker = interval(poller.config.effective_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !poller.begin_poll() {
            break;
        }
    }
}

impl<S: FeedSource> Poller<S> {
    fn lock(&self) -> MutexGuard<'_, PollerState<S::Snapshot>> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Spawns one poll. Returns false once the poller is inactive.
    fn begin_poll(self: &Arc<Self>) -> bool {
        let mut state = self.lock();
        if !state.active {
            return false;
        }

        state.next_seq += 1;
        let seq = state.next_seq;
        let poller = self.clone();
        // Spawned under the lock so the task cannot finish before it is tracked.
        let task = tokio::spawn(async move {
            let result = poller.source.fetch().await;
            poller.apply(seq, result);
        });
        state.in_flight.insert(seq, task.abort_handle());
        true
    }

    fn apply(self: &Arc<Self>, seq: u64, result: Result<S::Snapshot>) {
        let mut state = self.lock();
        state.in_flight.remove(&seq);

        if !state.active {
            debug!(
                "[{}] discarding poll #{} resolved after shutdown",
                self.source.name(),
                seq
            );
            return;
        }
        if seq <= state.applied_seq {
            debug!(
                "[{}] discarding poll #{}, #{} already applied",
                self.source.name(),
                seq,
                state.applied_seq
            );
            return;
        }
        state.applied_seq = seq;
        state.view.loading = false;

        match result {
            Ok(snapshot) => {
                let change = self
                    .source
                    .detect_change(state.view.snapshot.as_ref(), &snapshot);
                state.view.snapshot = Some(snapshot);
                state.view.last_error = None;
                state.view.updated_at = Some(Utc::now());

                match change {
                    ChangeSignal::Unchanged => {}
                    ChangeSignal::Pulse => {
                        state.view.just_updated = true;
                        self.restart_clear_timer(&mut state);
                    }
                    ChangeSignal::NewItems(items) if !items.is_empty() => {
                        debug!(
                            "[{}] {} new item(s) in poll #{}",
                            self.source.name(),
                            items.len(),
                            seq
                        );
                        state.view.new_items = items;
                        self.restart_clear_timer(&mut state);
                    }
                    ChangeSignal::NewItems(_) => {}
                }
            }
            Err(e) => {
                warn!(
                    "[{}] poll #{} failed, keeping last snapshot: {}",
                    self.source.name(),
                    seq,
                    e
                );
                state.view.last_error = Some(e.to_string());
            }
        }

        self.view_tx.send_replace(state.view.clone());
    }

    fn restart_clear_timer(self: &Arc<Self>, state: &mut PollerState<S::Snapshot>) {
        if let Some(previous) = state.clear_timer.take() {
            previous.cancel();
        }
        state.highlight_generation += 1;
        let generation = state.highlight_generation;
        let poller: Weak<Self> = Arc::downgrade(self);

        state.clear_timer = Some(TimerHandle::schedule(
            self.config.highlight_window,
            move || {
                if let Some(poller) = poller.upgrade() {
                    poller.clear_highlight(generation);
                }
            },
        ));
    }

    fn clear_highlight(&self, generation: u64) {
        let mut state = self.lock();
        // A newer highlight may have replaced this timer while it was firing.
        if !state.active || generation != state.highlight_generation {
            return;
        }
        state.clear_timer = None;
        state.view.just_updated = false;
        state.view.new_items.clear();
        self.view_tx.send_replace(state.view.clone());
    }
}

impl<S: FeedSource> FeedControl for Poller<S> {
    fn deactivate(&self) {
        let mut state = self.lock();
        if !state.active {
            return;
        }
        state.active = false;

        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }
        if let Some(timer) = state.clear_timer.take() {
            timer.cancel();
        }
        let in_flight = state.in_flight.len();
        for (_, task) in state.in_flight.drain() {
            task.abort();
        }
        debug!(
            "[{}] feed stopped, {} poll(s) abandoned",
            self.source.name(),
            in_flight
        );
    }

    fn is_active(&self) -> bool {
        self.lock().active
    }
}

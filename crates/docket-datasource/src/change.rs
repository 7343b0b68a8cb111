//! Change notification: when to refresh.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::refresh::{RefreshStatus, Refresher};

/// Poll period used when the host offers no push notification.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// A request to refresh, optionally bypassing the staleness check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshRequest {
    pub force: bool,
}

/// Produces refresh requests until it closes.
#[async_trait]
pub trait ChangeSource: Send {
    /// Waits for the next request; `None` once the source is closed.
    async fn next_request(&mut self) -> Option<RefreshRequest>;
}

/// Fixed-interval polling. Never closes.
#[derive(Debug)]
pub struct PollingSource {
    interval: Interval,
}

impl PollingSource {
    /// Must be called inside a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl ChangeSource for PollingSource {
    async fn next_request(&mut self) -> Option<RefreshRequest> {
        self.interval.tick().await;
        Some(RefreshRequest::default())
    }
}

/// Push notifications delivered through a channel.
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<RefreshRequest>,
}

/// Sending half of a [`ChannelSource`].
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: mpsc::Sender<RefreshRequest>,
}

impl RefreshTrigger {
    /// Queues a request. Returns false when the queue is full or the
    /// source is gone; a full queue already has a refresh pending.
    pub fn request(&self, force: bool) -> bool {
        self.tx.try_send(RefreshRequest { force }).is_ok()
    }
}

impl ChannelSource {
    pub fn channel(buffer: usize) -> (RefreshTrigger, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (RefreshTrigger { tx }, Self { rx })
    }
}

#[async_trait]
impl ChangeSource for ChannelSource {
    async fn next_request(&mut self) -> Option<RefreshRequest> {
        self.rx.recv().await
    }
}

/// Refreshes once per request until the source closes. Returns the number
/// of refreshes that committed new data.
pub async fn run_refresh_loop<C: ChangeSource>(refresher: Arc<Refresher>, mut source: C) -> usize {
    info!("Refresh loop started");
    let mut updates = 0;
    while let Some(request) = source.next_request().await {
        let report = refresher.refresh(request.force).await;
        if let Some(view_id) = &report.view_changed {
            debug!(%view_id, "View changed during refresh");
        }
        if matches!(report.status, RefreshStatus::Updated { .. }) {
            updates += 1;
        }
    }
    info!(updates, "Refresh loop stopped");
    updates
}

/// Runs [`run_refresh_loop`] on a new task.
pub fn spawn_refresh_loop<C>(refresher: Arc<Refresher>, source: C) -> JoinHandle<usize>
where
    C: ChangeSource + 'static,
{
    tokio::spawn(run_refresh_loop(refresher, source))
}

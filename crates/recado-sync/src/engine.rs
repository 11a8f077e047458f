//! Background polling engine
//!
//! One tokio task drives all polling against the API and writes results
//! into the shared [`InboxStore`]. Four cadences:
//!
//! - open conversation: 2.5s (also drives server-side read marking)
//! - inbox summary: 7s
//! - unread badge: 8s
//! - pending invitations: 20s
//!
//! Summary polls never overlap: an in-flight guard skips the tick when the
//! previous fetch is still running. Results apply last-write-wins; a
//! failed poll keeps the previous state and the next tick retries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::client::SyncClient;
use crate::prefs::SurfacePrefs;
use crate::store::InboxStore;

const CONVERSATION_FETCH_LIMIT: u32 = 200;

/// Polling cadences for each read model.
#[derive(Debug, Clone, Copy)]
pub struct SyncIntervals {
    pub conversation: Duration,
    pub summary: Duration,
    pub badge: Duration,
    pub invitations: Duration,
}

impl Default for SyncIntervals {
    fn default() -> Self {
        Self {
            conversation: Duration::from_millis(2_500),
            summary: Duration::from_secs(7),
            badge: Duration::from_secs(8),
            invitations: Duration::from_secs(20),
        }
    }
}

/// Drives periodic synchronization of an [`InboxStore`].
pub struct SyncEngine {
    client: SyncClient,
    store: Arc<InboxStore>,
    prefs: Arc<Mutex<SurfacePrefs>>,
    intervals: SyncIntervals,
    summary_in_flight: Arc<AtomicBool>,
}

impl SyncEngine {
    pub fn new(
        client: SyncClient,
        store: Arc<InboxStore>,
        prefs: Arc<Mutex<SurfacePrefs>>,
    ) -> Self {
        Self::with_intervals(client, store, prefs, SyncIntervals::default())
    }

    pub fn with_intervals(
        client: SyncClient,
        store: Arc<InboxStore>,
        prefs: Arc<Mutex<SurfacePrefs>>,
        intervals: SyncIntervals,
    ) -> Self {
        Self {
            client,
            store,
            prefs,
            intervals,
            summary_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the polling loop on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the polling loop until the task is dropped.
    pub async fn run(self) {
        let mut conversation = interval(self.intervals.conversation);
        let mut summary = interval(self.intervals.summary);
        let mut badge = interval(self.intervals.badge);
        let mut invitations = interval(self.intervals.invitations);
        for ticker in [&mut conversation, &mut summary, &mut badge, &mut invitations] {
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        loop {
            tokio::select! {
                _ = conversation.tick() => self.poll_conversation().await,
                _ = summary.tick() => self.poll_summary().await,
                _ = badge.tick() => self.poll_badge().await,
                _ = invitations.tick() => self.poll_invitations().await,
            }
        }
    }

    async fn poll_summary(&self) {
        if self.summary_in_flight.swap(true, Ordering::AcqRel) {
            debug!("summary poll still in flight, skipping tick");
            return;
        }

        let result = self.client.fetch_inbox().await;
        self.summary_in_flight.store(false, Ordering::Release);

        match result {
            Ok(rows) => {
                let prefs = self.prefs.lock();
                self.store.apply_summary(rows, &prefs);
            }
            Err(e) => warn!(error = %e, "inbox summary poll failed"),
        }
    }

    /// Refresh the open drawer conversation; the fetch marks the
    /// correspondent's messages read on the server, so the local unread
    /// count is cleared alongside.
    async fn poll_conversation(&self) {
        let Some(correspondent) = self.store.drawer_correspondent() else {
            return;
        };
        match self
            .client
            .fetch_conversation(correspondent, CONVERSATION_FETCH_LIMIT)
            .await
        {
            Ok(_) => self.store.clear_unread(correspondent),
            Err(e) => warn!(error = %e, %correspondent, "conversation poll failed"),
        }
    }

    async fn poll_badge(&self) {
        match self.client.fetch_unread_count().await {
            Ok(count) => self.store.set_unread_total(count),
            Err(e) => warn!(error = %e, "unread badge poll failed"),
        }
    }

    async fn poll_invitations(&self) {
        match self.client.fetch_pending_invitations().await {
            Ok(count) => self.store.set_pending_invitations(count),
            Err(e) => warn!(error = %e, "invitation badge poll failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intervals_match_the_polling_design() {
        let intervals = SyncIntervals::default();
        assert_eq!(intervals.conversation, Duration::from_millis(2_500));
        assert_eq!(intervals.summary, Duration::from_secs(7));
        assert_eq!(intervals.badge, Duration::from_secs(8));
        assert_eq!(intervals.invitations, Duration::from_secs(20));
    }

    #[tokio::test]
    async fn in_flight_guard_skips_overlapping_summary_ticks() {
        let engine = SyncEngine::new(
            SyncClient::new("http://127.0.0.1:9", "tok"),
            Arc::new(InboxStore::new()),
            Arc::new(Mutex::new(SurfacePrefs::default())),
        );

        engine.summary_in_flight.store(true, Ordering::Release);
        // Returns immediately without clearing the guard.
        engine.poll_summary().await;
        assert!(engine.summary_in_flight.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn conversation_poll_is_a_no_op_without_an_open_drawer() {
        let store = Arc::new(InboxStore::new());
        let engine = SyncEngine::new(
            SyncClient::new("http://127.0.0.1:9", "tok"),
            Arc::clone(&store),
            Arc::new(Mutex::new(SurfacePrefs::default())),
        );

        let rx = store.subscribe();
        let before = *rx.borrow();
        engine.poll_conversation().await;
        assert_eq!(*rx.borrow(), before);
    }
}

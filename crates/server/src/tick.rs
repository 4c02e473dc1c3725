//! The simulation tick: drains every session's command queue in bounded
//! batches and retires sessions that have finished.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use indexmap::IndexMap;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::events::EventStore;
use crate::host::HostWorld;
use crate::net::session::Session;
use crate::settings::Settings;

/// All live sessions, visited in registration order by the tick sweep.
///
/// The mutex is a `std` one: the sweep never awaits while holding it, and
/// registration from the accept loop is a single brief insert.
pub struct SessionSet {
    sessions: Mutex<IndexMap<u64, Session>>,
    next_id: AtomicU64,
}

impl SessionSet {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(IndexMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn register(&self, session: Session) {
        self.sessions
            .lock()
            .expect("session set poisoned")
            .insert(session.id(), session);
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session set poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One tick: drain every session up to `limit` commands, then close and
    /// drop the ones that marked themselves for removal.
    pub async fn tick(&self, world: &dyn HostWorld, events: &EventStore, limit: usize) {
        let mut retired = Vec::new();
        {
            let mut sessions = self.sessions.lock().expect("session set poisoned");
            for session in sessions.values_mut() {
                session.drain(world, events, limit);
            }
            let done: Vec<u64> = sessions
                .values()
                .filter(|s| s.pending_removal())
                .map(Session::id)
                .collect();
            for id in done {
                if let Some(session) = sessions.shift_remove(&id) {
                    retired.push(session);
                }
            }
        }
        // Closing joins the I/O tasks, so it happens outside the lock.
        for mut session in retired {
            debug!(peer = %session.peer(), "retiring session");
            session.close().await;
        }
    }

    /// Close every session, used on shutdown.
    pub async fn close_all(&self) {
        let drained: Vec<Session> = {
            let mut sessions = self.sessions.lock().expect("session set poisoned");
            sessions.drain(..).map(|(_, s)| s).collect()
        };
        for mut session in drained {
            session.close().await;
        }
    }
}

impl Default for SessionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the tick loop forever at a fixed period.
pub async fn run(
    sessions: Arc<SessionSet>,
    world: Arc<dyn HostWorld>,
    events: Arc<EventStore>,
    settings: Arc<Settings>,
    period: Duration,
) {
    let mut interval = time::interval(period);
    // A stalled tick should not be followed by a burst of catch-up ticks.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        sessions
            .tick(world.as_ref(), &events, settings.max_commands_per_tick())
            .await;
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::services::game::GameSession;

pub type SessionId = Uuid;
pub type SharedSession = Arc<Mutex<GameSession>>;

struct Entry {
    session: SharedSession,
    touched: Instant,
}

/// Live sessions keyed by id. Requests for different ids never share a lock;
/// requests for the same id are serialized by that session's mutex.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Entry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn create(&self, id: SessionId, session: GameSession) -> SharedSession {
        let session = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            Entry {
                session: session.clone(),
                touched: Instant::now(),
            },
        );
        session
    }

    pub fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.touched = Instant::now();
            entry.session.clone()
        })
    }

    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions untouched for longer than `max_idle`. Returns how many were removed.
    pub fn reap_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| entry.touched.elapsed() <= max_idle);
        before.saturating_sub(self.sessions.len())
    }
}

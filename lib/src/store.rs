//! Session storage keyed by conversation

use crate::session::{ConversationId, Session};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Concurrency-safe mapping from conversation id to session
///
/// Implementations must let different conversations proceed independently and
/// must run `with_session` calls for the same conversation one at a time.
pub trait SessionStore: Send + Sync {
    /// Run `f` with exclusive access to the session, creating it on first use
    fn with_session<R>(&self, id: &ConversationId, f: impl FnOnce(&mut Session) -> R) -> R;

    /// Copy of the current session state, if the conversation is known
    fn snapshot(&self, id: &ConversationId) -> Option<Session>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store: sharded map of per-conversation locks
///
/// The map shard is held only long enough to find or create the slot; the
/// transition itself runs under the slot's own mutex. Slots are never
/// replaced once created, so every caller for a conversation locks the same
/// mutex.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<ConversationId, Arc<Mutex<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: &ConversationId) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(id.clone())
            .or_insert_with(|| {
                log::debug!("creating session for conversation {}", id);
                Arc::new(Mutex::new(Session::new(id.clone())))
            })
            .value()
            .clone()
    }
}

impl SessionStore for InMemorySessionStore {
    fn with_session<R>(&self, id: &ConversationId, f: impl FnOnce(&mut Session) -> R) -> R {
        let slot = self.slot(id);
        let mut session = slot.lock();
        f(&mut session)
    }

    fn snapshot(&self, id: &ConversationId) -> Option<Session> {
        let slot = self.sessions.get(id)?.value().clone();
        let session = slot.lock().clone();
        Some(session)
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

//! Session store boundary.
//!
//! The engine never touches disk. It reads sessions through [`SessionStore`]
//! and asks the store to persist a session after every committed change.

use crate::{error::Result, Error, Session, SessionId};
use std::collections::BTreeMap;

/// Key-value storage of session records, keyed by session id.
pub trait SessionStore {
    /// Load a session, `None` if no session has this id.
    fn load_session(&self, id: &str) -> Result<Option<Session>>;

    /// Insert or replace a session. Must be durable when it returns.
    fn save_session(&mut self, session: &Session) -> Result<()>;

    /// All stored sessions, ordered by id.
    fn list_sessions(&self) -> Result<Vec<Session>>;

    /// Remove a session. Fails with [`Error::SessionNotFound`] if absent.
    fn delete_session(&mut self, id: &str) -> Result<()>;
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: BTreeMap<SessionId, Session>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with sessions.
    pub fn with_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        Self {
            sessions: sessions.into_iter().map(|s| (s.id.clone(), s)).collect(),
            saves: 0,
        }
    }

    /// Number of `save_session` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load_session(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).cloned())
    }

    fn save_session(&mut self, session: &Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session.clone());
        self.saves += 1;
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<Session>> {
        Ok(self.sessions.values().cloned().collect())
    }

    fn delete_session(&mut self, id: &str) -> Result<()> {
        self.sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }
}

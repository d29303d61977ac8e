//! Ranking engine driver.
//!
//! Binds a session to its strategy and owns the commit step: every accepted
//! verdict re-encodes the strategy state into the session blob and saves the
//! session exactly once.

use crate::{
    error::Result, Comparison, ComparisonMode, ComparisonStrategy, Error, Pair, Session,
    SessionStore, Standing, Strategy,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// How far a session has come.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Comparisons judged so far.
    pub finished: usize,
    /// Total comparisons the session needs, when knowable in advance.
    pub total: Option<usize>,
}

pub struct RankingEngine<'s, S: SessionStore + ?Sized> {
    session: Session,
    strategy: Strategy,
    store: &'s mut S,
}

impl<'s, S: SessionStore + ?Sized> RankingEngine<'s, S> {
    /// Load a session from the store and resolve its strategy.
    pub fn open(store: &'s mut S, id: &str, rng: StdRng) -> Result<Self> {
        let session = store
            .load_session(id)?
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        Self::new(store, session, rng)
    }

    /// Bind an already loaded session.
    pub fn new(store: &'s mut S, session: Session, rng: StdRng) -> Result<Self> {
        let strategy = Strategy::for_session(&session, rng)?;
        tracing::debug!(
            session = %session.id,
            mode = %strategy.mode(),
            finished = strategy.finished_count(),
            "opened session"
        );
        Ok(Self {
            session,
            strategy,
            store,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn mode(&self) -> ComparisonMode {
        self.strategy.mode()
    }

    pub fn next_pair(&mut self) -> Option<Pair> {
        self.strategy.next_pair()
    }

    /// Record a verdict and persist the session.
    ///
    /// On any error, validation or storage, the strategy and session are left
    /// as they were before the call.
    pub fn submit(&mut self, comparison: Comparison) -> Result<()> {
        let checkpoint = self.strategy.clone();
        self.strategy.submit(comparison)?;

        if let Err(err) = self.commit() {
            self.strategy = checkpoint;
            return Err(err);
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let previous =
            std::mem::replace(&mut self.session.state_blob, self.strategy.encode_state());

        if let Err(err) = self.store.save_session(&self.session) {
            tracing::warn!(session = %self.session.id, %err, "failed to save session");
            self.session.state_blob = previous;
            return Err(err);
        }

        tracing::debug!(
            session = %self.session.id,
            finished = self.strategy.finished_count(),
            "committed session state"
        );
        Ok(())
    }

    pub fn results(&self) -> Vec<Standing> {
        self.strategy.results()
    }

    pub fn is_final(&self) -> bool {
        self.strategy.is_final()
    }

    pub fn pending_count(&self) -> Option<usize> {
        self.strategy.pending_count()
    }

    pub fn finished_count(&self) -> usize {
        self.strategy.finished_count()
    }

    pub fn progress(&self) -> Progress {
        let finished = self.finished_count();
        Progress {
            finished,
            total: self.pending_count().map(|pending| finished + pending),
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

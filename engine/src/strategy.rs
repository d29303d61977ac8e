//! The strategy capability shared by both comparison modes, and the selector
//! that binds a session to one of them.

use crate::{
    error::Result, AssumedTransitive, Comparison, ComparisonMode, Exhaustive, ItemName, Pair,
    Session,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: ItemName,
    /// Win count in exhaustive mode. `None` when position alone is the score.
    pub wins: Option<usize>,
}

impl Standing {
    pub fn new(name: impl Into<ItemName>, wins: Option<usize>) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

/// Decides which pair to show next and folds judged outcomes into a ranking.
pub trait ComparisonStrategy {
    fn mode(&self) -> ComparisonMode;

    /// The pair the judge should see next, or `None` once the ranking is
    /// complete.
    fn next_pair(&mut self) -> Option<Pair>;

    /// Validate and record a verdict. State is untouched on error.
    fn submit(&mut self, comparison: Comparison) -> Result<()>;

    /// Current ranking, best first. Partial until [`is_final`](Self::is_final).
    fn results(&self) -> Vec<Standing>;

    fn is_final(&self) -> bool;

    /// Comparisons still needed, when knowable in advance.
    fn pending_count(&self) -> Option<usize>;

    /// Every verdict recorded so far, in submission order.
    fn comparisons(&self) -> &[Comparison];

    fn finished_count(&self) -> usize {
        self.comparisons().len()
    }

    /// Serialize the working state for the session blob.
    fn encode_state(&self) -> String;
}

/// A strategy bound to a session, selected by its comparison mode.
#[derive(Debug, Clone)]
pub enum Strategy {
    Exhaustive(Exhaustive),
    AssumedTransitive(AssumedTransitive),
}

impl Strategy {
    /// Resolve the session's mode and rebuild state from its blob.
    ///
    /// Fails only with [`Error::UnsupportedMode`](crate::Error::UnsupportedMode);
    /// an unusable blob is replaced by fresh state.
    pub fn for_session(session: &Session, rng: StdRng) -> Result<Self> {
        let items = session.items.clone();
        let blob = session.state_blob.as_str();

        Ok(match session.mode()? {
            ComparisonMode::Exhaustive => {
                Strategy::Exhaustive(Exhaustive::from_blob(items, blob, rng))
            }
            ComparisonMode::AssumedTransitive => {
                Strategy::AssumedTransitive(AssumedTransitive::from_blob(items, blob, rng))
            }
        })
    }

    fn inner(&self) -> &dyn ComparisonStrategy {
        match self {
            Strategy::Exhaustive(s) => s,
            Strategy::AssumedTransitive(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ComparisonStrategy {
        match self {
            Strategy::Exhaustive(s) => s,
            Strategy::AssumedTransitive(s) => s,
        }
    }
}

impl ComparisonStrategy for Strategy {
    fn mode(&self) -> ComparisonMode {
        self.inner().mode()
    }

    fn next_pair(&mut self) -> Option<Pair> {
        self.inner_mut().next_pair()
    }

    fn submit(&mut self, comparison: Comparison) -> Result<()> {
        self.inner_mut().submit(comparison)
    }

    fn results(&self) -> Vec<Standing> {
        self.inner().results()
    }

    fn is_final(&self) -> bool {
        self.inner().is_final()
    }

    fn pending_count(&self) -> Option<usize> {
        self.inner().pending_count()
    }

    fn comparisons(&self) -> &[Comparison] {
        self.inner().comparisons()
    }

    fn encode_state(&self) -> String {
        self.inner().encode_state()
    }
}

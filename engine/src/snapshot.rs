//! Engine state and its codec.
//!
//! Strategy state travels between invocations as an opaque string on the
//! session record. The blob is a cache of state derivable from the session's
//! item list, so decoding never fails: anything unreadable or inconsistent
//! with the items is replaced by a freshly initialized state.

use crate::{error::Result, Comparison, ComparisonMode, Cursor, Error, Item};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Version of the state blob format for future compatibility.
pub const STATE_FORMAT_VERSION: u32 = 1;

/// Working state of one strategy.
pub trait EngineState: Serialize + DeserializeOwned + Clone {
    /// Mode tag written into the blob.
    const MODE: ComparisonMode;

    /// State for a session that has not judged anything yet.
    fn fresh(items: &[Item], rng: &mut dyn RngCore) -> Self;

    /// Check the state against the session's items.
    fn validate(&self, items: &[Item]) -> Result<()>;
}

/// State of the exhaustive strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhaustiveState {
    pub comparisons: Vec<Comparison>,
}

impl EngineState for ExhaustiveState {
    const MODE: ComparisonMode = ComparisonMode::Exhaustive;

    fn fresh(_items: &[Item], _rng: &mut dyn RngCore) -> Self {
        Self::default()
    }

    fn validate(&self, items: &[Item]) -> Result<()> {
        validate_comparisons(&self.comparisons, items)
    }
}

/// State of the assumed-transitive strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitiveState {
    /// Best first.
    pub ranking: Vec<Item>,
    /// Not yet inserted, in insertion order.
    pub remaining: Vec<Item>,
    pub comparisons: Vec<Comparison>,
    #[serde(default)]
    pub cursor: Option<Cursor>,
}

impl EngineState for TransitiveState {
    const MODE: ComparisonMode = ComparisonMode::AssumedTransitive;

    fn fresh(items: &[Item], rng: &mut dyn RngCore) -> Self {
        let mut shuffled = items.to_vec();
        shuffled.shuffle(rng);

        // Fewer than two items are already in order.
        if shuffled.len() < 2 {
            return Self {
                ranking: shuffled,
                ..Self::default()
            };
        }

        Self {
            remaining: shuffled,
            ..Self::default()
        }
    }

    fn validate(&self, items: &[Item]) -> Result<()> {
        // ranking, remaining and the cursor item partition the session items
        let mut held: Vec<&str> = self
            .ranking
            .iter()
            .chain(&self.remaining)
            .chain(self.cursor.as_ref().map(|c| &c.item))
            .map(|i| i.name.as_str())
            .collect();
        let mut expected: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        held.sort_unstable();
        expected.sort_unstable();
        if held != expected {
            return Err(Error::InvalidState(
                "ranked, remaining and cursor items do not match session items".into(),
            ));
        }

        if items.len() >= 2 && self.ranking.len() == 1 {
            return Err(Error::InvalidState("ranking holds a single item".into()));
        }
        if items.len() < 2 && !self.remaining.is_empty() {
            return Err(Error::InvalidState(
                "remaining items without anything to compare".into(),
            ));
        }

        if let Some(cursor) = &self.cursor {
            if self.ranking.len() < 2 || cursor.test_pos == 0 || cursor.test_pos >= self.ranking.len()
            {
                return Err(Error::InvalidState(format!(
                    "cursor position {} outside ranking of {}",
                    cursor.test_pos,
                    self.ranking.len()
                )));
            }
        }

        validate_comparisons(&self.comparisons, items)
    }
}

fn validate_comparisons(comparisons: &[Comparison], items: &[Item]) -> Result<()> {
    let known: HashSet<&str> = items.iter().map(|i| i.name.as_str()).collect();
    let mut seen = HashSet::with_capacity(comparisons.len());

    for comparison in comparisons {
        comparison
            .check_winner()
            .map_err(|e| Error::InvalidState(e.to_string()))?;

        if let Some(unknown) = comparison
            .items
            .iter()
            .find(|i| !known.contains(i.name.as_str()))
        {
            return Err(Error::InvalidState(format!("unknown item: {}", unknown.name)));
        }
        if comparison.items[0] == comparison.items[1] {
            return Err(Error::InvalidState(format!(
                "item compared with itself: {}",
                comparison.items[0].name
            )));
        }
        if !seen.insert(comparison.key()) {
            return Err(Error::InvalidState(format!(
                "duplicate comparison: {} vs {}",
                comparison.items[0].name, comparison.items[1].name
            )));
        }
    }

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, S> {
    format_version: u32,
    mode: ComparisonMode,
    state: &'a S,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<S> {
    format_version: u32,
    mode: ComparisonMode,
    state: S,
}

/// Serialize state into a session blob.
pub fn encode<S: EngineState>(state: &S) -> String {
    let envelope = EnvelopeRef {
        format_version: STATE_FORMAT_VERSION,
        mode: S::MODE,
        state,
    };
    // Plain structs with string keys always serialize.
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// Parse and validate a session blob.
pub fn try_decode<S: EngineState>(blob: &str, items: &[Item]) -> Result<S> {
    if blob.trim().is_empty() {
        return Err(Error::InvalidState("empty state".into()));
    }

    let envelope: Envelope<S> =
        serde_json::from_str(blob).map_err(|e| Error::InvalidState(e.to_string()))?;

    if envelope.format_version > STATE_FORMAT_VERSION {
        return Err(Error::InvalidState(format!(
            "unsupported state format version: {} (max supported: {})",
            envelope.format_version, STATE_FORMAT_VERSION
        )));
    }
    if envelope.mode != S::MODE {
        return Err(Error::InvalidState(format!(
            "state written by {} mode, expected {}",
            envelope.mode,
            S::MODE
        )));
    }

    envelope.state.validate(items)?;
    Ok(envelope.state)
}

/// Decode a session blob, reinitializing when it cannot be used.
pub fn decode<S: EngineState>(blob: &str, items: &[Item], rng: &mut dyn RngCore) -> S {
    match try_decode(blob, items) {
        Ok(state) => state,
        Err(err) => {
            let mode = S::MODE;
            if blob.trim().is_empty() {
                tracing::debug!(%mode, "no stored state, starting fresh");
            } else {
                tracing::warn!(%mode, %err, "discarding stored state, starting fresh");
            }
            S::fresh(items, rng)
        }
    }
}

//! Session record consumed by the engine and the comparison modes it may
//! declare.

use crate::{error::Result, Error, Item, SessionId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How pairs are scheduled for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Every unordered pair is judged once; ranked by win count.
    Exhaustive,
    /// Insertion sort that trusts the judge to be transitive.
    AssumedTransitive,
}

impl ComparisonMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::Exhaustive => "exhaustive",
            ComparisonMode::AssumedTransitive => "assumed-transitive",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = Error;

    /// Accepts the canonical names and the short `full` / `assuming` aliases.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" | "full" => Ok(ComparisonMode::Exhaustive),
            "assumed-transitive" | "assuming" => Ok(ComparisonMode::AssumedTransitive),
            _ => Err(Error::UnsupportedMode(s.to_string())),
        }
    }
}

/// A ranking session as kept by the session store.
///
/// The engine reads `items` and `comparison_mode` and owns `state_blob`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    /// Declared mode as stored; resolved by [`Session::mode`].
    pub comparison_mode: String,
    pub items: Vec<Item>,
    /// Opaque engine state. Empty until the first comparison is committed.
    #[serde(default)]
    pub state_blob: String,
    /// Creation time in milliseconds since epoch.
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Session {
    pub fn new(
        id: impl Into<SessionId>,
        name: impl Into<String>,
        mode: ComparisonMode,
        items: Vec<Item>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            comparison_mode: mode.as_str().to_string(),
            items,
            state_blob: String::new(),
            created_at,
        }
    }

    pub fn mode(&self) -> Result<ComparisonMode> {
        self.comparison_mode.parse()
    }

    /// Reject item lists where two items share a name.
    ///
    /// The strategies key everything by name, so such items would be
    /// indistinguishable. Not enforced by the strategies themselves.
    pub fn validate_items(items: &[Item]) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            if !seen.insert(item.name.as_str()) {
                return Err(Error::DuplicateItemName(item.name.clone()));
            }
        }
        Ok(())
    }
}

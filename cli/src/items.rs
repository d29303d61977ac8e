//! Loading the items a session ranks.

use crate::error::{AppError, Result};
use ranker_engine::{Item, Session};
use std::path::Path;

/// Parse item names from text. A JSON array of strings is read as such,
/// anything else as one item per line. Blank entries are dropped.
pub fn parse_items(content: &str) -> Result<Vec<Item>> {
    let trimmed = content.trim();
    let names: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| AppError::InvalidItems(format!("file looks like JSON but failed to parse: {e}")))?
            .into_iter()
            .map(|s| s.trim().to_string())
            .collect()
    } else {
        trimmed.lines().map(|l| l.trim().to_string()).collect()
    };

    Ok(names
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(Item::new)
        .collect())
}

/// Read items from a file. At least two distinct items are required.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::InvalidItems(format!("cannot read {}: {e}", path.display())))?;

    let items = parse_items(&content)?;
    if items.len() < 2 {
        return Err(AppError::InvalidItems(format!(
            "at least two items are required, {} found in {}",
            items.len(),
            path.display()
        )));
    }

    Session::validate_items(&items)?;
    tracing::debug!(count = items.len(), path = %path.display(), "loaded items");
    Ok(items)
}

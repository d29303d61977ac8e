//! `ranker session ...`

use super::Context;
use crate::error::{AppError, Result};
use crate::items::load_items;
use crate::prompt;
use crate::slug::slugify;
use ranker_engine::{ComparisonMode, Session, SessionStore};
use std::io::{BufRead, Write};
use std::path::Path;

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Create a session from an item file. Returns the new session id.
pub fn create<W: Write>(
    ctx: &Context,
    name: &str,
    file: &Path,
    mode: ComparisonMode,
    out: &mut W,
) -> Result<String> {
    let id = slugify(name);
    if id.is_empty() {
        return Err(AppError::InvalidName(name.to_string()));
    }

    let items = load_items(file)?;
    let mut store = ctx.store()?;
    if store.load_session(&id)?.is_some() {
        return Err(AppError::SessionExists(id));
    }

    let session = Session::new(id.clone(), name, mode, items, now_millis());
    store.save_session(&session)?;
    tracing::info!(session = %id, %mode, items = session.items.len(), "created session");

    writeln!(out, "Session {id} created successfully!")?;
    Ok(id)
}

pub fn list<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    let sessions = ctx.store()?.list_sessions()?;
    writeln!(out, "Sessions:")?;
    for session in sessions {
        writeln!(out, "  - {} ({})", session.id, session.name)?;
    }
    Ok(())
}

pub fn delete<W: Write>(ctx: &Context, id: &str, out: &mut W) -> Result<()> {
    ctx.store()?.delete_session(id)?;
    tracing::info!(session = %id, "deleted session");
    writeln!(out, "Session {id} deleted successfully!")?;
    Ok(())
}

pub fn delete_all<R: BufRead, W: Write>(
    ctx: &Context,
    yes: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if !yes && !prompt::confirm(input, out, "Are you sure you want to delete all sessions?")? {
        writeln!(out, "Aborted")?;
        return Ok(());
    }

    let removed = ctx.store()?.delete_all()?;
    tracing::info!(removed, "deleted all sessions");
    writeln!(out, "All sessions deleted successfully!")?;
    Ok(())
}

//! File-backed session store.
//!
//! One pretty-printed JSON document per session at `<dir>/<id>.json`.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous version intact.

use crate::slug::is_slug;
use ranker_engine::error::Result;
use ranker_engine::{Error, Session, SessionStore};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

fn storage_error(action: &str, path: &Path, err: impl Display) -> Error {
    Error::Storage(format!("{action} {}: {err}", path.display()))
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| storage_error("cannot create", &dir, e))?;
        Ok(Self { dir })
    }

    /// Ids that are not slugs can never name a stored session.
    fn path(&self, id: &str) -> Option<PathBuf> {
        is_slug(id).then(|| self.dir.join(format!("{id}.json")))
    }

    /// Ids of every `<id>.json` file in the store, sorted. Files are not
    /// opened, so unreadable sessions are still listed.
    fn session_ids(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| storage_error("cannot list", &self.dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| storage_error("cannot list", &self.dir, e))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(id) if is_slug(id) => ids.push(id.to_string()),
                _ => tracing::debug!(path = %path.display(), "skipping file not named by a session id"),
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Delete every stored session without reading it, returning how many
    /// were removed.
    pub fn delete_all(&mut self) -> Result<usize> {
        let ids = self.session_ids()?;
        for id in &ids {
            self.delete_session(id)?;
        }
        Ok(ids.len())
    }
}

impl SessionStore for FileStore {
    fn load_session(&self, id: &str) -> Result<Option<Session>> {
        let Some(path) = self.path(id) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path).map_err(|e| storage_error("cannot read", &path, e))?;
        let session = serde_json::from_str(&text).map_err(|e| storage_error("cannot parse", &path, e))?;
        Ok(Some(session))
    }

    fn save_session(&mut self, session: &Session) -> Result<()> {
        let path = self
            .path(&session.id)
            .ok_or_else(|| Error::Storage(format!("invalid session id: {:?}", session.id)))?;
        let text = serde_json::to_string_pretty(session)
            .map_err(|e| storage_error("cannot encode", &path, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| storage_error("cannot write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_error("cannot replace", &path, e))?;

        tracing::trace!(path = %path.display(), "saved session");
        Ok(())
    }

    /// Sessions that cannot be read are logged and left out.
    fn list_sessions(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        for id in self.session_ids()? {
            match self.load_session(&id) {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(err) => tracing::warn!(session = %id, %err, "skipping unreadable session"),
            }
        }
        Ok(sessions)
    }

    fn delete_session(&mut self, id: &str) -> Result<()> {
        let path = self
            .path(id)
            .filter(|path| path.is_file())
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        fs::remove_file(&path).map_err(|e| storage_error("cannot delete", &path, e))
    }
}

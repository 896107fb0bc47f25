//! File persistence: one pretty-printed JSON document per proposal.
//!
//! DESIGN
//! ======
//! Proposals live at `<data-dir>/<id>.json`. A save writes a sibling
//! `.tmp` file and renames it over the target, so a crash mid-write leaves
//! the previous copy intact. The store never edits a proposal; it returns
//! exactly what it wrote, which loads back unchanged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use editor::collab::{CollabError, Persistence};
use editor::doc::Proposal;
use tracing::debug;
use uuid::Uuid;

/// Proposal store backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

fn storage(e: &io::Error) -> CollabError {
    CollabError::Storage(e.to_string())
}

impl JsonFileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Ids of every stored proposal, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CollabError::Storage`] if the directory cannot be read. A
    /// missing directory is an empty store.
    pub fn ids(&self) -> Result<Vec<Uuid>, CollabError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage(&e)),
        };

        let mut ids: Vec<Uuid> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem().and_then(|stem| Uuid::parse_str(&stem.to_string_lossy()).ok())
                } else {
                    None
                }
            })
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

impl Persistence for JsonFileStore {
    fn save(&self, proposal: &Proposal) -> Result<Proposal, CollabError> {
        fs::create_dir_all(&self.dir).map_err(|e| storage(&e))?;
        let text = serde_json::to_string_pretty(proposal)?;

        let target = self.path(proposal.id);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| storage(&e))?;
        fs::rename(&tmp, &target).map_err(|e| storage(&e))?;

        debug!(proposal = %proposal.id, path = %target.display(), "proposal saved");
        Ok(proposal.clone())
    }

    fn load(&self, id: Uuid) -> Result<Proposal, CollabError> {
        let text = match fs::read_to_string(self.path(id)) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(CollabError::NotFound(id)),
            Err(e) => return Err(storage(&e)),
        };
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;

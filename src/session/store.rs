//! Session file load/save with atomic writes.
//!
//! Format: JSON `{version, last_updated, messages}` under the user cache
//! directory (`aifr/session.json`, or `aifr/sessions/<name>.json` for named
//! sessions). Writes go to a `.tmp` sibling, are fsynced, then renamed over
//! the target, so a reader never observes a partial file and a crash leaves
//! the previous state intact. No locking: the file is process-private by
//! convention.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationState, Message};

/// Schema version; a mismatch discards the persisted state.
const SESSION_VERSION: u32 = 1;

const SESSION_FILENAME: &str = "session.json";

/// Sessions older than this are discarded on load.
pub const SESSION_TTL_HOURS: i64 = 4;

#[derive(Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    last_updated: DateTime<Utc>,
    messages: Vec<Message>,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default per-user location.
    pub fn default_location() -> Result<Self> {
        Ok(Self { path: cache_dir()?.join(SESSION_FILENAME) })
    }

    /// Store for a named session under `sessions/<name>.json`.
    pub fn named(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            bail!("invalid session name: {name}");
        }
        Ok(Self { path: cache_dir()?.join("sessions").join(format!("{name}.json")) })
    }

    /// Store at an explicit path (tests).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state.
    ///
    /// Non-fatal by design: a missing file, malformed or structurally
    /// invalid JSON (one stderr notice), a schema version mismatch, or a
    /// state older than the TTL all yield an empty state.
    pub fn load(&self) -> ConversationState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return ConversationState::empty(),
        };

        let file: SessionFile = match serde_json::from_str(&raw) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Notice: ignoring malformed session file {}: {e}", self.path.display());
                return ConversationState::empty();
            }
        };

        if file.version != SESSION_VERSION {
            return ConversationState::empty();
        }
        if Utc::now() - file.last_updated > Duration::hours(SESSION_TTL_HOURS) {
            return ConversationState::empty();
        }

        let state = ConversationState { messages: file.messages, last_updated: file.last_updated };
        if !state.is_well_formed() {
            eprintln!(
                "Notice: ignoring session file with inconsistent history {}",
                self.path.display()
            );
            return ConversationState::empty();
        }
        state
    }

    /// Append one completed exchange and rewrite the file atomically.
    ///
    /// Both messages become durable together or not at all.
    pub fn append(
        &self,
        state: &mut ConversationState,
        user_content: &str,
        assistant_content: &str,
    ) -> Result<()> {
        state.push_turn(user_content, assistant_content);
        self.write_atomic(state)
    }

    /// Delete the session file. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }

    fn write_atomic(&self, state: &ConversationState) -> Result<()> {
        let dir = self
            .path
            .parent()
            .context("session path has no parent directory")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let payload = SessionFile {
            version: SESSION_VERSION,
            last_updated: state.last_updated,
            messages: state.messages.clone(),
        };
        let json = serde_json::to_string(&payload).context("failed to serialize session")?;

        // Temp file in the same directory so the rename stays on one filesystem
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = File::create(&tmp_path)
            .with_context(|| format!("failed to create {}", tmp_path.display()))?;
        tmp.write_all(json.as_bytes())
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        tmp.sync_all().context("failed to sync session temp file")?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to rename into {}", self.path.display()))?;
        Ok(())
    }
}

fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("failed to resolve the platform cache directory")?;
    Ok(base.join("aifr"))
}

//!
//! bankgate storage module
//! -----------------------
//! This module implements the durable key-value slot the portal core mirrors
//! its state into: the persisted session envelope, the append-only audit list
//! and optional per-table entity mirrors. Each named slot is a single JSON
//! text file under a configured root folder, read and written whole.
//!
//! Key responsibilities:
//! - Named string-blob get/set with fire-and-forget write semantics.
//! - Versioned envelopes: a stored schema-version mismatch yields a fresh,
//!   empty state instead of a crash.
//! - The single best-effort fault point: a failed write is logged, counted
//!   and never surfaced to the caller.
//!
//! The public API centers around the `DurableStore` type, which is cheap to
//! clone and hand to the session store, audit log and entity stores.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

fn sanitize_slot_name(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Durable key-value slot store rooted at a filesystem directory.
///
/// One process-wide instance is expected; clones share the same root and the
/// same write-fault counter. There is no retry, no conflict resolution and no
/// partial-write recovery: last writer wins, matching the portal's
/// local-storage mirroring model.
#[derive(Clone)]
pub struct DurableStore {
    root: PathBuf,
    write_faults: Arc<parking_lot::RwLock<u64>>,
}

/// Envelope wrapped around every versioned durable blob.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    state: T,
}

impl DurableStore {
    /// Create a store rooted at the given folder. The directory is created if
    /// it does not already exist.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, write_faults: Arc::new(parking_lot::RwLock::new(0)) })
    }

    /// Return the configured root folder for this store.
    pub fn root_path(&self) -> &PathBuf { &self.root }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_slot_name(name)))
    }

    /// Read a named slot. Absent or unreadable slots answer `None`.
    pub fn get(&self, name: &str) -> Option<String> {
        match std::fs::read_to_string(self.slot_path(name)) {
            Ok(s) => Some(s),
            Err(_) => None,
        }
    }

    /// Write a named slot whole. Best-effort: a failed write is logged at
    /// warn level and counted, never propagated. This is the one place in the
    /// core where a persistence fault is absorbed.
    pub fn set(&self, name: &str, blob: &str) {
        let path = self.slot_path(name);
        if let Err(e) = std::fs::write(&path, blob) {
            warn!(target: "bankgate::storage", "slot write failed: slot='{}' path='{}' err={}", name, path.display(), e);
            *self.write_faults.write() += 1;
            return;
        }
        debug!(target: "bankgate::storage", "slot write: slot='{}' bytes={}", name, blob.len());
    }

    /// Remove a named slot. Returns true if it existed.
    pub fn delete(&self, name: &str) -> bool {
        std::fs::remove_file(self.slot_path(name)).is_ok()
    }

    /// Number of absorbed write faults since this store (or any clone of it)
    /// was created. Exposed so the gap stays observable.
    pub fn write_faults(&self) -> u64 { *self.write_faults.read() }

    /// Serialize `state` under a version marker and write it to the slot.
    pub fn save_versioned<T: Serialize>(&self, name: &str, version: u32, state: &T) {
        match serde_json::to_string(&Envelope { version, state }) {
            Ok(blob) => self.set(name, &blob),
            Err(e) => {
                warn!(target: "bankgate::storage", "slot serialize failed: slot='{}' err={}", name, e);
                *self.write_faults.write() += 1;
            }
        }
    }

    /// Load a versioned slot. Answers `None` when the slot is absent, fails
    /// to parse, or carries a different schema version; callers start from a
    /// fresh state in all three cases.
    pub fn load_versioned<T: DeserializeOwned>(&self, name: &str, version: u32) -> Option<T> {
        let blob = self.get(name)?;
        let env: Envelope<T> = match serde_json::from_str(&blob) {
            Ok(env) => env,
            Err(e) => {
                debug!(target: "bankgate::storage", "slot parse failed, starting fresh: slot='{}' err={}", name, e);
                return None;
            }
        };
        if env.version != version {
            debug!(
                target: "bankgate::storage",
                "slot version mismatch, starting fresh: slot='{}' stored={} expected={}",
                name, env.version, version
            );
            return None;
        }
        Some(env.state)
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod storage_tests;

//! Append-only audit trail persisted through the durable slot store.
//!
//! Events are immutable once appended; the log is read-modify-written as a
//! JSON list, matching the portal's local-storage behavior. Retention is
//! bounded explicitly: appending past the configured cap drops the oldest
//! entries and emits a warning so the growth limit stays observable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::DurableStore;

pub const AUDIT_SLOT: &str = "rbac_audit_logs";

/// Default retention cap. Deliberately generous for a demo; the original
/// portal kept the list unbounded.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Actions recorded by the session store. Kept as a closed set so the trail
/// is greppable.
pub const ACTION_LOGIN: &str = "USER_LOGIN";
pub const ACTION_LOGOUT: &str = "USER_LOGOUT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub action: String,
    pub resource: String,
    pub details: String,
    pub ip_address: String,
}

/// Append-only log over a durable slot. Cheap to clone; clones share the
/// underlying slot via the store handle.
#[derive(Clone)]
pub struct AuditLog {
    store: DurableStore,
    slot: String,
    max_entries: usize,
}

impl AuditLog {
    pub fn new(store: DurableStore) -> Self {
        Self { store, slot: AUDIT_SLOT.to_string(), max_entries: DEFAULT_MAX_ENTRIES }
    }

    pub fn with_slot(store: DurableStore, slot: impl Into<String>, max_entries: usize) -> Self {
        Self { store, slot: slot.into(), max_entries }
    }

    /// Append one event for an authentication action. The write is
    /// best-effort; a persistence fault is absorbed by the slot store.
    pub fn record(&self, user_id: &str, action: &str, details: impl Into<String>) {
        let event = AuditEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            action: action.to_string(),
            resource: "AUTH".to_string(),
            details: details.into(),
            // Local demo; a real deployment would take this from the request.
            ip_address: "127.0.0.1".to_string(),
        };
        self.append(event);
    }

    /// Read-modify-write append of a fully formed event.
    pub fn append(&self, event: AuditEvent) {
        let mut events = self.entries();
        events.push(event);
        if events.len() > self.max_entries {
            let overflow = events.len() - self.max_entries;
            events.drain(..overflow);
            warn!(
                target: "bankgate::audit",
                "audit log cap reached: dropped {} oldest entries (cap={})",
                overflow, self.max_entries
            );
        }
        match serde_json::to_string(&events) {
            Ok(blob) => self.store.set(&self.slot, &blob),
            Err(e) => warn!(target: "bankgate::audit", "audit serialize failed: {}", e),
        }
        debug!(target: "bankgate::audit", "audit append: total={}", events.len());
    }

    /// All recorded events, oldest first. An absent or unreadable slot is an
    /// empty trail.
    pub fn entries(&self) -> Vec<AuditEvent> {
        self.store
            .get(&self.slot)
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default()
    }
}

//! Generic entity store factory.
//!
//! Each `EntityStore` owns its in-memory collection exclusively; no two
//! stores share entities. Mutations are synchronous and atomic under the
//! single-threaded execution model. When persistence is enabled the whole
//! collection is mirrored to a durable slot after every mutation
//! (last-writer-wins, no conflict resolution, no partial-write recovery).

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::DurableStore;

use super::entity::HasId;

/// Mirror slots carry a version so a future shape change hydrates fresh
/// instead of failing to parse.
const MIRROR_SCHEMA_VERSION: u32 = 1;

pub struct EntityStore<T> {
    data: Vec<T>,
    mirror: Option<(DurableStore, String)>,
}

impl<T> EntityStore<T>
where
    T: HasId + Clone + Serialize + DeserializeOwned,
{
    /// In-memory store seeded with an initial collection.
    pub fn new(initial: Vec<T>) -> Self {
        Self { data: initial, mirror: None }
    }

    /// Store mirrored to a named durable slot. A readable prior mirror wins
    /// over the seed collection so data survives a process restart.
    pub fn persistent(initial: Vec<T>, durable: DurableStore, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let data = durable
            .load_versioned::<Vec<T>>(&slot, MIRROR_SCHEMA_VERSION)
            .unwrap_or(initial);
        let store = Self { data, mirror: Some((durable, slot)) };
        store.write_mirror();
        store
    }

    /// Insert a new entity with a freshly synthesized unique identifier,
    /// most-recent-first. Returns the generated id. Total: collision
    /// probability of the random identifier is treated as negligible.
    pub fn add(&mut self, mut item: T) -> String {
        let id = Uuid::new_v4().to_string();
        item.assign_id(id.clone());
        self.data.insert(0, item);
        self.write_mirror();
        debug!(target: "bankgate::table", "store add: id={} total={}", id, self.data.len());
        id
    }

    /// Apply a mutation to the entity matching `id`. The identifier is
    /// restored afterwards and stays immutable regardless of what the closure
    /// does. Silent no-op when the id is absent (idempotent).
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut T)) {
        match self.data.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                apply(item);
                item.assign_id(id.to_string());
            }
            None => {
                warn!(target: "bankgate::table", "update on absent id ignored: id={}", id);
                return;
            }
        }
        self.write_mirror();
    }

    /// Remove the entity matching `id`. No-op when absent; returns whether
    /// anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.data.len();
        self.data.retain(|item| item.id() != id);
        let removed = self.data.len() != before;
        if removed {
            self.write_mirror();
        }
        removed
    }

    /// Point lookup.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.data.iter().find(|item| item.id() == id)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn write_mirror(&self) {
        if let Some((durable, slot)) = &self.mirror {
            // Best-effort: a write fault is absorbed and counted by the slot
            // store, never surfaced here.
            durable.save_versioned(slot, MIRROR_SCHEMA_VERSION, &self.data);
        }
    }
}

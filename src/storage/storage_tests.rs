use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Marker {
    label: String,
    count: u32,
}

#[test]
fn test_set_and_get_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DurableStore::new(tmp.path()).unwrap();
    assert!(store.get("session").is_none());
    store.set("session", "{\"hello\":true}");
    assert_eq!(store.get("session").as_deref(), Some("{\"hello\":true}"));
    // Last writer wins, whole-blob replace
    store.set("session", "{}");
    assert_eq!(store.get("session").as_deref(), Some("{}"));
}

#[test]
fn test_slot_names_are_sanitized() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DurableStore::new(tmp.path()).unwrap();
    store.set("audit/log:v2", "[]");
    // Path separators must not escape the root
    assert_eq!(store.get("audit/log:v2").as_deref(), Some("[]"));
    assert!(tmp.path().join("audit_log_v2.json").exists());
}

#[test]
fn test_versioned_roundtrip_and_mismatch() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DurableStore::new(tmp.path()).unwrap();
    let m = Marker { label: "session".into(), count: 3 };
    store.save_versioned("slot", 2, &m);
    let back: Option<Marker> = store.load_versioned("slot", 2);
    assert_eq!(back, Some(m));
    // A different expected version means fresh state, not an error
    let stale: Option<Marker> = store.load_versioned("slot", 3);
    assert!(stale.is_none());
}

#[test]
fn test_garbage_blob_yields_fresh_state() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DurableStore::new(tmp.path()).unwrap();
    store.set("slot", "not json at all");
    let back: Option<Marker> = store.load_versioned("slot", 1);
    assert!(back.is_none());
}

#[test]
fn test_delete_slot() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DurableStore::new(tmp.path()).unwrap();
    store.set("slot", "x");
    assert!(store.delete("slot"));
    assert!(store.get("slot").is_none());
    assert!(!store.delete("slot"));
}

#[test]
fn test_write_fault_is_counted_not_raised() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DurableStore::new(tmp.path()).unwrap();
    assert_eq!(store.write_faults(), 0);
    // Force a failure by replacing the root with a file of the same name
    drop(store);
    let root = tmp.path().join("state");
    std::fs::write(&root, "not a directory").unwrap();
    let broken = DurableStore { root, write_faults: std::sync::Arc::new(parking_lot::RwLock::new(0)) };
    broken.set("slot", "x");
    crate::tprintln!("fault counter now {}", broken.write_faults());
    assert_eq!(broken.write_faults(), 1);
    // Clones observe the same counter
    let clone = broken.clone();
    clone.set("slot", "y");
    assert_eq!(broken.write_faults(), 2);
}

//! JSON-document event store.
//!
//! The disk format is the single document `{ "events": [...] }`. Every
//! operation here is one keyed read-modify-write executed under an async
//! mutex, and writes land in a temp file that is renamed into place, so
//! concurrent requests cannot silently discard each other's writes and a
//! crashed write never truncates the document.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use agenda_core::batch;
use agenda_core::{Event, EventCollection, EventPatch, IdentifiedPatch};
use anyhow::{Context, Result};
use tokio::sync::Mutex;

pub struct EventStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl EventStore {
    pub fn new(path: PathBuf) -> Self {
        EventStore {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing document reads as an empty collection; the file is
    /// created on first write.
    fn read(&self) -> Result<EventCollection> {
        if !self.path.exists() {
            return Ok(EventCollection::default());
        }
        EventCollection::load(&self.path)
            .with_context(|| format!("Failed to read event store at {}", self.path.display()))
    }

    fn write(&self, collection: &EventCollection) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(collection)?;
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        std::fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }

    /// All stored events, in store order.
    pub async fn list(&self) -> Result<Vec<Event>> {
        let _guard = self.lock.lock().await;
        Ok(self.read()?.events)
    }

    /// Append one event to the collection.
    pub async fn insert(&self, event: Event) -> Result<Event> {
        let _guard = self.lock.lock().await;
        let mut collection = self.read()?;
        collection.events.push(event.clone());
        self.write(&collection)?;
        Ok(event)
    }

    /// Append a batch of events to the collection.
    pub async fn insert_many(&self, events: Vec<Event>) -> Result<Vec<Event>> {
        let _guard = self.lock.lock().await;
        let mut collection = self.read()?;
        collection.events.extend(events.iter().cloned());
        self.write(&collection)?;
        Ok(events)
    }

    /// Shallow-merge a patch onto the event with the given id.
    ///
    /// Returns the updated event, or `None` when the id is absent.
    pub async fn update(&self, id: &str, patch: &EventPatch) -> Result<Option<Event>> {
        let _guard = self.lock.lock().await;
        let mut collection = self.read()?;

        let Some(event) = collection.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        patch.apply_to(event);
        let updated = event.clone();

        self.write(&collection)?;
        Ok(Some(updated))
    }

    /// Apply a batch of patches.
    ///
    /// Returns the pre-patch collection when at least one patch matched
    /// (partial matches still persist), or `None` when nothing matched —
    /// in that case the document is left untouched.
    pub async fn apply_patches(&self, patches: &[IdentifiedPatch]) -> Result<Option<Vec<Event>>> {
        let _guard = self.lock.lock().await;
        let mut collection = self.read()?;
        let before = collection.events.clone();

        let matched = batch::batch_update(&mut collection.events, patches);
        if matched == 0 {
            return Ok(None);
        }

        self.write(&collection)?;
        Ok(Some(before))
    }

    /// Remove the event with the given id. Removing an absent id is a
    /// no-op, not an error.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut collection = self.read()?;
        collection.events.retain(|e| e.id != id);
        self.write(&collection)?;
        Ok(())
    }

    /// Remove every event whose id is in the given set.
    pub async fn remove_many(&self, ids: &HashSet<String>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut collection = self.read()?;
        collection.events = batch::batch_delete(collection.events, ids);
        self.write(&collection)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::RepeatSpec;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn make_test_event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatSpec::none(),
            notification_time: 10,
        }
    }

    fn temp_store(dir: &TempDir) -> EventStore {
        EventStore::new(dir.path().join("events.json"))
    }

    #[tokio::test]
    async fn test_missing_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        assert!(store.list().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_insert_creates_document_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        store.insert(make_test_event("e1")).await.unwrap();
        store.insert(make_test_event("e2")).await.unwrap();

        let events = store.list().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "e1");
        assert!(store.path().exists());
        // No leftover temp file after the rename
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none_and_leaves_document() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.insert(make_test_event("e1")).await.unwrap();

        let patch = EventPatch {
            title: Some("X".to_string()),
            ..EventPatch::default()
        };
        assert!(store.update("ghost", &patch).await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap()[0].title, "Event e1");
    }

    #[tokio::test]
    async fn test_update_persists_merged_event() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.insert(make_test_event("e1")).await.unwrap();

        let patch = EventPatch {
            title: Some("Renamed".to_string()),
            ..EventPatch::default()
        };
        let updated = store.update("e1", &patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(store.list().await.unwrap()[0].title, "Renamed");
    }

    #[tokio::test]
    async fn test_apply_patches_returns_pre_patch_collection() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.insert(make_test_event("e1")).await.unwrap();

        let patches: Vec<IdentifiedPatch> =
            serde_json::from_value(serde_json::json!([{ "id": "e1", "title": "Renamed" }]))
                .unwrap();

        let before = store.apply_patches(&patches).await.unwrap().unwrap();
        assert_eq!(before[0].title, "Event e1");
        assert_eq!(store.list().await.unwrap()[0].title, "Renamed");
    }

    #[tokio::test]
    async fn test_apply_patches_no_match_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.insert(make_test_event("e1")).await.unwrap();

        let patches: Vec<IdentifiedPatch> =
            serde_json::from_value(serde_json::json!([{ "id": "ghost", "title": "X" }])).unwrap();

        assert!(store.apply_patches(&patches).await.unwrap().is_none());
        assert_eq!(store.list().await.unwrap()[0].title, "Event e1");
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);
        store.insert(make_test_event("e1")).await.unwrap();

        store.remove("e1").await.unwrap();
        store.remove("e1").await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }
}

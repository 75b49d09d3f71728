//! Validated in-memory record store
//!
//! A `RecordStore<E>` owns an ordered collection of records of one entity kind
//! plus the counter that hands out their ids. Callers only see the operations
//! below, never the backing vector, so every write goes through the same
//! uniqueness and id rules.
//!
//! ## Guarantees
//! - Ids start at 1, grow monotonically and are never reused after a delete.
//! - The record vector and the id counter live behind one lock; each mutating
//!   operation (uniqueness check included) runs under a single write guard.
//! - A rejected operation leaves the store exactly as it was.
//! - Derived values are computed on every read and never stored.

pub mod error;
pub mod record;

use chrono::Utc;
use tokio::sync::RwLock;

pub use error::{RecordError, RecordResult};
pub use record::{Entity, Record, RecordView};

use record::normalize_name;

#[derive(Debug)]
struct StoreState<E: Entity> {
    records: Vec<Record<E>>,
    next_id: u64,
}

impl<E: Entity> StoreState<E> {
    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn ensure_unique(&self, candidate: &E, exclude_id: Option<u64>) -> RecordResult<()> {
        let Some(name) = candidate.unique_name() else {
            return Ok(());
        };
        let needle = normalize_name(name);

        let taken = self.records.iter().any(|record| {
            Some(record.id) != exclude_id
                && record
                    .fields
                    .unique_name()
                    .is_some_and(|existing| normalize_name(existing) == needle)
        });

        if taken {
            return Err(RecordError::validation(format!(
                "a {} named '{}' already exists",
                E::LABEL,
                name.trim()
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RecordStore<E: Entity> {
    state: RwLock<StoreState<E>>,
}

impl<E: Entity> Default for RecordStore<E> {
    fn default() -> Self {
        Self {
            state: RwLock::new(StoreState {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E: Entity> RecordStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already-validated fields under the next id.
    pub async fn insert(&self, fields: E) -> RecordResult<RecordView<E>> {
        fields.validate()?;
        let mut state = self.state.write().await;
        state.ensure_unique(&fields, None)?;

        let now = Utc::now();
        let record = Record {
            id: state.next_id,
            fields,
            created_at: now,
            updated_at: now,
        };
        state.next_id += 1;

        let view = record.view();
        state.records.push(record);
        Ok(view)
    }

    /// Full scan in insertion order, keeping the views accepted by `filter`.
    pub async fn list<P>(&self, filter: P) -> Vec<RecordView<E>>
    where
        P: Fn(&RecordView<E>) -> bool,
    {
        self.state
            .read()
            .await
            .records
            .iter()
            .map(Record::view)
            .filter(|view| filter(view))
            .collect()
    }

    pub async fn get_by_id(&self, id: u64) -> RecordResult<RecordView<E>> {
        let state = self.state.read().await;
        state
            .records
            .iter()
            .find(|record| record.id == id)
            .map(Record::view)
            .ok_or_else(|| not_found::<E>(id))
    }

    /// First record whose unique name matches `name` (trimmed, case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> RecordResult<RecordView<E>> {
        let needle = normalize_name(name);
        let state = self.state.read().await;
        state
            .records
            .iter()
            .find(|record| {
                record
                    .fields
                    .unique_name()
                    .is_some_and(|existing| normalize_name(existing) == needle)
            })
            .map(Record::view)
            .ok_or_else(|| {
                RecordError::not_found(format!("{} '{}' not found", E::LABEL, name.trim()))
            })
    }

    /// Apply a validated patch. The patch lands on a copy first so a failed
    /// validation or uniqueness check never leaves a half-updated record behind.
    pub async fn update_by_id(&self, id: u64, patch: E::Patch) -> RecordResult<RecordView<E>> {
        let mut state = self.state.write().await;
        let index = state.position(id).ok_or_else(|| not_found::<E>(id))?;

        let mut fields = state.records[index].fields.clone();
        fields.apply(patch);
        fields.validate()?;
        state.ensure_unique(&fields, Some(id))?;

        let record = &mut state.records[index];
        record.fields = fields;
        record.updated_at = Utc::now();
        Ok(record.view())
    }

    /// Remove the record and hand it back with its derived values.
    pub async fn delete_by_id(&self, id: u64) -> RecordResult<RecordView<E>> {
        let mut state = self.state.write().await;
        let index = state.position(id).ok_or_else(|| not_found::<E>(id))?;
        Ok(state.records.remove(index).view())
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found<E: Entity>(id: u64) -> RecordError {
    RecordError::not_found(format!("{} {} not found", E::LABEL, id))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Label {
        name: String,
        weight: u32,
    }

    #[derive(Debug, Default)]
    struct LabelPatch {
        name: Option<String>,
        weight: Option<u32>,
    }

    #[derive(Debug, Clone, Serialize)]
    struct LabelDerived {
        heavy: bool,
    }

    impl Entity for Label {
        type Patch = LabelPatch;
        type Derived = LabelDerived;
        const LABEL: &'static str = "label";

        fn unique_name(&self) -> Option<&str> {
            Some(&self.name)
        }

        fn validate(&self) -> RecordResult<()> {
            if self.weight > 100 {
                return Err(RecordError::validation("weight must be at most 100"));
            }
            Ok(())
        }

        fn apply(&mut self, patch: LabelPatch) {
            if let Some(name) = patch.name {
                self.name = name;
            }
            if let Some(weight) = patch.weight {
                self.weight = weight;
            }
        }

        fn derive(&self) -> LabelDerived {
            LabelDerived {
                heavy: self.weight > 10,
            }
        }
    }

    fn label(name: &str, weight: u32) -> Label {
        Label {
            name: name.to_string(),
            weight,
        }
    }

    #[tokio::test]
    async fn ids_grow_and_are_never_reused() {
        let store = RecordStore::new();

        let first = store.insert(label("a", 1)).await.expect("insert a");
        let second = store.insert(label("b", 1)).await.expect("insert b");
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);

        store.delete_by_id(2).await.expect("delete b");
        let third = store.insert(label("c", 1)).await.expect("insert c");
        assert_eq!(third.id(), 3);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_without_mutation() {
        let store = RecordStore::new();
        store.insert(label("Ana", 1)).await.expect("insert Ana");

        let err = store
            .insert(label("  aNA ", 2))
            .await
            .expect_err("duplicate should fail");
        assert!(matches!(err, RecordError::Validation(_)));
        assert_eq!(store.len().await, 1);

        let next = store.insert(label("Bob", 1)).await.expect("insert Bob");
        assert_eq!(next.id(), 2);
    }

    #[tokio::test]
    async fn round_trip_keeps_fields_and_derives_on_read() {
        let store = RecordStore::new();
        let created = store.insert(label("crate", 42)).await.expect("insert");

        let fetched = store.get_by_id(created.id()).await.expect("get");
        assert_eq!(fetched.fields(), &label("crate", 42));
        assert!(fetched.derived.heavy);
    }

    #[tokio::test]
    async fn update_excludes_itself_from_uniqueness() {
        let store = RecordStore::new();
        let ana = store.insert(label("Ana", 1)).await.expect("insert Ana");
        store.insert(label("Bob", 1)).await.expect("insert Bob");

        let renamed = store
            .update_by_id(
                ana.id(),
                LabelPatch {
                    name: Some("ANA".to_string()),
                    weight: Some(20),
                },
            )
            .await
            .expect("renaming to own name should pass");
        assert_eq!(renamed.fields().name, "ANA");
        assert!(renamed.derived.heavy);
        assert!(renamed.record.updated_at >= renamed.record.created_at);

        let err = store
            .update_by_id(
                ana.id(),
                LabelPatch {
                    name: Some("bob".to_string()),
                    weight: Some(1),
                },
            )
            .await
            .expect_err("taking another record's name should fail");
        assert!(matches!(err, RecordError::Validation(_)));

        let unchanged = store.get_by_id(ana.id()).await.expect("get");
        assert_eq!(unchanged.fields(), &label("ANA", 20));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = RecordStore::new();
        let created = store.insert(label("a", 1)).await.expect("insert");

        let removed = store.delete_by_id(created.id()).await.expect("delete");
        assert_eq!(removed.fields().name, "a");
        assert!(store.is_empty().await);

        let err = store
            .delete_by_id(created.id())
            .await
            .expect_err("second delete should fail");
        assert_eq!(err, RecordError::not_found("label 1 not found"));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_and_filters_on_derived() {
        let store = RecordStore::new();
        for (name, weight) in [("x", 50), ("y", 1), ("z", 11)] {
            store.insert(label(name, weight)).await.expect("insert");
        }

        let heavy: Vec<_> = store
            .list(|view| view.derived.heavy)
            .await
            .into_iter()
            .map(|view| view.record.fields.name)
            .collect();
        assert_eq!(heavy, vec!["x", "z"]);
        assert_eq!(store.list(|_| true).await.len(), 3);
    }

    #[tokio::test]
    async fn find_by_name_ignores_case_and_padding() {
        let store = RecordStore::new();
        store.insert(label("Grace", 3)).await.expect("insert");

        let found = store.find_by_name("  grace ").await.expect("find");
        assert_eq!(found.id(), 1);
        assert!(matches!(
            store.find_by_name("ada").await,
            Err(RecordError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn view_flattens_fields_and_derived_values() {
        let store = RecordStore::new();
        let view = store.insert(label("box", 12)).await.expect("insert");

        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "box");
        assert_eq!(json["weight"], 12);
        assert_eq!(json["heavy"], true);
        assert!(json["created_at"].is_string());
    }

    #[tokio::test]
    async fn entity_validation_guards_insert_and_update() {
        let store = RecordStore::new();

        let err = store
            .insert(label("overweight", 101))
            .await
            .expect_err("insert should fail");
        assert_eq!(err, RecordError::validation("weight must be at most 100"));
        assert!(store.is_empty().await);

        let stored = store.insert(label("ok", 5)).await.expect("insert ok");
        let patch = LabelPatch {
            weight: Some(500),
            ..LabelPatch::default()
        };
        let err = store
            .update_by_id(stored.id(), patch)
            .await
            .expect_err("update should fail");
        assert!(matches!(err, RecordError::Validation(_)));

        let current = store.get_by_id(stored.id()).await.expect("still stored");
        assert_eq!(current.fields(), &label("ok", 5));
        assert_eq!(current.record.updated_at, stored.record.updated_at);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_distinct_sequential_ids() {
        let store = Arc::new(RecordStore::new());

        let handles: Vec<_> = (0..64)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(label(&format!("label-{n}"), 1)).await })
            })
            .collect();

        let mut ids = Vec::with_capacity(handles.len());
        for handle in handles {
            let view = handle.await.expect("task join").expect("insert");
            ids.push(view.id());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=64).collect::<Vec<u64>>());
        assert_eq!(store.len().await, 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_of_one_name_admit_a_single_winner() {
        let store = Arc::new(RecordStore::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(label("same", 1)).await })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.expect("task join").is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(store.len().await, 1);
    }
}

//! Process-local document store.
//!
//! Keeps collections in memory with their insertion order, so queries see
//! the same tie-breaking a remote backend would. Cloning shares the data.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::error::StoreError;
use crate::query::Query;
use crate::store::{DocumentData, DocumentStore};

#[derive(Debug, Default)]
struct Collection {
    order: Vec<String>,
    documents: HashMap<String, DocumentData>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: RwLock<HashMap<String, Collection>>,
    writes: AtomicUsize,
    reads: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Transport("memory store lock poisoned".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_document` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Number of point reads and queries served so far.
    pub fn read_count(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.inner
            .collections
            .read()
            .map(|collections| {
                collections
                    .get(collection)
                    .map_or(0, |c| c.documents.len())
            })
            .unwrap_or(0)
    }

    fn write(&self, collection: &str, id: &str, data: DocumentData) -> Result<(), StoreError> {
        let mut collections = self.inner.collections.write().map_err(poisoned)?;
        let entry = collections.entry(collection.to_string()).or_default();
        if entry.documents.insert(id.to_string(), data).is_none() {
            entry.order.push(id.to_string());
        }
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        debug!(collection = %collection, document.id = %id, "Document written");
        Ok(())
    }

    fn read(&self, collection: &str, id: &str) -> Result<Option<DocumentData>, StoreError> {
        let collections = self.inner.collections.read().map_err(poisoned)?;
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        Ok(collections
            .get(collection)
            .and_then(|c| c.documents.get(id))
            .cloned())
    }

    fn query(&self, query: &Query) -> Result<Vec<DocumentData>, StoreError> {
        let collections = self.inner.collections.read().map_err(poisoned)?;
        self.inner.reads.fetch_add(1, Ordering::SeqCst);

        let Some(collection) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let documents = collection
            .order
            .iter()
            .filter_map(|id| collection.documents.get(id))
            .cloned();

        Ok(query.apply(documents))
    }
}

impl DocumentStore for MemoryStore {
    fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: DocumentData,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        let result = self.write(collection, id, data);
        async move { result }
    }

    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<DocumentData>, StoreError>> + Send {
        let result = self.read(collection, id);
        async move { result }
    }

    fn run_query(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Vec<DocumentData>, StoreError>> + Send {
        let result = self.query(&query);
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Direction;
    use serde_json::{Value, json};

    fn doc(value: Value) -> DocumentData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        let reference = store.collection("students").new_document();
        let id = reference.id().to_string();

        reference
            .set(doc(json!({"studentId": id, "name": "Ada"})))
            .await
            .unwrap();

        let fetched = store
            .collection("students")
            .document(&id)
            .get()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched["name"], "Ada");
        assert_eq!(fetched["studentId"], Value::String(id));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_document_is_none() {
        let store = MemoryStore::new();
        let fetched = store.collection("students").document("nope").get().await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_keeps_original_insertion_position() {
        let store = MemoryStore::new();
        let students = store.collection("students");

        students.document("a").set(doc(json!({"n": 1}))).await.unwrap();
        students.document("b").set(doc(json!({"n": 2}))).await.unwrap();
        students.document("a").set(doc(json!({"n": 3}))).await.unwrap();

        let all = students.query().get().await.unwrap();
        let values: Vec<i64> = all.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(values, vec![3, 2]);
        assert_eq!(store.document_count("students"), 2);
    }

    #[tokio::test]
    async fn test_query_filters_and_orders() {
        let store = MemoryStore::new();
        let attendance = store.collection("attendance");

        for (id, class, created) in [("a", "1", 10), ("b", "2", 20), ("c", "1", 30)] {
            attendance
                .document(id)
                .set(doc(json!({"className": class, "createdAt": created})))
                .await
                .unwrap();
        }

        let results = attendance
            .where_eq("className", "1")
            .order_by("createdAt", Direction::Descending)
            .get()
            .await
            .unwrap();

        let created: Vec<i64> = results
            .iter()
            .map(|d| d["createdAt"].as_i64().unwrap())
            .collect();
        assert_eq!(created, vec![30, 10]);
    }

    #[tokio::test]
    async fn test_query_on_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let results = store
            .collection("fees")
            .where_eq("studentId", "s1")
            .get()
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_query_is_rejected_before_reading() {
        let store = MemoryStore::new();
        let empty: Vec<String> = Vec::new();

        let result = store
            .collection("notices")
            .where_in("targetAudience", empty)
            .get()
            .await;

        assert!(matches!(result, Err(StoreError::InvalidQuery(_))));
        assert_eq!(store.read_count(), 0);
    }
}

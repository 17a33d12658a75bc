//! The document store interface and its fluent handles.

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde_json::Value;
use std::future::Future;

use crate::error::StoreError;
use crate::query::{Direction, Query};

/// A stored document: a JSON object keyed by field name.
pub type DocumentData = serde_json::Map<String, Value>;

/// Length of generated document keys.
pub const DOCUMENT_ID_LENGTH: usize = 20;

/// Generates a random alphanumeric document key.
pub fn generate_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Remote document store.
///
/// Implementations hold no per-call state, so one store value is shared by
/// every repository call in the process. Each method performs at most one
/// round trip to the backend.
pub trait DocumentStore: Send + Sync {
    /// Reserves a key for a new document. Performs no I/O.
    fn allocate_id(&self, collection: &str) -> String {
        let _ = collection;
        generate_document_id()
    }

    /// Writes the whole document at `collection/id`, replacing any previous one.
    fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: DocumentData,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Reads `collection/id`; `None` when the document does not exist.
    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<DocumentData>, StoreError>> + Send;

    /// Runs a query. Callers go through [`QueryBuilder::get`], which validates first.
    fn run_query(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Vec<DocumentData>, StoreError>> + Send;

    fn collection(&self, name: &str) -> CollectionRef<'_, Self>
    where
        Self: Sized,
    {
        CollectionRef::new(self, name)
    }
}

/// Handle to a named collection.
pub struct CollectionRef<'a, S> {
    store: &'a S,
    name: String,
}

impl<'a, S: DocumentStore> CollectionRef<'a, S> {
    pub fn new(store: &'a S, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to a document under a freshly allocated key.
    pub fn new_document(&self) -> DocumentRef<'a, S> {
        let id = self.store.allocate_id(&self.name);
        self.document(id)
    }

    pub fn document(&self, id: impl Into<String>) -> DocumentRef<'a, S> {
        DocumentRef {
            store: self.store,
            collection: self.name.clone(),
            id: id.into(),
        }
    }

    pub fn where_eq(&self, field: impl Into<String>, value: impl Into<Value>) -> QueryBuilder<'a, S> {
        self.query().where_eq(field, value)
    }

    pub fn where_in<V>(
        &self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> QueryBuilder<'a, S>
    where
        V: Into<Value>,
    {
        self.query().where_in(field, values)
    }

    pub fn query(&self) -> QueryBuilder<'a, S> {
        QueryBuilder {
            store: self.store,
            query: Query::new(self.name.clone()),
        }
    }
}

/// Handle to one document key.
pub struct DocumentRef<'a, S> {
    store: &'a S,
    collection: String,
    id: String,
}

impl<S: DocumentStore> DocumentRef<'_, S> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn set(&self, data: DocumentData) -> Result<(), StoreError> {
        self.store
            .set_document(&self.collection, &self.id, data)
            .await
    }

    pub async fn get(&self) -> Result<Option<DocumentData>, StoreError> {
        self.store.get_document(&self.collection, &self.id).await
    }
}

pub struct QueryBuilder<'a, S> {
    store: &'a S,
    query: Query,
}

impl<S: DocumentStore> QueryBuilder<'_, S> {
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query = self.query.where_eq(field, value);
        self
    }

    pub fn where_in<V>(mut self, field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        self.query = self.query.where_in(field, values);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.query = self.query.order_by(field, direction);
        self
    }

    pub fn as_query(&self) -> &Query {
        &self.query
    }

    pub async fn get(self) -> Result<Vec<DocumentData>, StoreError> {
        self.query.validate()?;
        self.store.run_query(self.query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_alphanumeric_and_distinct() {
        let a = generate_document_id();
        let b = generate_document_id();

        assert_eq!(a.len(), DOCUMENT_ID_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}

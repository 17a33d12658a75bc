//! Generic document persistence shared by every entity service.
//!
//! Each helper performs exactly one store round trip and translates store
//! failures into [`AppError`]. Nothing here retries.

use serde_json::Value;
use tracing::{debug, instrument};

use k12_core::AppError;
use k12_models::Document;
use k12_observability::track_record_created;
use k12_store::{DocumentData, DocumentStore, QueryBuilder};

pub fn to_document<T: Document>(entity: &T) -> Result<DocumentData, AppError> {
    match serde_json::to_value(entity).map_err(AppError::internal)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::internal(anyhow::anyhow!(
            "{} record serialized to {} instead of an object",
            T::COLLECTION,
            other
        ))),
    }
}

pub fn from_document<T: Document>(data: DocumentData) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(data)).map_err(|e| {
        AppError::internal(anyhow::anyhow!(
            "Malformed {} document: {}",
            T::COLLECTION,
            e
        ))
    })
}

/// Validates `entity`, stores it under a freshly allocated key with that key
/// embedded, and returns the key.
#[instrument(skip(store, entity), fields(collection = T::COLLECTION, document.id))]
pub async fn create<S, T>(store: &S, entity: T) -> Result<T::Id, AppError>
where
    S: DocumentStore,
    T: Document,
{
    entity.validate()?;

    let reference = store.collection(T::COLLECTION).new_document();
    let id = T::Id::from(reference.id().to_string());
    tracing::Span::current().record("document.id", reference.id());

    let entity = entity.with_id(id.clone());
    reference
        .set(to_document(&entity)?)
        .await
        .map_err(|e| AppError::from(e).context(format!("Failed to save {} record", T::COLLECTION)))?;

    track_record_created(T::COLLECTION);
    debug!("Document created");

    Ok(id)
}

/// Writes `entity` under the id it already carries.
#[instrument(skip(store, entity), fields(collection = T::COLLECTION, document.id = %entity.id()))]
pub async fn put<S, T>(store: &S, entity: &T) -> Result<(), AppError>
where
    S: DocumentStore,
    T: Document,
{
    entity.validate()?;
    require_id::<T>(entity.id())?;

    store
        .collection(T::COLLECTION)
        .document(entity.id().as_ref())
        .set(to_document(entity)?)
        .await
        .map_err(|e| AppError::from(e).context(format!("Failed to save {} record", T::COLLECTION)))?;

    debug!("Document written");
    Ok(())
}

#[instrument(skip(store), fields(collection = T::COLLECTION, document.id = %id))]
pub async fn get_by_id<S, T>(store: &S, id: &T::Id) -> Result<T, AppError>
where
    S: DocumentStore,
    T: Document,
{
    require_id::<T>(id)?;

    let data = store
        .collection(T::COLLECTION)
        .document(id.as_ref())
        .get()
        .await
        .map_err(|e| AppError::from(e).context(format!("Failed to load {} record", T::COLLECTION)))?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "No {} record with id {}",
                T::COLLECTION,
                id
            ))
        })?;

    from_document(data)
}

/// Runs `query` and decodes every match. An empty result is not an error.
pub async fn fetch<S, T>(query: QueryBuilder<'_, S>) -> Result<Vec<T>, AppError>
where
    S: DocumentStore,
    T: Document,
{
    let documents = query
        .get()
        .await
        .map_err(|e| AppError::from(e).context(format!("Failed to query {} records", T::COLLECTION)))?;

    debug!(collection = T::COLLECTION, results = documents.len(), "Query complete");

    documents.into_iter().map(from_document::<T>).collect()
}

fn require_id<T: Document>(id: &T::Id) -> Result<(), AppError> {
    if id.as_ref().is_empty() {
        return Err(AppError::validation(anyhow::anyhow!(
            "A {} record id is required",
            T::COLLECTION
        )));
    }
    Ok(())
}

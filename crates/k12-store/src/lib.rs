//! # K12 Store
//!
//! Narrow interface to the remote document store, plus two backends.
//!
//! Documents are JSON objects grouped into named collections and addressed
//! by string keys. The interface mirrors what the client needs and nothing
//! more: pre-allocate a key, write a whole document, read one back, and run
//! equality / membership queries with an optional ordering.
//!
//! - [`store`]: The [`DocumentStore`] trait and the collection/document/query handles
//! - [`query`]: Filter and ordering model shared by the backends
//! - [`memory`]: [`MemoryStore`], a process-local backend for tests and demos
//! - [`redis`]: [`RedisStore`], a Redis-backed backend
//!
//! # Example
//!
//! ```ignore
//! use k12_store::{Direction, DocumentStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let doc = store.collection("students").new_document();
//! doc.set(data).await?;
//!
//! let class_one = store
//!     .collection("students")
//!     .where_eq("className", "Class 1")
//!     .order_by("rollNumber", Direction::Ascending)
//!     .get()
//!     .await?;
//! ```

pub mod error;
pub mod memory;
pub mod query;
pub mod redis;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use query::{Direction, Filter, FilterOp, OrderBy, Query};
pub use redis::RedisStore;
pub use store::{
    CollectionRef, DocumentData, DocumentRef, DocumentStore, QueryBuilder, generate_document_id,
};

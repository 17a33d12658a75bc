//! Redis-backed document store.
//!
//! Layout, for a key prefix `p` and collection `c`:
//!
//! - `p:c:{id}` holds the document as a JSON string;
//! - `p:c:_index` is a sorted set of ids scored by first-write sequence;
//! - `p:c:_seq` is the sequence counter.
//!
//! Writes run as one Lua script so the document and its index entry land
//! together. Queries fetch the collection in insertion order with a single
//! script call and are evaluated client-side with [`Query::apply`].

use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::future::Future;
use std::sync::LazyLock;
use tracing::{debug, error, instrument};

use crate::error::StoreError;
use crate::query::Query;
use crate::store::{DocumentData, DocumentStore};

static SET_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
redis.call('SET', KEYS[1], ARGV[1])
if not redis.call('ZSCORE', KEYS[2], ARGV[2]) then
  local seq = redis.call('INCR', KEYS[3])
  redis.call('ZADD', KEYS[2], seq, ARGV[2])
end
return 1
",
    )
});

static SCAN_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
local ids = redis.call('ZRANGE', KEYS[1], 0, -1)
local out = {}
for _, id in ipairs(ids) do
  local value = redis.call('GET', ARGV[1] .. id)
  if value then
    table.insert(out, value)
  end
end
return out
",
    )
});

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects to Redis.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `prefix` - Namespace prepended to every key
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Redis` if the connection fails.
    pub async fn connect(redis_url: &str, prefix: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    fn document_key(&self, collection: &str, id: &str) -> String {
        format!("{}:{}:{}", self.prefix, collection, id)
    }

    fn document_prefix(&self, collection: &str) -> String {
        format!("{}:{}:", self.prefix, collection)
    }

    fn index_key(&self, collection: &str) -> String {
        format!("{}:{}:_index", self.prefix, collection)
    }

    fn sequence_key(&self, collection: &str) -> String {
        format!("{}:{}:_seq", self.prefix, collection)
    }

    #[instrument(skip(self, data), fields(store.operation = "SET"))]
    async fn write(&self, collection: &str, id: &str, data: DocumentData) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(&data)?;

        let _: i64 = SET_SCRIPT
            .key(self.document_key(collection, id))
            .key(self.index_key(collection))
            .key(self.sequence_key(collection))
            .arg(json)
            .arg(id)
            .invoke_async(&mut conn)
            .await
            .inspect_err(|e| {
                error!(collection = %collection, document.id = %id, error = %e, "Redis SET error");
            })?;

        debug!(collection = %collection, document.id = %id, "Document written");
        Ok(())
    }

    #[instrument(skip(self), fields(store.operation = "GET"))]
    async fn read(&self, collection: &str, id: &str) -> Result<Option<DocumentData>, StoreError> {
        let mut conn = self.conn.clone();
        let key = self.document_key(collection, id);

        match conn.get::<_, Option<String>>(&key).await? {
            Some(value) => {
                debug!(collection = %collection, document.id = %id, "Document found");
                Ok(Some(serde_json::from_str(&value)?))
            }
            None => {
                debug!(collection = %collection, document.id = %id, "Document missing");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, query), fields(store.operation = "QUERY", collection = %query.collection))]
    async fn scan(&self, query: Query) -> Result<Vec<DocumentData>, StoreError> {
        let mut conn = self.conn.clone();

        let raw: Vec<String> = SCAN_SCRIPT
            .key(self.index_key(&query.collection))
            .arg(self.document_prefix(&query.collection))
            .invoke_async(&mut conn)
            .await?;

        let documents = raw
            .iter()
            .map(|value| serde_json::from_str::<DocumentData>(value))
            .collect::<Result<Vec<_>, _>>()?;

        let results = query.apply(documents);
        debug!(store.scanned = raw.len(), store.matched = results.len(), "Query complete");

        Ok(results)
    }
}

impl DocumentStore for RedisStore {
    fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: DocumentData,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        self.write(collection, id, data)
    }

    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<DocumentData>, StoreError>> + Send {
        self.read(collection, id)
    }

    fn run_query(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Vec<DocumentData>, StoreError>> + Send {
        self.scan(query)
    }
}

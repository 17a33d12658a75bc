use std::env;

/// Which document store implementation the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store, lost on exit. Used for demos and tests.
    Memory,
    /// Redis-backed store shared by every client pointed at the same server.
    Redis,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
    /// Prefix for every key the Redis backend writes.
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "k12".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| StoreBackend::parse(&v))
                .unwrap_or(StoreBackend::Memory),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            key_prefix: env::var("STORE_KEY_PREFIX").unwrap_or_else(|_| "k12".to_string()),
        }
    }
}

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use k12::modules::session::SessionManager;
use k12_auth::MemoryAuth;
use k12_config::AuthConfig;
use k12_models::{RegisterRequest, UserRole};
use k12_store::{DocumentData, DocumentStore, MemoryStore, Query, StoreError};

pub const PASSWORD: &str = "testpass123";

/// Memory store that can be told to fail writes and records how many writes
/// were in flight at once.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    failing_names: Arc<Mutex<HashSet<String>>>,
    failing_collections: Arc<Mutex<HashSet<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
    write_delay: Duration,
}

#[allow(dead_code)]
impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write sleeps for `delay`, so concurrent writes overlap.
    pub fn with_write_delay(self, delay: Duration) -> Self {
        Self {
            write_delay: delay,
            ..self
        }
    }

    /// Fails writes of documents whose `name` field is `name`.
    pub fn fail_name(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_collection(&self, collection: &str) {
        self.failing_collections
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn should_fail(&self, collection: &str, data: &DocumentData) -> bool {
        if self.failing_collections.lock().unwrap().contains(collection) {
            return true;
        }
        data.get("name")
            .and_then(|name| name.as_str())
            .is_some_and(|name| self.failing_names.lock().unwrap().contains(name))
    }
}

impl DocumentStore for FaultyStore {
    fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: DocumentData,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        async move {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(self.write_delay).await;

            let result = if self.should_fail(collection, &data) {
                Err(StoreError::Transport(format!("write to {} dropped", collection)))
            } else {
                self.inner.set_document(collection, id, data).await
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<DocumentData>, StoreError>> + Send {
        self.inner.get_document(collection, id)
    }

    fn run_query(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Vec<DocumentData>, StoreError>> + Send {
        self.inner.run_query(query)
    }
}

#[allow(dead_code)]
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::default()
    }
}

#[allow(dead_code)]
pub fn session_with<S: DocumentStore>(
    store: S,
    config: AuthConfig,
) -> (SessionManager<S, MemoryAuth>, Arc<MemoryAuth>) {
    let auth = Arc::new(MemoryAuth::new(config.bcrypt_cost));
    let session = SessionManager::new(Arc::new(store), auth.clone(), config);
    (session, auth)
}

#[allow(dead_code)]
pub fn registration(name: &str, email: &str, role: UserRole, class_name: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone_number: "555-0100".to_string(),
        password: PASSWORD.to_string(),
        confirm_password: PASSWORD.to_string(),
        role,
        class_name: class_name.to_string(),
        student_ids: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}

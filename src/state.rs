use std::future::Future;
use std::sync::Arc;
use tracing::info;

use k12_auth::{AuthError, AuthProvider, MemoryAuth, RedisAuth};
use k12_config::{AuthConfig, BatchConfig, StoreBackend, StoreConfig};
use k12_core::AppError;
use k12_models::{Email, UserHandle};
use k12_store::{DocumentData, DocumentStore, MemoryStore, Query, RedisStore, StoreError};

use crate::batch::BatchWriter;
use crate::modules::session::SessionManager;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub batch: BatchConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            store: StoreConfig::from_env(),
            auth: AuthConfig::from_env(),
            batch: BatchConfig::from_env(),
        }
    }
}

/// Document store selected by [`StoreConfig::backend`].
#[derive(Debug, Clone)]
pub enum AppStore {
    Memory(MemoryStore),
    Redis(RedisStore),
}

impl DocumentStore for AppStore {
    fn allocate_id(&self, collection: &str) -> String {
        match self {
            Self::Memory(store) => store.allocate_id(collection),
            Self::Redis(store) => store.allocate_id(collection),
        }
    }

    fn set_document(
        &self,
        collection: &str,
        id: &str,
        data: DocumentData,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        async move {
            match self {
                Self::Memory(store) => store.set_document(collection, id, data).await,
                Self::Redis(store) => store.set_document(collection, id, data).await,
            }
        }
    }

    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<DocumentData>, StoreError>> + Send {
        async move {
            match self {
                Self::Memory(store) => store.get_document(collection, id).await,
                Self::Redis(store) => store.get_document(collection, id).await,
            }
        }
    }

    fn run_query(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Vec<DocumentData>, StoreError>> + Send {
        async move {
            match self {
                Self::Memory(store) => store.run_query(query).await,
                Self::Redis(store) => store.run_query(query).await,
            }
        }
    }
}

/// Auth provider paired with the selected store backend.
#[derive(Debug, Clone)]
pub enum AppAuth {
    Memory(MemoryAuth),
    Redis(RedisAuth),
}

impl AuthProvider for AppAuth {
    fn sign_in(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send {
        async move {
            match self {
                Self::Memory(auth) => auth.sign_in(email, password).await,
                Self::Redis(auth) => auth.sign_in(email, password).await,
            }
        }
    }

    fn create_account(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<UserHandle, AuthError>> + Send {
        async move {
            match self {
                Self::Memory(auth) => auth.create_account(email, password).await,
                Self::Redis(auth) => auth.create_account(email, password).await,
            }
        }
    }

    fn current_user(&self) -> Option<UserHandle> {
        match self {
            Self::Memory(auth) => auth.current_user(),
            Self::Redis(auth) => auth.current_user(),
        }
    }

    fn sign_out(&self) {
        match self {
            Self::Memory(auth) => auth.sign_out(),
            Self::Redis(auth) => auth.sign_out(),
        }
    }

    fn delete_account(&self, user: &UserHandle) -> impl Future<Output = Result<(), AuthError>> + Send {
        async move {
            match self {
                Self::Memory(auth) => auth.delete_account(user).await,
                Self::Redis(auth) => auth.delete_account(user).await,
            }
        }
    }
}

pub struct AppState {
    pub store: Arc<AppStore>,
    pub session: SessionManager<AppStore, AppAuth>,
    pub batch: BatchWriter,
}

pub async fn init_app_state() -> Result<AppState, AppError> {
    init_app_state_with(AppConfig::from_env()).await
}

pub async fn init_app_state_with(config: AppConfig) -> Result<AppState, AppError> {
    let (store, auth) = match config.store.backend {
        StoreBackend::Memory => (
            AppStore::Memory(MemoryStore::new()),
            AppAuth::Memory(MemoryAuth::new(config.auth.bcrypt_cost)),
        ),
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.store.redis_url, config.store.key_prefix.clone())
                .await
                .map_err(|e| AppError::from(e).context("Failed to connect document store"))?;
            let auth = RedisAuth::connect(
                &config.store.redis_url,
                config.store.key_prefix.clone(),
                config.auth.clone(),
            )
            .await
            .map_err(|e| AppError::from(e).context("Failed to connect auth service"))?;
            (AppStore::Redis(store), AppAuth::Redis(auth))
        }
    };
    info!(store.backend = ?config.store.backend, "Backends ready");

    let store = Arc::new(store);
    let session = SessionManager::new(store.clone(), Arc::new(auth), config.auth);

    Ok(AppState {
        store,
        session,
        batch: BatchWriter::from_config(&config.batch),
    })
}

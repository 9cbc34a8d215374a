use std::sync::Arc;

use dockforge_core::generate::Generator;
use dockforge_core::store::{HistoryStore, OwnerResolver, UserStore};
use dockforge_db::DbPool;

use crate::auth::jwt::JwtOwnerResolver;
use crate::config::ServerConfig;

/// Where history and accounts are kept.
#[derive(Clone)]
pub enum StorageBackend {
    Postgres(DbPool),
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres(_) => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub generator: Generator,
    pub history: Arc<dyn HistoryStore>,
    pub users: Arc<dyn UserStore>,
    pub owners: Arc<dyn OwnerResolver>,
    pub storage: StorageBackend,
}

impl AppState {
    /// Wire the generator, stores and owner resolver around one store value.
    pub fn new<S>(config: ServerConfig, store: Arc<S>, storage: StorageBackend) -> Self
    where
        S: HistoryStore + UserStore + 'static,
    {
        let history: Arc<dyn HistoryStore> = store.clone();
        let users: Arc<dyn UserStore> = store;
        let owners: Arc<dyn OwnerResolver> = Arc::new(JwtOwnerResolver::new(config.jwt.clone()));

        Self {
            config: Arc::new(config),
            generator: Generator::new(Arc::clone(&history)),
            history,
            users,
            owners,
            storage,
        }
    }
}

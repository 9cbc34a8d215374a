//! In-process store used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{HistoryEntry, HistoryStore, UserCredentials, UserStore};
use crate::error::CoreError;
use crate::spec::{ArtifactKind, EnvironmentSpec};
use crate::types::{DbId, UserId};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<UserCredentials>,
    history: BTreeMap<DbId, (UserId, HistoryEntry)>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Volatile implementation of [`HistoryStore`] and [`UserStore`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn record(
        &self,
        kind: ArtifactKind,
        spec: &EnvironmentSpec,
        owner: UserId,
    ) -> Result<DbId, CoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let entry = HistoryEntry {
            id,
            kind,
            spec: spec.clone(),
            created_at: chrono::Utc::now(),
        };
        tables.history.insert(id, (owner, entry));
        Ok(id)
    }

    async fn list(
        &self,
        kind: ArtifactKind,
        owner: UserId,
    ) -> Result<Vec<HistoryEntry>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .history
            .values()
            .rev()
            .filter(|(o, e)| *o == owner && e.kind == kind)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn get(
        &self,
        kind: ArtifactKind,
        id: DbId,
        owner: UserId,
    ) -> Result<Option<HistoryEntry>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .history
            .get(&id)
            .filter(|(o, e)| *o == owner && e.kind == kind)
            .map(|(_, e)| e.clone()))
    }

    async fn delete(&self, kind: ArtifactKind, id: DbId, owner: UserId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        let owned = matches!(
            tables.history.get(&id),
            Some((o, e)) if *o == owner && e.kind == kind
        );
        if owned {
            tables.history.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, name: &str, password_hash: &str) -> Result<UserId, CoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.name == name) {
            return Err(CoreError::Conflict(format!(
                "User name '{name}' is already registered"
            )));
        }
        let id = tables.allocate_id();
        tables.users.push(UserCredentials {
            id,
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserCredentials>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UserCredentials>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.name == name).cloned())
    }
}

//! [`HistoryStore`] and [`UserStore`] over PostgreSQL.

use async_trait::async_trait;
use dockforge_core::error::CoreError;
use dockforge_core::spec::{ArtifactKind, EnvironmentSpec};
use dockforge_core::store::{HistoryEntry, HistoryStore, UserCredentials, UserStore};
use dockforge_core::types::{DbId, UserId};

use crate::repositories::{HistoryRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Map a sqlx error into the domain error, logging anything unexpected.
///
/// Unique violations on `uq_` constraints become [`CoreError::Conflict`].
fn classify(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(err.to_string())
}

fn into_entries(rows: Vec<crate::models::history::HistoryRow>) -> Vec<HistoryEntry> {
    rows.into_iter().filter_map(|row| row.into_entry()).collect()
}

#[async_trait]
impl HistoryStore for PgStore {
    async fn record(
        &self,
        kind: ArtifactKind,
        spec: &EnvironmentSpec,
        owner: UserId,
    ) -> Result<DbId, CoreError> {
        let row = HistoryRepo::create(&self.pool, owner, kind, spec)
            .await
            .map_err(classify)?;
        tracing::info!(id = row.id, user_id = owner, kind = %kind, "History recorded");
        Ok(row.id)
    }

    async fn list(
        &self,
        kind: ArtifactKind,
        owner: UserId,
    ) -> Result<Vec<HistoryEntry>, CoreError> {
        HistoryRepo::list_for_user(&self.pool, owner, kind)
            .await
            .map(into_entries)
            .map_err(classify)
    }

    async fn get(
        &self,
        kind: ArtifactKind,
        id: DbId,
        owner: UserId,
    ) -> Result<Option<HistoryEntry>, CoreError> {
        HistoryRepo::find_for_user(&self.pool, id, owner, kind)
            .await
            .map(|row| row.and_then(|r| r.into_entry()))
            .map_err(classify)
    }

    async fn delete(&self, kind: ArtifactKind, id: DbId, owner: UserId) -> Result<bool, CoreError> {
        HistoryRepo::delete_for_user(&self.pool, id, owner, kind)
            .await
            .map_err(classify)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, name: &str, password_hash: &str) -> Result<UserId, CoreError> {
        UserRepo::create(&self.pool, name, password_hash)
            .await
            .map(|user| user.id)
            .map_err(|err| match classify(err) {
                CoreError::Conflict(_) => {
                    CoreError::Conflict(format!("User name '{name}' is already registered"))
                }
                other => other,
            })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserCredentials>, CoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map(|user| user.map(Into::into))
            .map_err(classify)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<UserCredentials>, CoreError> {
        UserRepo::find_by_name(&self.pool, name)
            .await
            .map(|user| user.map(Into::into))
            .map_err(classify)
    }
}

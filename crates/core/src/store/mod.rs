//! Collaborator interfaces for ownership, history and user accounts.
//!
//! The engine only ever sees these traits. Concrete adapters live in the
//! database crate (`dockforge_db::PgStore`) and in [`memory::MemoryStore`].

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::spec::{ArtifactKind, EnvironmentSpec};
use crate::types::{DbId, Timestamp, UserId};

/// Maps a caller credential to the user it belongs to.
///
/// Only presence or absence of the owner matters to the engine; an invalid
/// credential is indistinguishable from no credential.
pub trait OwnerResolver: Send + Sync {
    fn resolve_owner(&self, credential: &str) -> Option<UserId>;
}

/// A persisted generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub kind: ArtifactKind,
    pub spec: EnvironmentSpec,
    pub created_at: Timestamp,
}

/// Persistence of canonical records per user and artifact kind.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Store `spec` for `owner`. Implementations log their own failures.
    async fn record(
        &self,
        kind: ArtifactKind,
        spec: &EnvironmentSpec,
        owner: UserId,
    ) -> Result<DbId, CoreError>;

    /// Records of `kind` owned by `owner`, newest first.
    async fn list(&self, kind: ArtifactKind, owner: UserId)
        -> Result<Vec<HistoryEntry>, CoreError>;

    async fn get(
        &self,
        kind: ArtifactKind,
        id: DbId,
        owner: UserId,
    ) -> Result<Option<HistoryEntry>, CoreError>;

    /// Returns `false` when no record with `id` of `kind` belongs to `owner`.
    async fn delete(&self, kind: ArtifactKind, id: DbId, owner: UserId)
        -> Result<bool, CoreError>;
}

/// Stored login credentials.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub name: String,
    /// PHC-formatted password hash. Never expose in responses.
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`CoreError::Conflict`] when `name` is taken.
    async fn create_user(&self, name: &str, password_hash: &str) -> Result<UserId, CoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserCredentials>, CoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UserCredentials>, CoreError>;
}

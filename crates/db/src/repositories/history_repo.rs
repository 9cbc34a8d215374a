//! Repository for the `generation_history` table.
//!
//! Every read and delete is scoped by owner and kind so one user can never
//! see or remove another user's records.

use dockforge_core::spec::{ArtifactKind, EnvironmentSpec};
use dockforge_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::history::HistoryRow;

const COLUMNS: &str = "id, user_id, kind, spec, created_at";

pub struct HistoryRepo;

impl HistoryRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        kind: ArtifactKind,
        spec: &EnvironmentSpec,
    ) -> Result<HistoryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_history (user_id, kind, spec)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryRow>(&query)
            .bind(user_id)
            .bind(kind.as_str())
            .bind(Json(spec))
            .fetch_one(pool)
            .await
    }

    /// Records of one kind for one user, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        kind: ArtifactKind,
    ) -> Result<Vec<HistoryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generation_history
             WHERE user_id = $1 AND kind = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HistoryRow>(&query)
            .bind(user_id)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        kind: ArtifactKind,
    ) -> Result<Option<HistoryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generation_history
             WHERE id = $1 AND user_id = $2 AND kind = $3"
        );
        sqlx::query_as::<_, HistoryRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        kind: ArtifactKind,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM generation_history WHERE id = $1 AND user_id = $2 AND kind = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(kind.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Generation history row.

use dockforge_core::spec::{ArtifactKind, EnvironmentSpec};
use dockforge_core::store::HistoryEntry;
use dockforge_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// Row from the `generation_history` table.
///
/// `spec` holds the canonical record as JSONB; `kind` is constrained to the
/// identifiers produced by [`ArtifactKind::as_str`].
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub spec: Json<EnvironmentSpec>,
    pub created_at: Timestamp,
}

impl HistoryRow {
    /// Convert into the engine's entry type. `None` for an unknown `kind`.
    pub fn into_entry(self) -> Option<HistoryEntry> {
        let kind = ArtifactKind::parse(&self.kind)?;
        Some(HistoryEntry {
            id: self.id,
            kind,
            spec: self.spec.0,
            created_at: self.created_at,
        })
    }
}

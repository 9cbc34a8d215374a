//! User account row.

use dockforge_core::store::UserCredentials;
use dockforge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash -- never serialize this into responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl From<User> for UserCredentials {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            password_hash: user.password_hash,
        }
    }
}

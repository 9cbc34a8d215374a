//! Query layer. Each repo is a zero-sized namespace over a `PgPool`.

mod history_repo;
mod user_repo;

pub use history_repo::HistoryRepo;
pub use user_repo::UserRepo;

// Application state (AppState)

use crate::stores::user_repository::UserRepository;
use sqlx::SqlitePool;

/// Shared application state
///
/// Built once at startup and handed to every request handler.
/// The repository wraps the process-wide connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Data access for the users table
    pub user_repository: UserRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_repository: UserRepository::new(pool),
        }
    }
}

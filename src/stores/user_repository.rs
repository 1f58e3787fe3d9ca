use crate::core::error::DataAccessError;
use crate::models::user::{NewUser, User};
use sqlx::SqlitePool;
use tracing::{field, info_span, Instrument};

const FIND_ALL_SQL: &str = "SELECT * FROM users";
const INSERT_SQL: &str = "INSERT INTO users (name, email) VALUES (?, ?)";

/// Data access for the `users` table
///
/// Every statement runs inside its own client span named after the
/// operation and table, e.g. `SELECT users`.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fetch every row of `users`
    ///
    /// Row order is whatever the database yields. An empty table is `Ok(vec![])`.
    pub async fn find_all(&self) -> Result<Vec<User>, DataAccessError> {
        let span = info_span!(
            "SELECT users",
            otel.kind = "client",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.sql.table = "users",
            db.statement = FIND_ALL_SQL,
            db.rows = field::Empty,
        );

        let users = sqlx::query_as::<_, User>(FIND_ALL_SQL)
            .fetch_all(&self.pool)
            .instrument(span.clone())
            .await?;

        span.record("db.rows", users.len());

        Ok(users)
    }

    /// Insert a user and return the id the database assigned to it.
    ///
    /// No validation happens here; the schema's constraints are the only gate.
    pub async fn save(&self, name: &str, email: &str) -> Result<i64, DataAccessError> {
        let span = info_span!(
            "INSERT users",
            otel.kind = "client",
            db.system = "sqlite",
            db.operation = "INSERT",
            db.sql.table = "users",
            db.statement = INSERT_SQL,
        );

        let result = sqlx::query(INSERT_SQL)
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, DataAccessError> {
        let id = self.save(&new_user.name, &new_user.email).await?;

        Ok(User {
            id,
            name: new_user.name,
            email: new_user.email,
        })
    }
}

use serde::{Deserialize, Serialize};
use sqlx::{ColumnIndex, Decode, FromRow, Row, Type};

/// One row of the `users` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database-assigned identifier
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request body for creating a user
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Build a `User` from a result row.
///
/// Columns are looked up by name, so the column order of the query does not matter.
/// A missing column or a value that cannot decode into the field type is an error.
pub fn user_from_row<'r, R>(row: &'r R) -> Result<User, sqlx::Error>
where
    R: Row,
    &'r str: ColumnIndex<R>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
    String: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
    })
}

impl<'r, R> FromRow<'r, R> for User
where
    R: Row,
    &'r str: ColumnIndex<R>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
    String: Decode<'r, R::Database> + Type<R::Database>,
{
    fn from_row(row: &'r R) -> Result<Self, sqlx::Error> {
        user_from_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_user_from_row_reads_columns_by_name() {
        let pool = memory_pool().await;

        // Columns deliberately out of field order
        let row = sqlx::query("SELECT 'bob@x.com' AS email, 'Bob' AS name, 7 AS id")
            .fetch_one(&pool)
            .await
            .unwrap();

        let user = user_from_row(&row).unwrap();
        assert_eq!(user, User::new(7, "Bob", "bob@x.com"));
    }

    #[tokio::test]
    async fn test_user_from_row_missing_column() {
        let pool = memory_pool().await;

        let row = sqlx::query("SELECT 1 AS id, 'Bob' AS name")
            .fetch_one(&pool)
            .await
            .unwrap();

        let err = user_from_row(&row).unwrap_err();
        assert!(matches!(err, sqlx::Error::ColumnNotFound(ref col) if col == "email"));
    }

    #[tokio::test]
    async fn test_user_from_row_type_mismatch() {
        let pool = memory_pool().await;

        let row = sqlx::query("SELECT 'not-a-number' AS id, 'Bob' AS name, 'bob@x.com' AS email")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(user_from_row(&row).is_err());
    }

    #[tokio::test]
    async fn test_query_as_uses_row_mapper() {
        let pool = memory_pool().await;

        let user: User = sqlx::query_as("SELECT 3 AS id, 'Carol' AS name, 'carol@x.com' AS email")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Carol");
        assert_eq!(user.email, "carol@x.com");
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::new(1, "Bob", "bob@x.com");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "Bob", "email": "bob@x.com" })
        );
    }
}

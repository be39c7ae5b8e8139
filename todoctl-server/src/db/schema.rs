//! Schema bootstrap for the `todos` table
//!
//! Idempotent; safe to run on every startup.

use super::{Database, DbError};

const CREATE_TODOS: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        done BOOLEAN DEFAULT false
    )
"#;

const CREATE_TODOS_ID_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_todos_id ON todos (id)";

/// Create the `todos` table and its index if absent.
pub async fn ensure_schema(db: &Database) -> Result<(), DbError> {
    let mut conn = db.acquire().await?;

    sqlx::query(CREATE_TODOS).execute(&mut *conn).await?;
    sqlx::query(CREATE_TODOS_ID_INDEX).execute(&mut *conn).await?;

    Ok(())
}

//! Todo repository
//!
//! CRUD over the `todos` table:
//! - list: ordered by id ascending
//! - update: single `UPDATE ... RETURNING`, so a missing id writes nothing
//! - delete: hard delete, reports whether a row existed

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::db::{Database, DbError};
use crate::models::Todo;

/// Map one `todos` row to the domain entity.
///
/// `done` is nullable in the schema; a stored `NULL` reads as `false`.
pub fn todo_from_row(row: &PgRow) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        done: row.try_get::<Option<bool>, _>("done")?.unwrap_or(false),
    })
}

/// Todo repository
pub struct TodoRepo<'a> {
    db: &'a Database,
}

impl<'a> TodoRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All todos, oldest id first.
    pub async fn list(&self) -> Result<Vec<Todo>, DbError> {
        let mut conn = self.db.acquire().await?;

        let rows = sqlx::query("SELECT id, title, done FROM todos ORDER BY id ASC")
            .fetch_all(&mut *conn)
            .await?;

        let todos = rows
            .iter()
            .map(todo_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    /// Insert a todo and return it with its assigned id.
    pub async fn create(&self, title: &str, done: bool) -> Result<Todo, DbError> {
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO todos (title, done)
            VALUES ($1, $2)
            RETURNING id, title, done
            "#,
        )
        .bind(title)
        .bind(done)
        .fetch_one(&mut *conn)
        .await?;

        let todo = todo_from_row(&row)?;
        tracing::debug!(id = todo.id, "Created todo");
        Ok(todo)
    }

    /// Get a single todo by id.
    pub async fn get(&self, id: i32) -> Result<Option<Todo>, DbError> {
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query("SELECT id, title, done FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.as_ref().map(todo_from_row).transpose()?)
    }

    /// Replace title and done. `None` if no such id.
    pub async fn update(&self, id: i32, title: &str, done: bool) -> Result<Option<Todo>, DbError> {
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query(
            r#"
            UPDATE todos
            SET title = $1, done = $2
            WHERE id = $3
            RETURNING id, title, done
            "#,
        )
        .bind(title)
        .bind(done)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.as_ref().map(todo_from_row).transpose()?)
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema_with_retry, PgConnectOptions, PoolConfig, RetryPolicy};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p todoctl-server -- --ignored
    //
    // Other tests may share the table, so assertions only look at rows
    // this test created.

    async fn test_db() -> Database {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        let db = Database::connect_lazy(options, &PoolConfig::default());
        ensure_schema_with_retry(&db, RetryPolicy::default())
            .await
            .expect("schema creation failed");
        db
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_assigns_fresh_ids() {
        let db = test_db().await;
        let repo = TodoRepo::new(&db);

        let first = repo.create("repo: first", false).await.unwrap();
        let second = repo.create("repo: second", true).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.title, "repo: first");
        assert!(!first.done);
        assert!(second.done);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_ordered_by_id() {
        let db = test_db().await;
        let repo = TodoRepo::new(&db);

        let a = repo.create("repo: order a", false).await.unwrap();
        let b = repo.create("repo: order b", false).await.unwrap();
        // Touching the older row must not move it.
        repo.update(a.id, "repo: order a2", true).await.unwrap();

        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let pos_a = ids.iter().position(|id| *id == a.id).unwrap();
        let pos_b = ids.iter().position(|id| *id == b.id).unwrap();
        assert!(pos_a < pos_b);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete_missing_row() {
        let db = test_db().await;
        let repo = TodoRepo::new(&db);

        let todo = repo.create("repo: doomed", false).await.unwrap();
        assert!(repo.delete(todo.id).await.unwrap());

        assert_eq!(repo.get(todo.id).await.unwrap(), None);
        assert_eq!(repo.update(todo.id, "ghost", true).await.unwrap(), None);
        assert!(!repo.delete(todo.id).await.unwrap());
        assert_eq!(repo.get(todo.id).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn null_done_reads_as_false() {
        let db = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let id: i32 = sqlx::query_scalar("INSERT INTO todos (title, done) VALUES ($1, NULL) RETURNING id")
            .bind("repo: null done")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        drop(conn);

        let todo = TodoRepo::new(&db).get(id).await.unwrap().unwrap();
        assert!(!todo.done);
    }
}

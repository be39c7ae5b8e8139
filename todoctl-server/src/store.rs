//! Persistence seam used by the HTTP handlers
//!
//! Handlers only see [`TodoStore`]; [`Database`] implements it on top of
//! [`TodoRepo`].

use async_trait::async_trait;

use crate::db::{Database, DbError, TodoRepo};
use crate::models::{Todo, TodoInput};

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>, DbError>;

    async fn create(&self, input: TodoInput) -> Result<Todo, DbError>;

    async fn get(&self, id: i32) -> Result<Option<Todo>, DbError>;

    async fn update(&self, id: i32, input: TodoInput) -> Result<Option<Todo>, DbError>;

    async fn delete(&self, id: i32) -> Result<bool, DbError>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), DbError>;
}

#[async_trait]
impl TodoStore for Database {
    async fn list(&self) -> Result<Vec<Todo>, DbError> {
        TodoRepo::new(self).list().await
    }

    async fn create(&self, input: TodoInput) -> Result<Todo, DbError> {
        TodoRepo::new(self).create(&input.title, input.done).await
    }

    async fn get(&self, id: i32) -> Result<Option<Todo>, DbError> {
        TodoRepo::new(self).get(id).await
    }

    async fn update(&self, id: i32, input: TodoInput) -> Result<Option<Todo>, DbError> {
        TodoRepo::new(self).update(id, &input.title, input.done).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DbError> {
        TodoRepo::new(self).delete(id).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        Database::ping(self).await
    }
}

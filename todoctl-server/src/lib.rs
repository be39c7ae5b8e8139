//! todoctl-server: todo CRUD over PostgreSQL
//!
//! A small reference service for orchestration smoke tests: a REST
//! resource backed by a single `todos` table, plus liveness/readiness
//! probes that actually touch the database.

pub mod db;
pub mod http;
pub mod models;
pub mod state;
pub mod store;

pub use db::{Database, DbError};
pub use models::{Todo, TodoInput};
pub use state::AppState;
pub use store::TodoStore;

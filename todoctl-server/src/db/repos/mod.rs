//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, auto-committed
//! - `RETURNING` instead of read-after-write
//! - Absence is `Option`/`bool`, never an error

pub mod todos;

pub use todos::{todo_from_row, TodoRepo};

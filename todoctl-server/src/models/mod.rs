//! Domain models
//!
//! The service has exactly one entity. Request payloads are checked for
//! presence and type only; anything else is left to the storage layer.

pub mod todo;

pub use todo::{Todo, TodoInput};

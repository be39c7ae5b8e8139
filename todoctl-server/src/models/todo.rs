//! Todo entity and its request payload

use serde::{Deserialize, Serialize};

/// A persisted todo.
///
/// `id` is assigned by the database on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub done: bool,
}

/// Body of `POST /todos` and `PUT /todos/{id}`.
///
/// Updates are wholesale: an omitted `done` resets the flag to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, done: bool) -> Self {
        Self {
            title: title.into(),
            done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_defaults_to_false() {
        let input: TodoInput = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        assert_eq!(input, TodoInput::new("buy milk", false));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let input: TodoInput =
            serde_json::from_str(r#"{"title": "x", "done": true, "id": 99}"#).unwrap();
        assert_eq!(input, TodoInput::new("x", true));
    }

    #[test]
    fn title_is_required() {
        assert!(serde_json::from_str::<TodoInput>(r#"{"done": true}"#).is_err());
        assert!(serde_json::from_str::<TodoInput>(r#"{"title": 5}"#).is_err());
    }

    #[test]
    fn todo_serializes_flat() {
        let todo = Todo {
            id: 1,
            title: "buy milk".into(),
            done: false,
        };
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            serde_json::json!({"id": 1, "title": "buy milk", "done": false})
        );
    }
}

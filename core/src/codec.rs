//! Persistence codec: the todo list to and from its stored string form.
//!
//! The store backend is a flat string-keyed store with a single fixed key
//! and no schema versioning. Decoding failure of any kind means "no prior
//! data" — the caller falls back to an empty list and no error is surfaced.

use crate::types::Todo;

/// Storage key shared by load and save.
pub const NAMESPACE: &str = "todos";

/// Encodes the ordered todo list as a canonical JSON array.
///
/// Each element carries the todo's `id` (as its unwrapped string), `text`,
/// and `completed` flag, in list order.
#[must_use]
pub fn serialize(todos: &[Todo]) -> String {
    // Plain structs of strings and booleans cannot fail to encode.
    serde_json::to_string(todos).unwrap_or_default()
}

/// Decodes a stored string back into an ordered todo list.
///
/// Succeeds only if the input is an array whose elements each carry a
/// string `id`, a string `text`, and a boolean `completed`. Any parse error
/// or shape mismatch yields `None` — never an error value.
#[must_use]
pub fn deserialize(stored: &str) -> Option<Vec<Todo>> {
    serde_json::from_str(stored).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;
    use proptest::prelude::*;

    fn todo_strategy() -> impl Strategy<Value = Todo> {
        (any::<String>(), any::<String>(), any::<bool>()).prop_map(|(id, text, completed)| Todo {
            id: TodoId::new(id),
            text,
            completed,
        })
    }

    proptest! {
        #[test]
        fn round_trip_preserves_todos(todos in proptest::collection::vec(todo_strategy(), 0..8)) {
            let decoded = deserialize(&serialize(&todos));
            prop_assert_eq!(decoded, Some(todos));
        }
    }

    #[test]
    fn id_encodes_as_plain_string() {
        let todos = vec![Todo {
            id: TodoId::new("1500000000000"),
            text: "a".to_string(),
            completed: false,
        }];
        let encoded = serialize(&todos);
        assert_eq!(
            encoded,
            r#"[{"id":"1500000000000","text":"a","completed":false}]"#
        );
    }

    #[test]
    fn empty_list_round_trips() {
        assert_eq!(serialize(&[]), "[]");
        assert_eq!(deserialize("[]"), Some(vec![]));
    }

    #[test]
    fn garbage_is_no_data() {
        assert_eq!(deserialize(""), None);
        assert_eq!(deserialize("not json"), None);
    }

    #[test]
    fn wrong_container_shape_is_no_data() {
        assert_eq!(deserialize("{}"), None);
        assert_eq!(deserialize("42"), None);
        assert_eq!(deserialize(r#"{"id":"1","text":"a","completed":true}"#), None);
    }

    #[test]
    fn wrong_element_shape_is_no_data() {
        // Non-string id
        assert_eq!(deserialize(r#"[{"id":1,"text":"a","completed":true}]"#), None);
        // Non-boolean completed
        assert_eq!(
            deserialize(r#"[{"id":"1","text":"a","completed":"yes"}]"#),
            None
        );
        // Missing field
        assert_eq!(deserialize(r#"[{"id":"1","text":"a"}]"#), None);
        // One malformed element poisons the whole list
        assert_eq!(
            deserialize(r#"[{"id":"1","text":"a","completed":true},{"text":"b"}]"#),
            None
        );
    }
}

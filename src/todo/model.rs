use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A titled task with a completion flag.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub is_complete: bool,
}

/// Client payload for add and update.
///
/// Any `id` sent by the client is accepted for compatibility but ignored: ids
/// are always assigned by the store and never change on update.
#[derive(ToSchema, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_complete: bool,
}

impl NewTodo {
    #[must_use]
    pub fn new(title: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id: None,
            title: title.into(),
            is_complete,
        }
    }
}

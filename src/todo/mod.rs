//! In-memory TODO list.
//!
//! The list is owned by a [`TodoStore`] created at startup and shared with the
//! HTTP handlers. Business outcomes (duplicate title, unknown id) are reported
//! through explicit enums rather than errors.

mod model;
mod store;

pub use model::{NewTodo, Todo};
pub use store::{AddOutcome, DeleteOutcome, TodoStore, UpdateOutcome};

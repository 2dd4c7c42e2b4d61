use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::model::{NewTodo, Todo};

const SEED: [(&str, bool); 3] = [
    ("Wash clothes", false),
    ("Vacuum Carpet", true),
    ("Water the garden", false),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(Todo),
    /// A todo with the same title (ignoring case) already exists.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Todo),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Todo),
    NotFound,
}

/// Ordered in-memory list of todos shared by all requests.
///
/// Each operation holds the lock for its whole duration, so a single call is
/// atomic. Concurrent updates of the same id are last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl TodoStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the default todos.
    #[must_use]
    pub fn seeded() -> Self {
        let todos = SEED
            .iter()
            .zip(1..)
            .map(|(&(title, is_complete), id)| Todo {
                id,
                title: title.to_string(),
                is_complete,
            })
            .collect::<Vec<_>>();

        info!("Initialized with {} default todos", todos.len());

        Self {
            todos: Arc::new(RwLock::new(todos)),
        }
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Option<Todo> {
        let todo = self.todos.read().await.iter().find(|t| t.id == id).cloned();
        if todo.is_none() {
            warn!("Todo with ID {id} not found");
        }
        todo
    }

    #[instrument(skip(self, todo), fields(title = %todo.title))]
    pub async fn add(&self, todo: NewTodo) -> AddOutcome {
        let mut todos = self.todos.write().await;

        if todos.iter().any(|t| same_title(&t.title, &todo.title)) {
            warn!("Todo titled {:?} already exists", todo.title);
            return AddOutcome::Duplicate;
        }

        let id = todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        let created = Todo {
            id,
            title: todo.title,
            is_complete: todo.is_complete,
        };
        todos.push(created.clone());

        info!("Todo added with ID {id}");

        AddOutcome::Created(created)
    }

    #[instrument(skip(self, todo))]
    pub async fn update(&self, id: i64, todo: NewTodo) -> UpdateOutcome {
        let mut todos = self.todos.write().await;

        let Some(existing) = todos.iter_mut().find(|t| t.id == id) else {
            warn!("Todo with ID {id} not found for update");
            return UpdateOutcome::NotFound;
        };

        existing.title = todo.title;
        existing.is_complete = todo.is_complete;

        info!("Todo with ID {id} updated");

        UpdateOutcome::Updated(existing.clone())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> DeleteOutcome {
        let mut todos = self.todos.write().await;

        match todos.iter().position(|t| t.id == id) {
            Some(index) => {
                let removed = todos.remove(index);
                info!("Todo with ID {id} deleted");
                DeleteOutcome::Deleted(removed)
            }
            None => {
                warn!("Todo with ID {id} not found for deletion");
                DeleteOutcome::NotFound
            }
        }
    }
}

/// Char-by-char comparison of simple upper-case forms. Characters whose
/// upper case expands to several chars (`ß` -> `SS`) compare as themselves.
fn same_title(a: &str, b: &str) -> bool {
    a.chars().map(fold_case).eq(b.chars().map(fold_case))
}

fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

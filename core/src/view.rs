//! Pure rendering model for the todo list.
//!
//! The original front end rebuilt a DOM container from scratch on every
//! load. `ListView` keeps that full-replacement behavior but as plain
//! data: `render` is a pure function from the server's collection to the
//! view, and the placeholder states are explicit variants rather than
//! innerHTML strings. Hosts decide how to draw it.

use crate::types::Todo;

/// Placeholder text shown when the collection is empty.
pub const EMPTY_MESSAGE: &str = "No todos found";

/// Placeholder text shown when a load failed.
pub const FAILED_MESSAGE: &str = "Loading failed";

/// One interactive card in the rendered list.
///
/// `struck` (strikethrough + grey styling) derives from the completion
/// flag; it carries no independent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCard {
    pub id: u64,
    pub title: String,
    pub checked: bool,
    pub struck: bool,
}

impl TodoCard {
    fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            checked: todo.is_completed,
            struck: todo.is_completed,
        }
    }
}

/// The rendered list: fully replaced on every successful load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListView {
    /// Nothing loaded yet.
    #[default]
    Initial,
    /// Loaded an empty collection.
    Empty,
    /// The last load failed; any prior cards are discarded.
    Failed,
    /// One card per server-side todo, in server order.
    Todos(Vec<TodoCard>),
}

impl ListView {
    /// Build the view for a successfully loaded collection.
    pub fn render(todos: &[Todo]) -> Self {
        if todos.is_empty() {
            ListView::Empty
        } else {
            ListView::Todos(todos.iter().map(TodoCard::from_todo).collect())
        }
    }

    pub fn cards(&self) -> &[TodoCard] {
        match self {
            ListView::Todos(cards) => cards,
            _ => &[],
        }
    }

    /// The placeholder message for the non-card states, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListView::Empty => Some(EMPTY_MESSAGE),
            ListView::Failed => Some(FAILED_MESSAGE),
            _ => None,
        }
    }
}

//! Terminal rendering of the list view and notices.

use todo_sync::{ListView, Notice};

/// Print the rendered list: placeholder text for the empty/failed states,
/// otherwise one line per card. Completed titles get strikethrough + dim,
/// mirroring the original's greyed line-through styling.
pub fn print_view(view: &ListView) {
    if let Some(placeholder) = view.placeholder() {
        println!("{placeholder}");
        return;
    }
    for card in view.cards() {
        let checkbox = if card.checked { "[x]" } else { "[ ]" };
        let title = if card.struck {
            format!("\x1b[9;2m{}\x1b[0m", card.title)
        } else {
            card.title.clone()
        };
        println!("{checkbox} {:>4}  {title}", card.id);
    }
}

/// Print notices to stderr; returns true if any of them reports a
/// failure, so the caller can pick the exit code.
pub fn print_notices(notices: &[Notice]) -> bool {
    let mut failed = false;
    for notice in notices {
        match notice {
            Notice::LoginRequired => {
                failed = true;
                eprintln!("Please login first");
            }
            Notice::Created(todo) => tracing::debug!(id = todo.id, "created todo"),
            Notice::Updated => eprintln!("Todo updated successfully"),
            Notice::UpdateFailed => {
                failed = true;
                eprintln!("Todo updated failed");
            }
            Notice::Deleted => eprintln!("Todo deleted successfully"),
            Notice::DeleteFailed => {
                failed = true;
                eprintln!("Todo deleted failed");
            }
            Notice::Error(msg) => {
                failed = true;
                eprintln!("{msg}");
            }
        }
    }
    failed
}

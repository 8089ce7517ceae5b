//! Todo manager
//!
//! - `task`: task record and priority enumeration
//! - `list`: in-memory list with add/edit/remove/filter
//! - `storage`: `text|priority` flat-file persistence

mod list;
mod storage;
mod task;

pub use list::TodoList;
pub use storage::{TaskFile, parse_tasks, render_tasks};
pub use task::{Priority, Task};

use super::list::TodoList;
use super::task::{Priority, Task};
use crate::error::{DeskError, DeskResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Flat-file persistence for the todo list
///
/// One task per line as `text|priority`. The file is rewritten in full on
/// every save.
pub struct TaskFile {
    file_path: PathBuf,
}

impl TaskFile {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the list; a missing file means no tasks yet
    pub fn load(&self) -> DeskResult<TodoList> {
        if !self.file_path.exists() {
            debug!(path = %self.file_path.display(), "tasks file not found, starting empty");
            return Ok(TodoList::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let list = parse_tasks(&content)?;
        debug!(path = %self.file_path.display(), count = list.len(), "loaded tasks");
        Ok(list)
    }

    pub fn save(&self, list: &TodoList) -> DeskResult<()> {
        fs::write(&self.file_path, render_tasks(list)?)?;
        info!(path = %self.file_path.display(), count = list.len(), "saved tasks");
        Ok(())
    }
}

/// Parse the contents of a tasks file
///
/// The priority is taken after the last `|`, so task text may itself contain
/// the delimiter.
pub fn parse_tasks(content: &str) -> DeskResult<TodoList> {
    let mut tasks = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let (text, priority) = line.rsplit_once('|').ok_or_else(|| DeskError::MalformedTask {
            line: i + 1,
            message: "expected 'text|priority'".to_string(),
        })?;
        let priority: Priority = priority.parse().map_err(|message| DeskError::MalformedTask {
            line: i + 1,
            message,
        })?;
        tasks.push(Task::new(text, priority));
    }
    Ok(TodoList::from_tasks(tasks))
}

/// Render a list in the tasks file format
///
/// Text with a line break cannot be stored on one line and is rejected, so
/// nothing is written that a later load would fail on.
pub fn render_tasks(list: &TodoList) -> DeskResult<String> {
    let mut out = String::new();
    for (i, task) in list.tasks().iter().enumerate() {
        if task.text.contains(['\n', '\r']) {
            return Err(DeskError::invalid(format!(
                "Task {} contains a line break and cannot be saved",
                i + 1
            )));
        }
        out.push_str(&format!("{}|{}\n", task.text, task.priority.label()));
    }
    Ok(out)
}

//! Todo handlers

use crate::Desk;
use crate::formatting;
use crate::todo::{Priority, TodoList};
use anyhow::{Context, Result};

impl Desk {
    fn load_tasks(&self) -> Result<TodoList> {
        self.tasks
            .load()
            .with_context(|| format!("Failed to read {}", self.tasks.path().display()))
    }

    fn save_tasks(&self, list: &TodoList) -> Result<()> {
        self.tasks
            .save(list)
            .with_context(|| format!("Failed to write {}", self.tasks.path().display()))
    }

    /// Add a task and persist the list
    pub fn handle_todo_add(&self, text: &str, priority: Priority) -> Result<String> {
        let mut list = self.load_tasks()?;
        let added = list.add(text, priority)?.clone();
        self.save_tasks(&list)?;
        Ok(format!(
            "Task added: {} ({})\nTask count: {}",
            added.text,
            added.priority,
            list.len()
        ))
    }

    /// Replace a task's text, keeping its priority
    pub fn handle_todo_edit(&self, position: usize, text: &str) -> Result<String> {
        let mut list = self.load_tasks()?;
        let edited = list.edit(position, text)?.clone();
        self.save_tasks(&list)?;
        Ok(format!("Task {} updated: {}", position, edited.text))
    }

    pub fn handle_todo_delete(&self, position: usize) -> Result<String> {
        let mut list = self.load_tasks()?;
        let removed = list.remove(position)?;
        self.save_tasks(&list)?;
        Ok(format!(
            "Task removed: {}\nTask count: {}",
            removed.text,
            list.len()
        ))
    }

    /// List tasks, optionally only those of one priority
    pub fn handle_todo_list(&self, priority: Option<Priority>) -> Result<String> {
        let list = self.load_tasks()?;
        let visible = list.filter(priority);
        Ok(formatting::format_tasks(&visible, list.len()))
    }
}

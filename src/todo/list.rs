use super::task::{Priority, Task};
use crate::error::{DeskError, DeskResult};

/// Ordered list of tasks
///
/// Positions in the public API are 1-based, matching what the user sees in
/// `todo list` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    tasks: Vec<Task>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task; surrounding whitespace is trimmed and empty text is rejected
    pub fn add(&mut self, text: &str, priority: Priority) -> DeskResult<&Task> {
        let text =
            clean_text(text).ok_or_else(|| DeskError::invalid("Cannot add an empty task"))?;
        self.tasks.push(Task::new(text, priority));
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Remove the task at `position` and return it
    pub fn remove(&mut self, position: usize) -> DeskResult<Task> {
        let index = self.index_of(position)?;
        Ok(self.tasks.remove(index))
    }

    /// Replace the text of the task at `position`, keeping its priority
    pub fn edit(&mut self, position: usize, text: &str) -> DeskResult<&Task> {
        let index = self.index_of(position)?;
        let text =
            clean_text(text).ok_or_else(|| DeskError::invalid("Cannot set an empty task"))?;
        let task = &mut self.tasks[index];
        task.text = text;
        Ok(task)
    }

    /// Tasks visible under a priority filter, with their positions
    ///
    /// `None` shows every task.
    pub fn filter(&self, priority: Option<Priority>) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| priority.is_none_or(|p| task.priority == p))
            .map(|(i, task)| (i + 1, task))
            .collect()
    }

    fn index_of(&self, position: usize) -> DeskResult<usize> {
        if position == 0 || position > self.tasks.len() {
            return Err(DeskError::NoSuchTask(position));
        }
        Ok(position - 1)
    }
}

/// Trim the text and fold line breaks into spaces; one task is one line on disk
fn clean_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let parts: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    Some(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TodoList {
        let mut list = TodoList::new();
        list.add("write report", Priority::High).unwrap();
        list.add("water plants", Priority::Low).unwrap();
        list.add("book dentist", Priority::Medium).unwrap();
        list.add("renew passport", Priority::High).unwrap();
        list
    }

    #[test]
    fn test_add_trims_text() {
        let mut list = TodoList::new();
        let task = list.add("  buy milk \n", Priority::Low).unwrap();
        assert_eq!(task.text, "buy milk");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_folds_line_breaks() {
        let mut list = TodoList::new();
        let task = list.add("call\r\n  the bank", Priority::Medium).unwrap();
        assert_eq!(task.text, "call the bank");
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut list = TodoList::new();
        assert!(list.add("   ", Priority::Low).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_by_position() {
        let mut list = sample();
        let removed = list.remove(2).unwrap();
        assert_eq!(removed.text, "water plants");
        assert_eq!(list.len(), 3);
        assert_eq!(list.tasks()[1].text, "book dentist");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = sample();
        assert!(matches!(list.remove(0), Err(DeskError::NoSuchTask(0))));
        assert!(matches!(list.remove(5), Err(DeskError::NoSuchTask(5))));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_edit_keeps_priority() {
        let mut list = sample();
        let task = list.edit(1, "write final report").unwrap();
        assert_eq!(task.text, "write final report");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_edit_rejects_empty() {
        let mut list = sample();
        assert!(list.edit(1, "").is_err());
        assert_eq!(list.tasks()[0].text, "write report");
    }

    #[test]
    fn test_filter_by_priority() {
        let list = sample();
        let high = list.filter(Some(Priority::High));
        let positions: Vec<usize> = high.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(positions, vec![1, 4]);

        assert_eq!(list.filter(None).len(), 4);
        assert!(TodoList::new().filter(Some(Priority::Low)).is_empty());
    }
}

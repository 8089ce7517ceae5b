//! Todo manager tests against a real tasks file
mod common;

use deskkit::todo::{Priority, Task, TaskFile, TodoList};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_tasks_file() {
    let dir = TempDir::new().unwrap();
    let file = TaskFile::new(dir.path().join("tasks.txt"));

    let mut list = TodoList::new();
    list.add("buy milk", Priority::Low).unwrap();
    list.add("call a|b support", Priority::High).unwrap();
    file.save(&list).unwrap();

    let content = fs::read_to_string(file.path()).unwrap();
    assert_eq!(content, "buy milk|Low\ncall a|b support|High\n");

    let loaded = file.load().unwrap();
    assert_eq!(loaded, list);
}

#[test]
fn test_missing_file_is_empty_list() {
    let dir = TempDir::new().unwrap();
    let file = TaskFile::new(dir.path().join("absent.txt"));
    assert!(file.load().unwrap().is_empty());
}

#[test]
fn test_legacy_labels_are_rewritten_in_english() {
    let dir = TempDir::new().unwrap();
    let path = common::write_file(dir.path(), "tasks.txt", "zakupy|Wysoki\nsprzątanie|Niski\n");
    let file = TaskFile::new(&path);

    let list = file.load().unwrap();
    assert_eq!(list.tasks()[0].priority, Priority::High);
    file.save(&list).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "zakupy|High\nsprzątanie|Low\n");
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = common::write_file(dir.path(), "tasks.txt", "ok|Low\nno delimiter here\n");
    let err = TaskFile::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_handler_workflow() {
    let (desk, _dir) = common::get_test_desk();

    let added = desk.handle_todo_add("write report", Priority::High).unwrap();
    assert!(added.contains("Task added: write report (High)"));
    assert!(added.contains("Task count: 1"));

    desk.handle_todo_add("water plants", Priority::Low).unwrap();
    desk.handle_todo_add("book dentist", Priority::High).unwrap();

    let high = desk.handle_todo_list(Some(Priority::High)).unwrap();
    assert!(high.contains("1. [high  ] write report"));
    assert!(high.contains("3. [high  ] book dentist"));
    assert!(!high.contains("water plants"));
    assert!(high.contains("Task count: 3"));

    let edited = desk.handle_todo_edit(2, "water all plants").unwrap();
    assert_eq!(edited, "Task 2 updated: water all plants");

    let removed = desk.handle_todo_delete(1).unwrap();
    assert!(removed.contains("Task removed: write report"));
    assert!(removed.contains("Task count: 2"));

    let all = desk.handle_todo_list(None).unwrap();
    assert!(all.contains("1. [low   ] water all plants"));
    assert!(all.contains("2. [high  ] book dentist"));
}

#[test]
fn test_handler_rejects_bad_input() {
    let (desk, _dir) = common::get_test_desk();

    assert!(desk.handle_todo_add("   ", Priority::Low).is_err());
    assert!(desk.handle_todo_delete(1).is_err());
    assert!(desk.handle_todo_edit(1, "anything").is_err());

    let empty = desk.handle_todo_list(None).unwrap();
    assert!(empty.contains("No tasks found"));
}

#[test]
fn test_save_refuses_multiline_text_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    let path = common::write_file(dir.path(), "tasks.txt", "keep me|Low\n");
    let file = TaskFile::new(&path);

    let list = TodoList::from_tasks(vec![Task::new("first\nsecond", Priority::High)]);
    assert!(file.save(&list).is_err());

    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me|Low\n");
    assert_eq!(file.load().unwrap().len(), 1);
}

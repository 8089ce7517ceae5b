//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use deskkit::{Config, Desk};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Date every test treats as "today"
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Create a handler whose files all live in a fresh temporary directory
pub fn get_test_desk() -> (Desk, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.todo.file = dir.path().join("tasks.txt");
    config.tickets.database = dir.path().join("tickets.sqlite");
    config.plot.output_dir = dir.path().join("charts");
    let desk = Desk::new(config).with_today(test_today());
    (desk, dir)
}

/// Write `content` to `name` inside `dir` and return the full path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Extract the card number from an add-ticket response
/// Response format: "Ticket added!\nCard number: <id>\n..."
pub fn extract_card_id(response: &str) -> String {
    response
        .lines()
        .find_map(|line| line.strip_prefix("Card number: "))
        .unwrap_or("")
        .trim()
        .to_string()
}

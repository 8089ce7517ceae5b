//! Formatting helper functions for command output

use crate::tickets::{COLUMN_HEADERS, Ticket};
use crate::todo::{Priority, Task};

/// Format visible tasks with their positions, followed by the total count
///
/// # Arguments
/// * `visible` - Tasks passing the current filter, with 1-based positions
/// * `total` - Number of tasks in the whole list
pub fn format_tasks(visible: &[(usize, &Task)], total: usize) -> String {
    let mut result = String::new();
    if visible.is_empty() {
        result.push_str("No tasks found\n");
    } else {
        for (position, task) in visible {
            result.push_str(&format!(
                "{:>3}. [{}] {}\n",
                position,
                priority_tag(task.priority),
                task.text
            ));
        }
    }
    result.push_str(&format!("Task count: {}", total));
    result
}

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low   ",
        Priority::Medium => "medium",
        Priority::High => "high  ",
    }
}

fn ticket_cells(ticket: &Ticket) -> [String; 7] {
    [
        ticket.card_id.clone(),
        ticket.customer_name.clone(),
        ticket.class.label().to_string(),
        ticket.discount.label().to_string(),
        ticket.valid_from.format("%Y-%m-%d").to_string(),
        ticket.valid_to.format("%Y-%m-%d").to_string(),
        format!("{:.2}", ticket.price),
    ]
}

/// Format tickets as an aligned table with a count line
pub fn format_tickets(tickets: &[Ticket]) -> String {
    let rows: Vec<[String; 7]> = tickets.iter().map(ticket_cells).collect();

    let mut widths: Vec<usize> = COLUMN_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut result = String::new();
    result.push_str(&render_row(COLUMN_HEADERS.iter().copied(), &widths));
    result.push('\n');
    for row in &rows {
        result.push_str(&render_row(row.iter().map(String::as_str), &widths));
        result.push('\n');
    }
    result.push_str(&format!("Ticket count: {}", tickets.len()));
    result
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width - cell.chars().count())))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Format one ticket as labelled lines
pub fn format_ticket(ticket: &Ticket) -> String {
    COLUMN_HEADERS
        .iter()
        .zip(ticket_cells(ticket))
        .map(|(header, value)| format!("{:<14}{}", format!("{}:", header), value))
        .collect::<Vec<_>>()
        .join("\n")
}

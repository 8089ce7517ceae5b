//! Command handlers
//!
//! Each tool's handlers live in their own file as `impl Desk` blocks.

pub mod plot;
pub mod tickets;
pub mod todo;

//! Desk utilities library
//!
//! Three independent tools sharing one binary:
//! - **Plot dashboard** (`plot`): multi-tab charts of two-column data files with
//!   an optional least-squares regression overlay, rendered to SVG
//! - **Ticket register** (`tickets`): transit tickets in a SQLite table with a
//!   static fare table, filtering and CSV export
//! - **Todo manager** (`todo`): prioritized tasks in a `text|priority` flat file
//!
//! # Architecture
//!
//! - **Command Layer**: `cli` parses arguments, `Desk` handlers in `handlers`
//!   turn them into user-facing messages
//! - **Domain Layer**: `plot`, `tickets` and `todo` modules
//! - **Persistence Layer**: `TaskFile`, `TicketStore` and SVG/CSV output files
//!
//! # Example
//!
//! ```no_run
//! use deskkit::{Config, Desk};
//! use deskkit::todo::Priority;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let desk = Desk::new(Config::default());
//!     println!("{}", desk.handle_todo_add("water plants", Priority::Low)?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formatting;
mod handlers;
pub mod plot;
pub mod tickets;
pub mod todo;
pub mod validation;

use chrono::{Local, NaiveDate};
use std::path::PathBuf;

pub use config::Config;
pub use error::{DeskError, DeskResult};
pub use handlers::tickets::{FilterArgs, TicketChanges};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Command handler shared by the three tools
///
/// Holds file locations from the configuration and the date treated as
/// "today". Every handler opens what it needs, performs one operation and
/// returns the message to show the user.
pub struct Desk {
    pub(crate) tasks: todo::TaskFile,
    pub(crate) tickets_db: PathBuf,
    pub(crate) plot_output_dir: PathBuf,
    pub(crate) today: NaiveDate,
}

impl Desk {
    /// Create a handler from configuration, using the local date as today
    pub fn new(config: Config) -> Self {
        Self {
            tasks: todo::TaskFile::new(&config.todo.file),
            tickets_db: config.tickets.database,
            plot_output_dir: config.plot.output_dir,
            today: local_date_today(),
        }
    }

    /// Override the date used for "valid today" and default start dates
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub(crate) fn open_tickets(&self) -> anyhow::Result<tickets::TicketStore> {
        use anyhow::Context;
        tickets::TicketStore::open(&self.tickets_db).with_context(|| {
            format!(
                "Failed to open ticket database {}",
                self.tickets_db.display()
            )
        })
    }
}

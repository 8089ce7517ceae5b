//! Command-line interface
//!
//! Argument types for the `deskkit` binary and their dispatch to [`Desk`]
//! handlers.

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::plot::{ChartSpec, PlotKind};
use crate::tickets::{DiscountClass, TicketClass};
use crate::todo::Priority;
use crate::validation::{parse_date, parse_position, parse_price};
use crate::{Desk, FilterArgs, TicketChanges};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Desk utilities - plot dashboard, ticket register and todo manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plot data files in one chart
    Plot(PlotArgs),

    /// Render every tab of a dashboard layout file
    PlotLayout {
        /// TOML layout with [[tab]] entries
        layout: PathBuf,

        /// Directory for tab-N.svg files (defaults to the configured output directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Manage transit tickets
    Tickets {
        #[command(subcommand)]
        action: TicketCommand,
    },

    /// Manage the todo list
    Todo {
        #[command(subcommand)]
        action: TodoCommand,
    },
}

#[derive(ClapArgs, Debug)]
pub struct PlotArgs {
    /// Headerless CSV files with two numeric columns
    #[arg(short, long = "file", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// line, scatter, bar or histogram
    #[arg(short, long, default_value = "line")]
    pub kind: PlotKind,

    /// Overlay a least-squares line (line and scatter only)
    #[arg(short, long)]
    pub regression: bool,

    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub x_label: String,

    #[arg(long, default_value = "")]
    pub y_label: String,

    /// Output SVG path (defaults to chart.svg in the configured output directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl PlotArgs {
    fn chart_spec(&self) -> ChartSpec {
        ChartSpec {
            kind: self.kind,
            regression: self.regression,
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
        }
    }
}

/// Filter options shared by `list` and `export`
#[derive(ClapArgs, Debug, Clone, Copy, Default)]
pub struct TicketFilterArgs {
    /// Only this ticket class (monthly, 90-day, half-year, yearly)
    #[arg(long)]
    pub class: Option<TicketClass>,

    /// Only this discount class (normal, reduced)
    #[arg(long)]
    pub discount: Option<DiscountClass>,

    /// Only tickets valid today
    #[arg(long)]
    pub valid_today: bool,
}

impl From<TicketFilterArgs> for FilterArgs {
    fn from(args: TicketFilterArgs) -> Self {
        FilterArgs {
            class: args.class,
            discount: args.discount,
            valid_today: args.valid_today,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// Register a new ticket
    Add {
        /// Customer name
        #[arg(long)]
        name: String,

        /// monthly, 90-day, half-year or yearly
        #[arg(long)]
        class: TicketClass,

        /// normal or reduced
        #[arg(long, default_value = "normal")]
        discount: DiscountClass,

        /// First day of validity, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Manual price instead of the fare table
        #[arg(long, value_parser = parse_price)]
        price: Option<f64>,
    },

    /// Change a stored ticket
    Edit {
        card_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        class: Option<TicketClass>,

        #[arg(long)]
        discount: Option<DiscountClass>,

        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        #[arg(long, value_parser = parse_price)]
        price: Option<f64>,
    },

    /// Delete a ticket
    Delete { card_id: String },

    /// Show one ticket
    Show { card_id: String },

    /// List tickets
    List {
        #[command(flatten)]
        filter: TicketFilterArgs,
    },

    /// Export tickets to CSV
    Export {
        /// Output CSV path
        path: PathBuf,

        #[command(flatten)]
        filter: TicketFilterArgs,
    },

    /// Show price and validity without storing a ticket
    Quote {
        #[arg(long)]
        class: TicketClass,

        #[arg(long, default_value = "normal")]
        discount: DiscountClass,

        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
    },

    /// Insert sample tickets
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Add a task
    Add {
        text: String,

        /// low, medium or high
        #[arg(short, long, default_value = "low")]
        priority: Priority,
    },

    /// Change the text of a task
    Edit {
        /// Task number from `todo list`
        #[arg(value_parser = parse_position)]
        number: usize,

        text: String,
    },

    /// Delete a task
    Delete {
        /// Task number from `todo list`
        #[arg(value_parser = parse_position)]
        number: usize,
    },

    /// List tasks
    List {
        /// Only tasks of this priority
        #[arg(short, long)]
        priority: Option<Priority>,
    },
}

/// Load configuration and run one command, returning its output
pub fn run(args: Args) -> Result<String> {
    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    let desk = Desk::new(config);
    dispatch(&desk, args.command)
}

/// Run a parsed command against `desk`
pub fn dispatch(desk: &Desk, command: Command) -> Result<String> {
    match command {
        Command::Plot(plot) => desk.handle_plot(&plot.files, plot.chart_spec(), plot.output),
        Command::PlotLayout { layout, output_dir } => desk.handle_plot_layout(&layout, output_dir),
        Command::Tickets { action } => match action {
            TicketCommand::Add {
                name,
                class,
                discount,
                from,
                price,
            } => desk.handle_ticket_add(&name, class, discount, from, price),
            TicketCommand::Edit {
                card_id,
                name,
                class,
                discount,
                from,
                price,
            } => desk.handle_ticket_edit(
                &card_id,
                TicketChanges {
                    customer_name: name,
                    class,
                    discount,
                    valid_from: from,
                    price,
                },
            ),
            TicketCommand::Delete { card_id } => desk.handle_ticket_delete(&card_id),
            TicketCommand::Show { card_id } => desk.handle_ticket_show(&card_id),
            TicketCommand::List { filter } => desk.handle_ticket_list(filter.into()),
            TicketCommand::Export { path, filter } => {
                desk.handle_ticket_export(&path, filter.into())
            }
            TicketCommand::Quote {
                class,
                discount,
                from,
            } => desk.handle_ticket_quote(class, discount, from),
            TicketCommand::Seed => desk.handle_ticket_seed(),
        },
        Command::Todo { action } => match action {
            TodoCommand::Add { text, priority } => desk.handle_todo_add(&text, priority),
            TodoCommand::Edit { number, text } => desk.handle_todo_edit(number, &text),
            TodoCommand::Delete { number } => desk.handle_todo_delete(number),
            TodoCommand::List { priority } => desk.handle_todo_list(priority),
        },
    }
}

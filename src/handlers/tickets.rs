//! Ticket register handlers

use crate::Desk;
use crate::error::DeskError;
use crate::formatting;
use crate::tickets::{DiscountClass, TicketClass, TicketFilter, TicketForm};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::path::Path;

/// Values of an edit; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
    pub customer_name: Option<String>,
    pub class: Option<TicketClass>,
    pub discount: Option<DiscountClass>,
    pub valid_from: Option<NaiveDate>,
    pub price: Option<f64>,
}

/// Filter selections as given on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterArgs {
    pub class: Option<TicketClass>,
    pub discount: Option<DiscountClass>,
    pub valid_today: bool,
}

impl Desk {
    fn ticket_filter(&self, args: FilterArgs) -> TicketFilter {
        TicketFilter {
            class: args.class,
            discount: args.discount,
            valid_on: args.valid_today.then_some(self.today),
        }
    }

    /// Register a new ticket under a freshly generated card id
    pub fn handle_ticket_add(
        &self,
        customer_name: &str,
        class: TicketClass,
        discount: DiscountClass,
        valid_from: Option<NaiveDate>,
        price: Option<f64>,
    ) -> Result<String> {
        let store = self.open_tickets()?;
        let form = TicketForm {
            customer_name: customer_name.to_string(),
            class,
            discount,
            valid_from: valid_from.unwrap_or(self.today),
            price,
        };
        let card_id = store.fresh_card_id(&mut rand::thread_rng())?;
        let ticket = form.into_ticket(card_id)?;
        store.insert(&ticket).context("Failed to add ticket")?;

        Ok(format!(
            "Ticket added!\nCard number: {}\nValid {} to {}, price {:.2}",
            ticket.card_id, ticket.valid_from, ticket.valid_to, ticket.price
        ))
    }

    /// Apply changes to a stored ticket
    ///
    /// Valid-to is recomputed from class and start date. The stored price is
    /// kept unless class or discount change or a new price is given.
    pub fn handle_ticket_edit(&self, card_id: &str, changes: TicketChanges) -> Result<String> {
        let store = self.open_tickets()?;
        let Some(current) = store.get(card_id)? else {
            bail!(DeskError::UnknownTicket(card_id.to_string()));
        };

        let mut form = TicketForm::from_ticket(&current);
        form.set_fare(
            changes.class.unwrap_or(current.class),
            changes.discount.unwrap_or(current.discount),
        );
        if let Some(name) = changes.customer_name {
            form.customer_name = name;
        }
        if let Some(valid_from) = changes.valid_from {
            form.valid_from = valid_from;
        }
        if changes.price.is_some() {
            form.price = changes.price;
        }

        let ticket = form.into_ticket(current.card_id)?;
        store.update(&ticket).context("Failed to update ticket")?;
        Ok(format!("Ticket updated!\n{}", formatting::format_ticket(&ticket)))
    }

    pub fn handle_ticket_delete(&self, card_id: &str) -> Result<String> {
        let store = self.open_tickets()?;
        store.delete(card_id)?;
        let remaining = store.count(&TicketFilter::all())?;
        Ok(format!("Ticket {} deleted\nTicket count: {}", card_id, remaining))
    }

    pub fn handle_ticket_show(&self, card_id: &str) -> Result<String> {
        let store = self.open_tickets()?;
        match store.get(card_id)? {
            Some(ticket) => Ok(formatting::format_ticket(&ticket)),
            None => bail!(DeskError::UnknownTicket(card_id.to_string())),
        }
    }

    pub fn handle_ticket_list(&self, filter: FilterArgs) -> Result<String> {
        let store = self.open_tickets()?;
        let tickets = store.list(&self.ticket_filter(filter))?;
        Ok(formatting::format_tickets(&tickets))
    }

    /// Export the filtered view to CSV
    pub fn handle_ticket_export(&self, path: &Path, filter: FilterArgs) -> Result<String> {
        let store = self.open_tickets()?;
        let rows = store
            .export_csv(path, &self.ticket_filter(filter))
            .with_context(|| format!("Failed to export tickets to {}", path.display()))?;
        Ok(format!("Exported {} ticket(s) to {}", rows, path.display()))
    }

    /// Show price and validity for a prospective ticket without storing it
    pub fn handle_ticket_quote(
        &self,
        class: TicketClass,
        discount: DiscountClass,
        valid_from: Option<NaiveDate>,
    ) -> Result<String> {
        let form = TicketForm {
            customer_name: String::new(),
            class,
            discount,
            valid_from: valid_from.unwrap_or(self.today),
            price: None,
        };
        Ok(format!(
            "{} {} ticket\nValid {} to {} ({} days)\nPrice: {:.2}",
            discount,
            class,
            form.valid_from,
            form.valid_to(),
            class.days(),
            form.price()
        ))
    }

    pub fn handle_ticket_seed(&self) -> Result<String> {
        let mut store = self.open_tickets()?;
        let inserted = store.seed_demo_data()?;
        let total = store.count(&TicketFilter::all())?;
        Ok(format!(
            "Inserted {} sample ticket(s)\nTicket count: {}",
            inserted, total
        ))
    }
}

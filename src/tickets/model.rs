use crate::error::{DeskError, DeskResult};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Number of digits in a generated card id
pub const CARD_ID_LEN: usize = 16;

/// Subscription duration of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketClass {
    Monthly,
    NinetyDay,
    HalfYear,
    Yearly,
}

impl TicketClass {
    pub const ALL: [TicketClass; 4] = [
        TicketClass::Monthly,
        TicketClass::NinetyDay,
        TicketClass::HalfYear,
        TicketClass::Yearly,
    ];

    /// Validity period in days
    pub fn days(self) -> i64 {
        match self {
            TicketClass::Monthly => 30,
            TicketClass::NinetyDay => 90,
            TicketClass::HalfYear => 182,
            TicketClass::Yearly => 365,
        }
    }

    /// Label stored in the `ticket_type` column
    pub fn label(self) -> &'static str {
        match self {
            TicketClass::Monthly => "Monthly",
            TicketClass::NinetyDay => "90-day",
            TicketClass::HalfYear => "Half-year",
            TicketClass::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for TicketClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TicketClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "miesięczny" => Ok(TicketClass::Monthly),
            "90-day" | "90day" | "quarterly" | "90-dniowy" => Ok(TicketClass::NinetyDay),
            "half-year" | "halfyear" | "półroczny" => Ok(TicketClass::HalfYear),
            "yearly" | "annual" | "roczny" => Ok(TicketClass::Yearly),
            _ => Err(format!(
                "Invalid ticket class '{}'. Valid options are: monthly, 90-day, half-year, yearly",
                s
            )),
        }
    }
}

/// Fare tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountClass {
    Normal,
    Reduced,
}

impl DiscountClass {
    pub const ALL: [DiscountClass; 2] = [DiscountClass::Normal, DiscountClass::Reduced];

    /// Label stored in the `discount_type` column
    pub fn label(self) -> &'static str {
        match self {
            DiscountClass::Normal => "Normal",
            DiscountClass::Reduced => "Reduced",
        }
    }
}

impl fmt::Display for DiscountClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DiscountClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "normalny" => Ok(DiscountClass::Normal),
            "reduced" | "ulgowy" => Ok(DiscountClass::Reduced),
            _ => Err(format!(
                "Invalid discount class '{}'. Valid options are: normal, reduced",
                s
            )),
        }
    }
}

/// Price of a ticket from the static fare table
pub fn price_for(class: TicketClass, discount: DiscountClass) -> f64 {
    match (class, discount) {
        (TicketClass::Monthly, DiscountClass::Normal) => 120.00,
        (TicketClass::Monthly, DiscountClass::Reduced) => 60.00,
        (TicketClass::NinetyDay, DiscountClass::Normal) => 320.00,
        (TicketClass::NinetyDay, DiscountClass::Reduced) => 160.00,
        (TicketClass::HalfYear, DiscountClass::Normal) => 600.00,
        (TicketClass::HalfYear, DiscountClass::Reduced) => 300.00,
        (TicketClass::Yearly, DiscountClass::Normal) => 1100.00,
        (TicketClass::Yearly, DiscountClass::Reduced) => 550.00,
    }
}

/// Last day of validity for a ticket starting on `from`
pub fn valid_until(class: TicketClass, from: NaiveDate) -> NaiveDate {
    from + Duration::days(class.days())
}

/// Generate a random numeric card id of [`CARD_ID_LEN`] digits
pub fn generate_card_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CARD_ID_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// A stored ticket
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub card_id: String,
    pub customer_name: String,
    pub class: TicketClass,
    pub discount: DiscountClass,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub price: f64,
}

impl Ticket {
    /// Check whether the ticket is valid on `day` (both ends inclusive)
    pub fn is_valid_on(&self, day: NaiveDate) -> bool {
        self.valid_from <= day && day <= self.valid_to
    }
}

/// Values entered for a new or edited ticket
///
/// Valid-to always follows from class and start date. The price follows from
/// the fare table unless a manual price is given.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketForm {
    pub customer_name: String,
    pub class: TicketClass,
    pub discount: DiscountClass,
    pub valid_from: NaiveDate,
    pub price: Option<f64>,
}

impl TicketForm {
    pub fn valid_to(&self) -> NaiveDate {
        valid_until(self.class, self.valid_from)
    }

    pub fn price(&self) -> f64 {
        self.price.unwrap_or_else(|| price_for(self.class, self.discount))
    }

    /// Build the ticket stored under `card_id`
    pub fn into_ticket(self, card_id: String) -> DeskResult<Ticket> {
        let customer_name = self.customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(DeskError::invalid("Customer name must not be empty"));
        }
        Ok(Ticket {
            card_id,
            valid_to: self.valid_to(),
            price: self.price(),
            customer_name,
            class: self.class,
            discount: self.discount,
            valid_from: self.valid_from,
        })
    }

    /// Form pre-filled from an existing ticket, as when a row is selected
    ///
    /// The stored price is carried over; changing class or discount goes
    /// through [`TicketForm::set_fare`], which reverts to the fare table.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            customer_name: ticket.customer_name.clone(),
            class: ticket.class,
            discount: ticket.discount,
            valid_from: ticket.valid_from,
            price: Some(ticket.price),
        }
    }

    pub fn set_fare(&mut self, class: TicketClass, discount: DiscountClass) {
        if class != self.class || discount != self.discount {
            self.class = class;
            self.discount = discount;
            self.price = None;
        }
    }
}

//! Transit-ticket register
//!
//! - `model`: ticket classes, the fare table and the entry form
//! - `filter`: view filter compiled to a parameterized `WHERE` clause
//! - `store`: SQLite table with CRUD, counting and CSV export

mod filter;
mod model;
mod store;

pub use filter::TicketFilter;
pub use model::{
    CARD_ID_LEN, DiscountClass, Ticket, TicketClass, TicketForm, generate_card_id, price_for,
    valid_until,
};
pub use store::{COLUMN_HEADERS, TicketStore};

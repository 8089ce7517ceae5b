use super::filter::TicketFilter;
use super::model::{DiscountClass, Ticket, TicketClass, TicketForm, generate_card_id};
use crate::error::{DeskError, DeskResult};
use chrono::NaiveDate;
use rand::Rng;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use std::path::Path;
use tracing::{debug, info};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tickets (
        card_id TEXT PRIMARY KEY,
        customer_name TEXT NOT NULL,
        ticket_type TEXT NOT NULL,
        discount_type TEXT NOT NULL,
        valid_from DATE NOT NULL,
        valid_to DATE NOT NULL,
        price FLOAT NOT NULL
    )";

const SELECT_COLUMNS: &str = "SELECT card_id, customer_name, ticket_type, discount_type,
                                     valid_from, valid_to, price
                              FROM tickets";

/// Column headers used for display and CSV export
pub const COLUMN_HEADERS: [&str; 7] = [
    "Card ID",
    "Customer name",
    "Ticket type",
    "Discount type",
    "Valid from",
    "Valid to",
    "Price",
];

/// SQLite-backed ticket table
pub struct TicketStore {
    conn: Connection,
}

impl TicketStore {
    /// Open (or create) the database file and ensure the table exists
    pub fn open(path: impl AsRef<Path>) -> DeskResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened ticket database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> DeskResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> DeskResult<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        let store = Self { conn };
        let rewritten = store.normalize_labels()?;
        if rewritten > 0 {
            info!(rewritten, "rewrote legacy ticket labels");
        }
        Ok(store)
    }

    /// Rewrite recognised label spellings (legacy Polish, other casing) to the
    /// stored English labels so that filters match every row
    ///
    /// Unrecognised values are left alone and fail when read.
    fn normalize_labels(&self) -> DeskResult<usize> {
        let classes = self.normalize_column("ticket_type", |value| {
            value.parse::<TicketClass>().ok().map(TicketClass::label)
        })?;
        let discounts = self.normalize_column("discount_type", |value| {
            value.parse::<DiscountClass>().ok().map(DiscountClass::label)
        })?;
        Ok(classes + discounts)
    }

    fn normalize_column(
        &self,
        column: &str,
        canonical: impl Fn(&str) -> Option<&'static str>,
    ) -> DeskResult<usize> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT DISTINCT {column} FROM tickets"))?;
        let stored = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut rewritten = 0;
        for value in stored {
            if let Some(label) = canonical(&value)
                && label != value
            {
                rewritten += self.conn.execute(
                    &format!("UPDATE tickets SET {column} = ?1 WHERE {column} = ?2"),
                    params![label, value],
                )?;
            }
        }
        Ok(rewritten)
    }

    pub fn insert(&self, ticket: &Ticket) -> DeskResult<()> {
        self.conn.execute(
            "INSERT INTO tickets (card_id, customer_name, ticket_type, discount_type,
                                  valid_from, valid_to, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                ticket.card_id,
                ticket.customer_name,
                ticket.class.label(),
                ticket.discount.label(),
                ticket.valid_from,
                ticket.valid_to,
                ticket.price,
            ],
        )?;
        info!(card_id = %ticket.card_id, "inserted ticket");
        Ok(())
    }

    /// Overwrite every column of the ticket with the same card id
    pub fn update(&self, ticket: &Ticket) -> DeskResult<()> {
        let changed = self.conn.execute(
            "UPDATE tickets
             SET customer_name = ?1, ticket_type = ?2, discount_type = ?3,
                 valid_from = ?4, valid_to = ?5, price = ?6
             WHERE card_id = ?7",
            params![
                ticket.customer_name,
                ticket.class.label(),
                ticket.discount.label(),
                ticket.valid_from,
                ticket.valid_to,
                ticket.price,
                ticket.card_id,
            ],
        )?;
        if changed == 0 {
            return Err(DeskError::UnknownTicket(ticket.card_id.clone()));
        }
        info!(card_id = %ticket.card_id, "updated ticket");
        Ok(())
    }

    pub fn delete(&self, card_id: &str) -> DeskResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tickets WHERE card_id = ?1", params![card_id])?;
        if changed == 0 {
            return Err(DeskError::UnknownTicket(card_id.to_string()));
        }
        info!(card_id, "deleted ticket");
        Ok(())
    }

    pub fn get(&self, card_id: &str) -> DeskResult<Option<Ticket>> {
        let sql = format!("{} WHERE card_id = ?1", SELECT_COLUMNS);
        let ticket = self
            .conn
            .query_row(&sql, params![card_id], ticket_from_row)
            .optional()?;
        Ok(ticket)
    }

    /// Tickets matching `filter`, in insertion order
    pub fn list(&self, filter: &TicketFilter) -> DeskResult<Vec<Ticket>> {
        let (sql, values) = match filter.where_clause() {
            Some((clause, values)) => (
                format!("{} WHERE {} ORDER BY rowid", SELECT_COLUMNS, clause),
                values,
            ),
            None => (format!("{} ORDER BY rowid", SELECT_COLUMNS), Vec::new()),
        };
        debug!(%sql, "listing tickets");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), ticket_from_row)?;
        let tickets = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(tickets)
    }

    pub fn count(&self, filter: &TicketFilter) -> DeskResult<usize> {
        let (sql, values) = match filter.where_clause() {
            Some((clause, values)) => (
                format!("SELECT COUNT(*) FROM tickets WHERE {}", clause),
                values,
            ),
            None => ("SELECT COUNT(*) FROM tickets".to_string(), Vec::new()),
        };
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Generate a card id not yet present in the table
    pub fn fresh_card_id<R: Rng + ?Sized>(&self, rng: &mut R) -> DeskResult<String> {
        loop {
            let card_id = generate_card_id(rng);
            if self.get(&card_id)?.is_none() {
                return Ok(card_id);
            }
            debug!(%card_id, "generated card id already taken, retrying");
        }
    }

    /// Write the filtered tickets as CSV, header row first
    ///
    /// Returns the number of exported rows.
    pub fn export_csv(&self, path: impl AsRef<Path>, filter: &TicketFilter) -> DeskResult<usize> {
        let path = path.as_ref();
        let tickets = self.list(filter)?;

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(COLUMN_HEADERS)?;
        for ticket in &tickets {
            writer.write_record(&[
                ticket.card_id.clone(),
                ticket.customer_name.clone(),
                ticket.class.label().to_string(),
                ticket.discount.label().to_string(),
                ticket.valid_from.format("%Y-%m-%d").to_string(),
                ticket.valid_to.format("%Y-%m-%d").to_string(),
                format!("{:.2}", ticket.price),
            ])?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = tickets.len(), "exported tickets");
        Ok(tickets.len())
    }

    /// Insert a fixed set of sample tickets (current, expired and future)
    ///
    /// Card ids already present are skipped. Returns the number of inserted rows.
    pub fn seed_demo_data(&mut self) -> DeskResult<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        for (card_id, name, class, discount, from) in DEMO_TICKETS {
            let valid_from = NaiveDate::parse_from_str(from, "%Y-%m-%d")
                .map_err(|e| DeskError::invalid(format!("bad demo date '{}': {}", from, e)))?;
            let ticket = TicketForm {
                customer_name: name.to_string(),
                class,
                discount,
                valid_from,
                price: None,
            }
            .into_ticket(card_id.to_string())?;

            inserted += tx.execute(
                "INSERT OR IGNORE INTO tickets (card_id, customer_name, ticket_type, discount_type,
                                                valid_from, valid_to, price)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    ticket.card_id,
                    ticket.customer_name,
                    ticket.class.label(),
                    ticket.discount.label(),
                    ticket.valid_from,
                    ticket.valid_to,
                    ticket.price,
                ],
            )?;
        }
        tx.commit()?;
        info!(inserted, "seeded demo tickets");
        Ok(inserted)
    }
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let class: String = row.get(2)?;
    let discount: String = row.get(3)?;
    Ok(Ticket {
        card_id: row.get(0)?,
        customer_name: row.get(1)?,
        class: class
            .parse::<TicketClass>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?,
        discount: discount
            .parse::<DiscountClass>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?,
        valid_from: row.get(4)?,
        valid_to: row.get(5)?,
        price: row.get(6)?,
    })
}

const DEMO_TICKETS: [(&str, &str, TicketClass, DiscountClass, &str); 21] = [
    ("1111222233334444", "Jan Kowalski", TicketClass::Monthly, DiscountClass::Normal, "2024-03-01"),
    ("2222333344445555", "Anna Nowak", TicketClass::Monthly, DiscountClass::Reduced, "2024-03-01"),
    ("3333444455556666", "Piotr Wiśniewski", TicketClass::NinetyDay, DiscountClass::Normal, "2024-02-01"),
    ("4444555566667777", "Maria Kowalczyk", TicketClass::HalfYear, DiscountClass::Reduced, "2024-01-01"),
    ("5555666677778888", "Adam Nowicki", TicketClass::Monthly, DiscountClass::Normal, "2024-01-01"),
    ("6666777788889999", "Ewa Kaczmarek", TicketClass::NinetyDay, DiscountClass::Reduced, "2023-12-01"),
    ("7777888899990000", "Tomasz Lewandowski", TicketClass::Yearly, DiscountClass::Normal, "2024-04-01"),
    ("8888999900001111", "Katarzyna Zielińska", TicketClass::HalfYear, DiscountClass::Normal, "2024-04-01"),
    ("9999000011112222", "Marcin Szymański", TicketClass::Monthly, DiscountClass::Reduced, "2024-03-15"),
    ("0000111122223333", "Alicja Dąbrowska", TicketClass::NinetyDay, DiscountClass::Normal, "2024-03-01"),
    ("1111222233334445", "Robert Wójcik", TicketClass::Yearly, DiscountClass::Reduced, "2024-03-01"),
    ("3333444455556667", "Krzysztof Jasiński", TicketClass::Monthly, DiscountClass::Normal, "2024-03-01"),
    ("4444555566667778", "Karolina Zając", TicketClass::Monthly, DiscountClass::Reduced, "2024-03-01"),
    ("5555666677778889", "Wojciech Kowalczyk", TicketClass::NinetyDay, DiscountClass::Normal, "2024-02-01"),
    ("6666777788889990", "Klaudia Wiśniewska", TicketClass::HalfYear, DiscountClass::Reduced, "2024-01-01"),
    ("7777888899990001", "Michał Nowak", TicketClass::Monthly, DiscountClass::Normal, "2024-01-01"),
    ("8888999900001112", "Kamila Kowalczyk", TicketClass::NinetyDay, DiscountClass::Reduced, "2023-12-01"),
    ("9999000011112223", "Kamil Nowicki", TicketClass::Yearly, DiscountClass::Normal, "2024-04-01"),
    ("0000111122223334", "Klaudia Kaczmarek", TicketClass::HalfYear, DiscountClass::Normal, "2024-04-01"),
    ("1111222233334446", "Michał Lewandowski", TicketClass::Monthly, DiscountClass::Reduced, "2024-03-15"),
    ("2222333344445557", "Kamila Zielińska", TicketClass::NinetyDay, DiscountClass::Normal, "2024-03-01"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_idempotent() {
        let mut store = TicketStore::open_in_memory().unwrap();
        assert_eq!(store.seed_demo_data().unwrap(), DEMO_TICKETS.len());
        assert_eq!(store.seed_demo_data().unwrap(), 0);
        assert_eq!(store.count(&TicketFilter::all()).unwrap(), DEMO_TICKETS.len());
    }

    #[test]
    fn test_seeded_rows_follow_fare_table() {
        let mut store = TicketStore::open_in_memory().unwrap();
        store.seed_demo_data().unwrap();

        let ticket = store.get("4444555566667777").unwrap().unwrap();
        assert_eq!(ticket.class, TicketClass::HalfYear);
        assert_eq!(ticket.price, 300.0);
        assert_eq!(ticket.valid_to, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn test_legacy_labels_are_readable() {
        let store = TicketStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO tickets VALUES ('5555666677778889', 'Wojciech', '90-dniowy', 'Normalny',
                                             '2024-02-01', '2024-04-30', 320.0)",
                [],
            )
            .unwrap();

        let ticket = store.get("5555666677778889").unwrap().unwrap();
        assert_eq!(ticket.class, TicketClass::NinetyDay);
        assert_eq!(ticket.discount, DiscountClass::Normal);
    }

    #[test]
    fn test_legacy_labels_match_filters_after_normalize() {
        let store = TicketStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO tickets VALUES ('1111222233334444', 'Jan', 'Miesięczny', 'Normalny',
                                             '2024-03-01', '2024-03-31', 120.0)",
                [],
            )
            .unwrap();
        let monthly = TicketFilter {
            class: Some(TicketClass::Monthly),
            ..TicketFilter::all()
        };
        let normal = TicketFilter {
            discount: Some(DiscountClass::Normal),
            ..TicketFilter::all()
        };
        assert_eq!(store.count(&monthly).unwrap(), 0);

        assert_eq!(store.normalize_labels().unwrap(), 2);
        assert_eq!(store.count(&TicketFilter::all()).unwrap(), 1);
        assert_eq!(store.count(&monthly).unwrap(), 1);
        assert_eq!(store.count(&normal).unwrap(), 1);
        assert_eq!(store.normalize_labels().unwrap(), 0);
    }

    #[test]
    fn test_normalize_leaves_unknown_labels() {
        let store = TicketStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO tickets VALUES ('1', 'X', 'Weekly', 'ulgowy', '2024-02-01', '2024-02-08', 10.0)",
                [],
            )
            .unwrap();
        assert_eq!(store.normalize_labels().unwrap(), 1);
        let ticket_type: String = store
            .conn
            .query_row("SELECT ticket_type FROM tickets WHERE card_id = '1'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(ticket_type, "Weekly");
    }

    #[test]
    fn test_unknown_label_is_error() {
        let store = TicketStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO tickets VALUES ('1', 'X', 'Weekly', 'Normal', '2024-02-01', '2024-02-08', 10.0)",
                [],
            )
            .unwrap();
        assert!(store.get("1").is_err());
    }
}

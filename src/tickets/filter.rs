use super::model::{DiscountClass, TicketClass};
use chrono::NaiveDate;

/// View filter over the ticket table
///
/// Each set field adds one condition; conditions are joined with `AND`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub class: Option<TicketClass>,
    pub discount: Option<DiscountClass>,
    /// Keep only tickets valid on this day
    pub valid_on: Option<NaiveDate>,
}

impl TicketFilter {
    /// Filter showing every ticket
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.discount.is_none() && self.valid_on.is_none()
    }

    /// SQL condition and its positional parameters
    ///
    /// Returns `None` when nothing is filtered. The condition contains only
    /// column names and `?` placeholders.
    pub fn where_clause(&self) -> Option<(String, Vec<String>)> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(class) = self.class {
            conditions.push("ticket_type = ?");
            params.push(class.label().to_string());
        }

        if let Some(discount) = self.discount {
            conditions.push("discount_type = ?");
            params.push(discount.label().to_string());
        }

        if let Some(day) = self.valid_on {
            let day = day.format("%Y-%m-%d").to_string();
            conditions.push("valid_from <= ? AND valid_to >= ?");
            params.push(day.clone());
            params.push(day);
        }

        if conditions.is_empty() {
            None
        } else {
            Some((conditions.join(" AND "), params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_clause() {
        let filter = TicketFilter::all();
        assert!(filter.is_empty());
        assert_eq!(filter.where_clause(), None);
    }

    #[test]
    fn test_single_condition() {
        let filter = TicketFilter {
            discount: Some(DiscountClass::Reduced),
            ..Default::default()
        };
        let (clause, params) = filter.where_clause().unwrap();
        assert_eq!(clause, "discount_type = ?");
        assert_eq!(params, vec!["Reduced"]);
    }

    #[test]
    fn test_conditions_joined_with_and() {
        let filter = TicketFilter {
            class: Some(TicketClass::Monthly),
            discount: Some(DiscountClass::Normal),
            valid_on: NaiveDate::from_ymd_opt(2024, 3, 15),
        };
        let (clause, params) = filter.where_clause().unwrap();
        assert_eq!(
            clause,
            "ticket_type = ? AND discount_type = ? AND valid_from <= ? AND valid_to >= ?"
        );
        assert_eq!(params, vec!["Monthly", "Normal", "2024-03-15", "2024-03-15"]);
    }
}

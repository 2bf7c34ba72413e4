//! Predicate construction for listing queries
//!
//! Only known columns may be filtered on, and string values destined for a
//! pattern match have their wildcard characters escaped.

use crate::{StorageError, StorageResult};
use haven_interfaces::{FilterOp, FilterValue, Predicate};

const MAX_VALUE_LEN: usize = 200;

/// Builds the predicate list for one table
pub struct ListingFilterBuilder {
    predicates: Vec<Predicate>,
    allowed_columns: &'static [&'static str],
}

impl ListingFilterBuilder {
    pub fn new(allowed_columns: &'static [&'static str]) -> Self {
        Self {
            predicates: Vec::new(),
            allowed_columns,
        }
    }

    /// Exact match; `None` adds nothing
    pub fn equals(mut self, column: &str, value: Option<impl Into<FilterValue>>) -> StorageResult<Self> {
        if let Some(value) = value {
            self.add(column, FilterOp::Eq, value.into())?;
        }
        Ok(self)
    }

    /// Inclusive range; either bound may be absent
    pub fn between(mut self, column: &str, min: Option<f64>, max: Option<f64>) -> StorageResult<Self> {
        if let Some(min) = min {
            self.add(column, FilterOp::Gte, FilterValue::Number(min))?;
        }
        if let Some(max) = max {
            self.add(column, FilterOp::Lte, FilterValue::Number(max))?;
        }
        Ok(self)
    }

    pub fn at_least(self, column: &str, min: Option<f64>) -> StorageResult<Self> {
        self.between(column, min, None)
    }

    /// Case-insensitive substring match, `%value%`
    ///
    /// The length limit applies to `value` itself, before escaping and padding.
    pub fn contains(mut self, column: &str, value: Option<&str>) -> StorageResult<Self> {
        if let Some(value) = value {
            check_length(value)?;
            let pattern = format!("%{}%", escape_like(value));
            self.push(column, FilterOp::ILike, FilterValue::Text(pattern))?;
        }
        Ok(self)
    }

    pub fn build(self) -> Vec<Predicate> {
        self.predicates
    }

    fn add(&mut self, column: &str, op: FilterOp, value: FilterValue) -> StorageResult<()> {
        if let FilterValue::Text(s) = &value {
            check_length(s)?;
        }
        self.push(column, op, value)
    }

    fn push(&mut self, column: &str, op: FilterOp, value: FilterValue) -> StorageResult<()> {
        if !self.allowed_columns.contains(&column) {
            return Err(StorageError::ValidationFailed(format!(
                "Column '{}' is not allowed for filtering",
                column
            )));
        }

        self.predicates.push(Predicate::new(column, op, value));
        Ok(())
    }
}

fn check_length(value: &str) -> StorageResult<()> {
    if value.chars().count() > MAX_VALUE_LEN {
        return Err(StorageError::ValidationFailed(format!(
            "Filter value too long (max: {} characters)",
            MAX_VALUE_LEN
        )));
    }
    Ok(())
}

/// Escape LIKE metacharacters so user input matches literally
pub fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["city", "monthly_rent", "internet_speed", "has_reception"];

    #[test]
    fn test_absent_values_add_nothing() {
        let predicates = ListingFilterBuilder::new(COLUMNS)
            .equals("city", None::<String>)
            .unwrap()
            .between("monthly_rent", None, None)
            .unwrap()
            .contains("internet_speed", None)
            .unwrap()
            .build();

        assert!(predicates.is_empty());
    }

    #[test]
    fn test_range_and_exact() {
        let predicates = ListingFilterBuilder::new(COLUMNS)
            .equals("city", Some("Atlanta"))
            .unwrap()
            .between("monthly_rent", Some(1000.0), Some(2500.0))
            .unwrap()
            .equals("has_reception", Some(false))
            .unwrap()
            .build();

        assert_eq!(predicates.len(), 4);
        assert_eq!(predicates[1].op, FilterOp::Gte);
        assert_eq!(predicates[2].op, FilterOp::Lte);
        assert_eq!(predicates[3].value, FilterValue::Bool(false));
    }

    #[test]
    fn test_contains_escapes_wildcards() {
        let predicates = ListingFilterBuilder::new(COLUMNS)
            .contains("internet_speed", Some("100%_fiber"))
            .unwrap()
            .build();

        assert_eq!(predicates[0].op, FilterOp::ILike);
        assert_eq!(predicates[0].value, FilterValue::Text("%100\\%\\_fiber%".to_string()));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let result = ListingFilterBuilder::new(COLUMNS).equals("password", Some("x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_length_limit_applies_before_padding() {
        let at_limit = "%".repeat(MAX_VALUE_LEN);
        assert!(ListingFilterBuilder::new(COLUMNS)
            .contains("internet_speed", Some(at_limit.as_str()))
            .is_ok());

        let over_limit = "a".repeat(MAX_VALUE_LEN + 1);
        assert!(ListingFilterBuilder::new(COLUMNS)
            .contains("internet_speed", Some(over_limit.as_str()))
            .is_err());
        assert!(ListingFilterBuilder::new(COLUMNS)
            .equals("city", Some(over_limit.as_str()))
            .is_err());
    }
}

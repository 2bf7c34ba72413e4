//! Query parameter validation
//!
//! [`QueryValidator`] reads typed values out of the raw query map, applying
//! defaults and bounds. Problems are collected per field rather than failing
//! on the first one, and reported as
//! `{ "formErrors": [...], "fieldErrors": { field: [messages] } }`.
//!
//! ```
//! use std::collections::HashMap;
//! use haven_web::QueryValidator;
//!
//! let raw = HashMap::from([("limit".to_string(), "8".to_string())]);
//! let mut v = QueryValidator::new(&raw);
//! let limit = v.bounded_int("limit", 1, 50, 10);
//! let page = v.bounded_int("page", 1, u32::MAX, 1);
//! let (limit, page) = v.finish((limit, page)).unwrap();
//! assert_eq!((limit, page), (8, 1));
//! ```

use haven_api_types::ListingId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::errors::WebError;

pub const INVALID_QUERY: &str = "Invalid query parameters";
pub const INVALID_ID: &str = "Invalid property ID format";

/// Longest accepted free-text filter value, in characters
pub const MAX_TEXT_LEN: usize = 100;

/// Field-level validation failures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Reads and checks parameters from a raw query map
pub struct QueryValidator<'a> {
    params: &'a HashMap<String, String>,
    errors: FieldErrors,
}

impl<'a> QueryValidator<'a> {
    pub fn new(params: &'a HashMap<String, String>) -> Self {
        Self {
            params,
            errors: FieldErrors::default(),
        }
    }

    /// Present, non-blank value of a parameter
    fn raw(&self, name: &str) -> Option<&'a str> {
        self.params
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Free-text value of at most [`MAX_TEXT_LEN`] characters
    pub fn optional_string(&mut self, name: &str) -> Option<String> {
        let raw = self.raw(name)?;
        if raw.chars().count() > MAX_TEXT_LEN {
            self.errors.add(
                name,
                format!("String must contain at most {MAX_TEXT_LEN} character(s)"),
            );
            return None;
        }
        Some(raw.to_string())
    }

    /// Finite number, or a field error
    pub fn optional_number(&mut self, name: &str) -> Option<f64> {
        let raw = self.raw(name)?;
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                self.errors.add(name, "Expected number, received nan");
                None
            }
        }
    }

    /// Number strictly greater than zero
    pub fn optional_positive(&mut self, name: &str) -> Option<f64> {
        let n = self.optional_number(name)?;
        if n > 0.0 {
            Some(n)
        } else {
            self.errors.add(name, "Number must be greater than 0");
            None
        }
    }

    /// Whole number of at least `min`
    pub fn optional_int_at_least(&mut self, name: &str, min: i64) -> Option<i64> {
        let n = self.optional_number(name)?;
        if n.fract() != 0.0 {
            self.errors.add(name, "Expected integer, received float");
            return None;
        }
        if n < min as f64 {
            self.errors
                .add(name, format!("Number must be greater than or equal to {min}"));
            return None;
        }
        Some(n as i64)
    }

    /// Whole number within `[min, max]`, `default` when absent
    ///
    /// On error the default is returned so validation can continue; the
    /// collected error still fails [`QueryValidator::finish`].
    pub fn bounded_int(&mut self, name: &str, min: u32, max: u32, default: u32) -> u32 {
        let Some(n) = self.optional_int_at_least(name, i64::from(min)) else {
            return default;
        };
        if n > i64::from(max) {
            self.errors
                .add(name, format!("Number must be less than or equal to {max}"));
            return default;
        }
        n as u32
    }

    /// Non-negative offset, `default` when absent
    pub fn offset(&mut self, name: &str, default: u64) -> u64 {
        self.optional_int_at_least(name, 0)
            .map(|n| n as u64)
            .unwrap_or(default)
    }

    /// `true` or `false`; anything else is a field error
    pub fn optional_bool(&mut self, name: &str) -> Option<bool> {
        match self.raw(name)? {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                self.errors.add(
                    name,
                    format!("Invalid enum value. Expected 'true' | 'false', received '{other}'"),
                );
                None
            }
        }
    }

    /// Record an error against `field` unless `condition` holds
    pub fn ensure(&mut self, condition: bool, field: &str, message: &str) {
        if !condition {
            self.errors.add(field, message);
        }
    }

    /// `min <= max` when both bounds are present
    pub fn ensure_ordered<T: PartialOrd>(&mut self, min: Option<T>, max: Option<T>, min_field: &str, max_field: &str) {
        if let (Some(min), Some(max)) = (min, max) {
            self.ensure(
                min <= max,
                min_field,
                &format!("{min_field} must be less than or equal to {max_field}"),
            );
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The validated value, or `VALIDATION_ERROR` with every collected problem
    pub fn finish<T>(self, value: T) -> Result<T, WebError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(WebError::validation(INVALID_QUERY, self.errors))
        }
    }
}

/// Parse a listing id path parameter
pub fn validate_listing_id(raw: &str) -> Result<ListingId, WebError> {
    ListingId::parse(raw).map_err(|_| invalid_listing_id())
}

pub fn invalid_listing_id() -> WebError {
    let mut errors = FieldErrors::default();
    errors.add("id", INVALID_ID);
    WebError::validation(INVALID_ID, errors)
}

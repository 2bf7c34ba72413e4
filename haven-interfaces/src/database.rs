//! Remote data store interface
//!
//! Listings live in a hosted tabular store. Repositories describe what they
//! want as a [`TableQuery`] and a [`DataSource`] turns that into whatever the
//! backing store understands.

use async_trait::async_trait;
use haven_api_types::{ListingId, ListingTable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Query failed ({code}): {message}")]
    Query { code: String, message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Failed to decode row: {message}")]
    Decode { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(err: serde_json::Error) -> Self {
        DatabaseError::Decode {
            message: err.to_string(),
        }
    }
}

/// Comparison applied by a [`Predicate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
    /// Case-insensitive pattern match; `%` matches any run of characters
    ILike,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
            FilterOp::Lte => "lte",
            FilterOp::ILike => "ilike",
        }
    }
}

/// Right-hand side of a predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// A single `column op value` condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

impl Predicate {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    /// Newest rows first
    pub fn newest_first() -> Self {
        Self {
            column: "created_at".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// A read against one table
///
/// Predicates are combined with AND. `offset`/`limit` select the inclusive
/// row range `[offset, offset + limit - 1]` after ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    pub table: ListingTable,
    pub predicates: Vec<Predicate>,
    pub order: Option<OrderBy>,
    pub offset: u64,
    pub limit: Option<u32>,
    /// Request the exact number of matching rows alongside the data
    pub count_exact: bool,
}

impl TableQuery {
    pub fn new(table: ListingTable) -> Self {
        Self {
            table,
            predicates: Vec::new(),
            order: None,
            offset: 0,
            limit: None,
            count_exact: false,
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    pub fn range(mut self, offset: u64, limit: u32) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_exact_count(mut self) -> Self {
        self.count_exact = true;
        self
    }
}

/// Rows returned by a [`TableQuery`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Value>,
    /// Present when the query asked for an exact count
    pub total: Option<u64>,
}

/// Hosted tabular store
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Run a filtered, ordered, ranged read
    async fn execute(&self, query: TableQuery) -> Result<QueryResult, DatabaseError>;

    /// Fetch the single row whose `id` matches
    ///
    /// Returns [`DatabaseError::NotFound`] when no row matches.
    async fn fetch_by_id(&self, table: ListingTable, id: &ListingId) -> Result<Value, DatabaseError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

//! In-process data source
//!
//! Holds listing rows as JSON and evaluates [`TableQuery`]s against them with
//! the same semantics as the hosted store: AND-combined predicates, ordering,
//! inclusive row ranges and exact counts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use haven_api_types::{ListingId, ListingTable};
use haven_interfaces::{
    DataSource, DatabaseError, FilterOp, FilterValue, OrderBy, Predicate, QueryResult, SortDirection, TableQuery,
};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryDataSource {
    tables: RwLock<HashMap<ListingTable, Vec<Value>>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data source pre-loaded with the development fixtures
    pub fn seeded() -> Self {
        let mut tables = HashMap::new();
        tables.insert(ListingTable::RentalListings, crate::fixtures::rental_rows());
        tables.insert(ListingTable::OfficeListings, crate::fixtures::office_rows());
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn insert(&self, table: ListingTable, row: Value) {
        self.tables.write().await.entry(table).or_default().push(row);
    }

    pub async fn insert_many(&self, table: ListingTable, rows: impl IntoIterator<Item = Value>) {
        self.tables.write().await.entry(table).or_default().extend(rows);
    }

    pub async fn row_count(&self, table: ListingTable) -> usize {
        self.tables.read().await.get(&table).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn execute(&self, query: TableQuery) -> Result<QueryResult, DatabaseError> {
        let matchers = query
            .predicates
            .iter()
            .map(Matcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matchers.iter().all(|m| m.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(tables);

        if let Some(order) = &query.order {
            sort_rows(&mut rows, order);
        }

        let total = rows.len() as u64;
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let page: Vec<Value> = match query.limit {
            Some(limit) => rows.into_iter().skip(offset).take(limit as usize).collect(),
            None => rows.into_iter().skip(offset).collect(),
        };

        Ok(QueryResult {
            rows: page,
            total: query.count_exact.then_some(total),
        })
    }

    async fn fetch_by_id(&self, table: ListingTable, id: &ListingId) -> Result<Value, DatabaseError> {
        let wanted = id.to_string();
        let tables = self.tables.read().await;

        tables
            .get(&table)
            .and_then(|rows| {
                rows.iter().find(|row| {
                    row.get("id")
                        .and_then(Value::as_str)
                        .is_some_and(|v| v.eq_ignore_ascii_case(&wanted))
                })
            })
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound {
                entity: table.to_string(),
                id: wanted,
            })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// A predicate prepared for repeated evaluation
enum Matcher<'a> {
    Compare {
        column: &'a str,
        op: FilterOp,
        value: &'a FilterValue,
    },
    Pattern {
        column: &'a str,
        regex: Regex,
    },
}

impl<'a> Matcher<'a> {
    fn compile(predicate: &'a Predicate) -> Result<Self, DatabaseError> {
        match (predicate.op, &predicate.value) {
            (FilterOp::ILike, FilterValue::Text(pattern)) => Ok(Matcher::Pattern {
                column: &predicate.column,
                regex: like_to_regex(pattern)?,
            }),
            (FilterOp::ILike, other) => Err(DatabaseError::Query {
                code: "22023".to_string(),
                message: format!("ilike requires a text pattern, got {other}"),
            }),
            (op, value) => Ok(Matcher::Compare {
                column: &predicate.column,
                op,
                value,
            }),
        }
    }

    fn matches(&self, row: &Value) -> bool {
        match self {
            Matcher::Pattern { column, regex } => row
                .get(*column)
                .and_then(Value::as_str)
                .is_some_and(|s| regex.is_match(s)),
            Matcher::Compare { column, op, value } => {
                let Some(cell) = row.get(*column) else {
                    return false;
                };
                match compare(cell, value) {
                    Some(ordering) => match op {
                        FilterOp::Eq => ordering == Ordering::Equal,
                        FilterOp::Gte => ordering != Ordering::Less,
                        FilterOp::Lte => ordering != Ordering::Greater,
                        FilterOp::ILike => false,
                    },
                    // NULL or mismatched types never match
                    None => false,
                }
            }
        }
    }
}

fn compare(cell: &Value, value: &FilterValue) -> Option<Ordering> {
    match (cell, value) {
        (Value::Number(n), FilterValue::Number(v)) => n.as_f64()?.partial_cmp(v),
        (Value::String(s), FilterValue::Text(v)) => Some(s.as_str().cmp(v.as_str())),
        (Value::Bool(b), FilterValue::Bool(v)) => Some(b.cmp(v)),
        _ => None,
    }
}

/// Translate a LIKE pattern (`%`, `_`, backslash escapes) into an anchored,
/// case-insensitive regex
fn like_to_regex(pattern: &str) -> Result<Regex, DatabaseError> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');

    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    expr.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            '%' => expr.push_str(".*"),
            '_' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');

    RegexBuilder::new(&expr)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| DatabaseError::Internal {
            message: format!("Invalid pattern '{pattern}': {e}"),
        })
}

fn sort_rows(rows: &mut [Value], order: &OrderBy) {
    rows.sort_by(|a, b| {
        let ordering = compare_cells(a.get(&order.column), b.get(&order.column));
        match order.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => {
            // Timestamps compare chronologically regardless of offset notation
            match (a.parse::<DateTime<Utc>>(), b.parse::<DateTime<Utc>>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

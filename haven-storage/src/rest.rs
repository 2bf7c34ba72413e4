//! Hosted store over its PostgREST interface
//!
//! Queries become `GET {url}/rest/v1/{table}?select=*&col=op.value&...`.
//! Exact counts are requested with `Prefer: count=exact` and read back from
//! the `Content-Range` header.

use async_trait::async_trait;
use haven_api_types::{ListingId, ListingTable};
use haven_config::BackendConfig;
use haven_interfaces::{
    DataSource, DatabaseError, FilterOp, FilterValue, Predicate, QueryResult, SortDirection, TableQuery,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::{StorageError, StorageResult};

/// PostgREST error code for "single row requested, none returned"
const NO_ROWS: &str = "PGRST116";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

pub struct RestDataSource {
    client: Client,
    rest_url: Url,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestDataSource {
    pub fn new(config: &BackendConfig) -> StorageResult<Self> {
        let rest_url = Url::parse(&format!("{}/rest/v1/", config.base_url()))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| StorageError::ConfigError(format!("anon_key is not a valid header value: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| StorageError::ConfigError(format!("anon_key is not a valid header value: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, rest_url })
    }

    /// Full request URL for a query
    pub fn query_url(&self, query: &TableQuery) -> StorageResult<Url> {
        let mut url = self.rest_url.join(query.table.as_str())?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");

            for predicate in &query.predicates {
                pairs.append_pair(&predicate.column, &predicate_value(predicate));
            }

            if let Some(order) = &query.order {
                let direction = match order.direction {
                    SortDirection::Asc => "asc",
                    SortDirection::Desc => "desc",
                };
                pairs.append_pair("order", &format!("{}.{}", order.column, direction));
            }

            if query.offset > 0 {
                pairs.append_pair("offset", &query.offset.to_string());
            }
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }

    async fn send(&self, url: Url, accept: &str, count_exact: bool) -> Result<Response, DatabaseError> {
        debug!(%url, "Querying hosted store");

        let mut request = self.client.get(url).header(ACCEPT, accept);
        if count_exact {
            request = request.header("Prefer", "count=exact");
        }

        request.send().await.map_err(|e| {
            error!("Hosted store request failed: {}", e);
            DatabaseError::Connection { message: e.to_string() }
        })
    }
}

/// `op.value` with LIKE wildcards in PostgREST's URL-safe `*` form
fn predicate_value(predicate: &Predicate) -> String {
    match (&predicate.op, &predicate.value) {
        (FilterOp::ILike, FilterValue::Text(pattern)) => {
            format!("{}.{}", predicate.op.as_str(), like_to_postgrest(pattern))
        }
        (op, value) => format!("{}.{}", op.as_str(), value),
    }
}

fn like_to_postgrest(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '%' => out.push('*'),
            other => out.push(other),
        }
    }
    out
}

/// Total from `Content-Range: 0-9/42` or `*/0`
pub fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

async fn error_from_response(response: Response) -> DatabaseError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let parsed: Option<PostgrestError> = serde_json::from_str(&body).ok();

    let code = parsed
        .as_ref()
        .and_then(|e| e.code.clone())
        .unwrap_or_else(|| status.as_u16().to_string());
    let message = parsed
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("Hosted store returned {status}"));

    DatabaseError::Query { code, message }
}

#[async_trait]
impl DataSource for RestDataSource {
    async fn execute(&self, query: TableQuery) -> Result<QueryResult, DatabaseError> {
        let url = self.query_url(&query)?;
        let response = self.send(url, "application/json", query.count_exact).await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!(table = %query.table, "Hosted store query failed: {}", err);
            return Err(err);
        }

        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        let rows: Vec<Value> = response.json().await.map_err(|e| DatabaseError::Decode {
            message: e.to_string(),
        })?;

        Ok(QueryResult {
            rows,
            total: if query.count_exact { total } else { None },
        })
    }

    async fn fetch_by_id(&self, table: ListingTable, id: &ListingId) -> Result<Value, DatabaseError> {
        let query = TableQuery::new(table).filter(Predicate::new("id", FilterOp::Eq, id.to_string()));
        let url = self.query_url(&query)?;
        let response = self.send(url, SINGLE_OBJECT, false).await?;

        if response.status().is_success() {
            return response.json().await.map_err(|e| DatabaseError::Decode {
                message: e.to_string(),
            });
        }

        let not_acceptable = response.status() == StatusCode::NOT_ACCEPTABLE;
        match error_from_response(response).await {
            DatabaseError::Query { code, .. } if code == NO_ROWS || (not_acceptable && code == "406") => {
                Err(DatabaseError::NotFound {
                    entity: table.to_string(),
                    id: id.to_string(),
                })
            }
            other => Err(other),
        }
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        let response = self.send(self.rest_url.clone(), "application/openapi+json", false).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(DatabaseError::Connection {
                message: format!("Hosted store health check returned {}", response.status()),
            })
        }
    }
}

//! HTTP client for the listing endpoints

use haven_api_types::{Envelope, ListingId, OfficeListing, RentalListing, ResponseMetadata};
use haven_interfaces::{OfficeFilters, RentalFilters};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::errors::ClientError;

/// One page of a listing search
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: Option<ResponseMetadata>,
    /// `filters.applied` as echoed by the office search
    pub applied_filters: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct HavenClient {
    client: Client,
    base_url: Url,
}

impl HavenClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list_properties(
        &self,
        filters: &RentalFilters,
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> Result<Page<RentalListing>, ClientError> {
        let mut query = query_pairs(filters)?;
        push_opt(&mut query, "limit", limit);
        push_opt(&mut query, "offset", offset);
        self.get_page("/api/properties", &query).await
    }

    pub async fn get_property(&self, id: &ListingId) -> Result<RentalListing, ClientError> {
        self.get_one(&format!("/api/properties/{id}")).await
    }

    pub async fn featured_properties(&self, limit: Option<u32>) -> Result<Vec<RentalListing>, ClientError> {
        let mut query = Vec::new();
        push_opt(&mut query, "limit", limit);
        Ok(self.get_page("/api/featured-properties", &query).await?.items)
    }

    pub async fn list_office_properties(
        &self,
        filters: &OfficeFilters,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Page<OfficeListing>, ClientError> {
        let mut query = query_pairs(filters)?;
        push_opt(&mut query, "page", page);
        push_opt(&mut query, "limit", limit);
        self.get_page("/api/office-properties", &query).await
    }

    pub async fn get_office_property(&self, id: &ListingId) -> Result<OfficeListing, ClientError> {
        self.get_one(&format!("/api/office-properties/{id}")).await
    }

    pub async fn featured_office_properties(&self, limit: Option<u32>) -> Result<Vec<OfficeListing>, ClientError> {
        let mut query = Vec::new();
        push_opt(&mut query, "limit", limit);
        Ok(self.get_page("/api/office-properties/featured", &query).await?.items)
    }

    /// Full URL for `path` with the given query parameters
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Page<T>, ClientError> {
        let envelope = self.fetch::<Vec<T>>(path, query).await?;
        Ok(Page {
            items: envelope.data.unwrap_or_default(),
            metadata: envelope.metadata,
            applied_filters: envelope.filters.and_then(|f| f.get("applied").cloned()),
        })
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let envelope = self.fetch::<T>(path, &[]).await?;
        envelope.data.ok_or(ClientError::EmptyResponse { status: 200 })
    }

    /// Send a GET and unpack the envelope; an `error` member always wins
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Envelope<T>, ClientError> {
        let url = self.url(path, query)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        if let Some(error) = envelope.error {
            return Err(ClientError::Api { status, error });
        }
        if !(200..300).contains(&status) || envelope.data.is_none() {
            return Err(ClientError::EmptyResponse { status });
        }
        Ok(envelope)
    }
}

fn push_opt<T: ToString>(query: &mut Vec<(String, String)>, name: &str, value: Option<T>) {
    if let Some(value) = value {
        query.push((name.to_string(), value.to_string()));
    }
}

/// Query parameters for a filter struct; absent fields are omitted
pub fn query_pairs<F: Serialize>(filters: &F) -> Result<Vec<(String, String)>, ClientError> {
    let Value::Object(fields) = serde_json::to_value(filters)? else {
        return Ok(Vec::new());
    };

    Ok(fields
        .into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                    _ => n.to_string(),
                },
                Value::Bool(b) => b.to_string(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((name, value))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_absent() {
        let filters = OfficeFilters {
            min_desks: Some(10),
            has_reception: Some(false),
            min_price: Some(1500.0),
            internet_speed: Some("1 Gbps".to_string()),
            ..Default::default()
        };

        let mut pairs = query_pairs(&filters).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("hasReception".to_string(), "false".to_string()),
                ("internetSpeed".to_string(), "1 Gbps".to_string()),
                ("minDesks".to_string(), "10".to_string()),
                ("minPrice".to_string(), "1500".to_string()),
            ]
        );
    }

    #[test]
    fn test_url_encodes_query() {
        let client = HavenClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        let url = client
            .url(
                "/api/office-properties",
                &[("internetSpeed".to_string(), "1 Gbps".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/office-properties?internetSpeed=1+Gbps"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HavenClient::new(&ClientConfig::new("not a url"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}

//! The `{ data, error, metadata }` response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;
use crate::pagination::PaginationMeta;

/// Optional metadata attached to successful responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl ResponseMetadata {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Page, limit and total only
    pub fn page_summary(meta: &PaginationMeta) -> Self {
        Self {
            page: Some(meta.page),
            limit: Some(meta.limit),
            total: Some(meta.total),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<PaginationMeta> for ResponseMetadata {
    fn from(meta: PaginationMeta) -> Self {
        Self {
            page: Some(meta.page),
            limit: Some(meta.limit),
            total: Some(meta.total),
            total_pages: Some(meta.total_pages),
            has_more: Some(meta.has_more),
        }
    }
}

/// Standard response body for every endpoint
///
/// Exactly one of `data` and `error` is non-null. Both are always present in
/// the serialized form; `metadata` and `filters` are omitted when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            metadata: None,
            filters: None,
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
            metadata: None,
            filters: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ResponseMetadata) -> Self {
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }

    /// Attach the filters that were applied, as `{ "applied": ... }`
    pub fn with_applied_filters(mut self, applied: Value) -> Self {
        self.filters = Some(serde_json::json!({ "applied": applied }));
        self
    }

    /// Split into the payload or the carried error
    pub fn into_result(self) -> Result<(T, Option<ResponseMetadata>), ApiError> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok((data, self.metadata)),
            (None, None) => Err(ApiError::internal()),
        }
    }
}

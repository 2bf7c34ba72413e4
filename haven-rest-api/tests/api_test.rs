//! Endpoint behaviour over the seeded in-memory store

use async_trait::async_trait;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use haven_api_types::{ListingId, ListingTable};
use haven_config::AuthConfig;
use haven_interfaces::{AuthError, DataSource, DatabaseError, QueryResult, TableQuery};
use haven_rest_api::{create_rest_app, AppConfig, AppContext};
use haven_storage::testing::{sample_session, sample_user, MockDataSourceImpl, MockIdentityProviderImpl};
use haven_storage::{fixtures, DataSourceRepositoryFactory, InMemoryDataSource};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

fn server_with(identity: MockIdentityProviderImpl) -> TestServer {
    let repositories = Arc::new(DataSourceRepositoryFactory::new(Arc::new(InMemoryDataSource::seeded())));
    let context = AppContext::new(repositories, Arc::new(identity), AuthConfig::default());
    TestServer::new(create_rest_app(context, AppConfig::default())).unwrap()
}

fn server() -> TestServer {
    server_with(MockIdentityProviderImpl::new())
}

fn failing_server(expose_error_details: bool) -> TestServer {
    let mut source = MockDataSourceImpl::new();
    source.expect_execute().returning(|_| {
        Err(DatabaseError::Connection {
            message: "connection reset by peer".to_string(),
        })
    });
    source.expect_health_check().returning(|| {
        Err(DatabaseError::Connection {
            message: "connection reset by peer".to_string(),
        })
    });

    let repositories = Arc::new(DataSourceRepositoryFactory::new(Arc::new(source)));
    let context = AppContext::new(
        repositories,
        Arc::new(MockIdentityProviderImpl::new()),
        AuthConfig::default(),
    );
    let config = AppConfig {
        expose_error_details,
        ..Default::default()
    };
    TestServer::new(create_rest_app(context, config)).unwrap()
}

#[tokio::test]
async fn test_list_properties_envelope() {
    let response = server().get("/api/properties").add_query_param("limit", "5").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["metadata"]["page"], 1);
    assert_eq!(body["metadata"]["limit"], 5);
    assert_eq!(body["metadata"]["total"], 16);
    assert!(body["metadata"].get("totalPages").is_none());
}

#[tokio::test]
async fn test_list_properties_offset_reports_page() {
    let response = server()
        .get("/api/properties")
        .add_query_param("limit", "5")
        .add_query_param("offset", "10")
        .await;

    let body: Value = response.json();
    assert_eq!(body["metadata"]["page"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_list_properties_price_order_rejected() {
    let response = server()
        .get("/api/properties")
        .add_query_param("minPrice", "3000")
        .add_query_param("maxPrice", "1000")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Invalid query parameters");
    assert_eq!(
        body["error"]["details"]["fieldErrors"]["minPrice"][0],
        "minPrice must be less than or equal to maxPrice"
    );
}

#[tokio::test]
async fn test_list_properties_filters_by_city() {
    let response = server().get("/api/properties").add_query_param("city", "Denver").await;
    let body: Value = response.json();

    let listings = body["data"].as_array().unwrap();
    assert!(!listings.is_empty());
    assert!(listings.iter().all(|l| l["city"] == "Denver"));
}

#[tokio::test]
async fn test_get_property() {
    let id = fixtures::rental_id(3).to_string();
    let response = server().get(&format!("/api/properties/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], id);
    assert!(body.get("metadata").is_none());
}

#[tokio::test]
async fn test_get_property_bad_id_is_validation_error() {
    let response = server().get("/api/properties/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Invalid property ID format");
}

#[tokio::test]
async fn test_get_property_unknown_id() {
    let response = server()
        .get("/api/properties/3f2b8c1e-9d4a-4b7e-8f00-1a2b3c4d5e6f")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Property not found");
}

#[tokio::test]
async fn test_featured_properties_limits() {
    let server = server();

    let body: Value = server.get("/api/featured-properties").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["metadata"], serde_json::json!({"limit": 4}));

    let response = server.get("/api/featured-properties").add_query_param("limit", "100").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"]["details"]["fieldErrors"]["limit"][0],
        "Number must be less than or equal to 10"
    );
}

#[tokio::test]
async fn test_office_search_echoes_applied_filters() {
    let response = server()
        .get("/api/office-properties")
        .add_query_param("hasReception", "true")
        .add_query_param("city", "Austin")
        .add_query_param("limit", "50")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let listings = body["data"].as_array().unwrap();
    assert!(!listings.is_empty());
    assert!(listings
        .iter()
        .all(|l| l["has_reception"] == true && l["city"] == "Austin"));

    assert_eq!(
        body["filters"]["applied"],
        serde_json::json!({"hasReception": true, "city": "Austin"})
    );
    assert_eq!(body["metadata"]["page"], 1);
    assert_eq!(body["metadata"]["totalPages"], 1);
    assert_eq!(body["metadata"]["hasMore"], false);
}

#[tokio::test]
async fn test_office_search_invalid_reception_flag() {
    let response = server()
        .get("/api/office-properties")
        .add_query_param("hasReception", "maybe")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_featured_offices_use_envelope() {
    let response = server().get("/api/office-properties/featured").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let listings = body["data"].as_array().unwrap();
    assert_eq!(listings.len(), 4);
    // Seed rows are created in index order
    assert_eq!(listings[0]["id"], fixtures::office_id(23).to_string());
}

#[tokio::test]
async fn test_get_office_property() {
    let id = fixtures::office_id(5).to_string();
    let body: Value = server().get(&format!("/api/office-properties/{id}")).await.json();
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn test_database_failure_is_database_error() {
    let response = failing_server(false).get("/api/properties").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "Failed to query properties");
}

#[tokio::test]
async fn test_readiness_reports_data_source() {
    assert_eq!(server().get("/ready").await.status_code(), StatusCode::OK);
    assert_eq!(
        failing_server(false).get("/ready").await.status_code(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(server().get("/health").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let response = server().get("/api/agents").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_account_requires_session() {
    let response = server().get("/api/account").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_account_with_session() {
    let mut identity = MockIdentityProviderImpl::new();
    identity
        .expect_get_user()
        .returning(|_| Ok(sample_user("user-42")));

    let response = server_with(identity)
        .get("/api/account")
        .add_header(header::COOKIE, HeaderValue::from_static("sb-access-token=access-42"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], "user-42");
}

#[tokio::test]
async fn test_account_page_redirects_to_login() {
    let response = server().get("/account").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_auth_callback_sets_cookies_and_redirects() {
    let mut identity = MockIdentityProviderImpl::new();
    identity
        .expect_exchange_code_for_session()
        .withf(|code| code == "abc123")
        .times(1)
        .returning(|_| Ok(sample_session("user-1", "new")));

    let response = server_with(identity)
        .get("/auth/callback")
        .add_query_param("code", "abc123")
        .add_query_param("next", "/saved-homes")
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/saved-homes");

    let cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("sb-access-token=access-new;"));
}

#[tokio::test]
async fn test_auth_callback_rejects_offsite_next() {
    let mut identity = MockIdentityProviderImpl::new();
    identity.expect_exchange_code_for_session().returning(|_| {
        Err(AuthError::CodeExchange {
            message: "invalid grant".to_string(),
        })
    });

    let response = server_with(identity)
        .get("/auth/callback")
        .add_query_param("code", "expired")
        .add_query_param("next", "https://evil.example/")
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_sign_out_clears_cookies() {
    let mut identity = MockIdentityProviderImpl::new();
    identity.expect_get_user().returning(|_| Ok(sample_user("user-1")));
    identity
        .expect_sign_out()
        .withf(|token| token == "access-1")
        .times(1)
        .returning(|_| Ok(()));

    let response = server_with(identity)
        .post("/auth/signout")
        .add_header(header::COOKIE, HeaderValue::from_static("sb-access-token=access-1"))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let cleared = response.headers().get_all(header::SET_COOKIE).iter().count();
    assert_eq!(cleared, 2);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let response = server()
        .get("/health")
        .add_header(
            header::HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me"),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_overlong_text_filters_rejected() {
    let server = server();
    let long_speed = "a".repeat(199);
    let long_city = "b".repeat(201);

    for (path, name, value) in [
        ("/api/office-properties", "internetSpeed", long_speed.as_str()),
        ("/api/properties", "city", long_city.as_str()),
    ] {
        let response = server.get(path).add_query_param(name, value).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{path}?{name}");

        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["details"]["fieldErrors"][name].is_array());
    }

    // Longest accepted value still reaches the store
    let response = server
        .get("/api/office-properties")
        .add_query_param("internetSpeed", "f".repeat(100))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_callback_unencodable_next_falls_back_to_root() {
    let response = server()
        .get("/auth/callback")
        .add_query_param("next", "/a\nb")
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

/// Store that never answers within a test's patience
struct StalledSource;

#[async_trait]
impl DataSource for StalledSource {
    async fn execute(&self, _query: TableQuery) -> Result<QueryResult, DatabaseError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(QueryResult { rows: Vec::new(), total: Some(0) })
    }

    async fn fetch_by_id(&self, table: ListingTable, id: &ListingId) -> Result<Value, DatabaseError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(DatabaseError::NotFound {
            entity: table.to_string(),
            id: id.to_string(),
        })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_slow_request_times_out_with_envelope() {
    let repositories = Arc::new(DataSourceRepositoryFactory::new(Arc::new(StalledSource)));
    let context = AppContext::new(
        repositories,
        Arc::new(MockIdentityProviderImpl::new()),
        AuthConfig::default(),
    );
    let config = AppConfig {
        request_timeout: Duration::from_millis(50),
        ..Default::default()
    };
    let server = TestServer::new(create_rest_app(context, config)).unwrap();

    let response = server.get("/api/properties").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.header("x-request-id").to_str().is_ok());

    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["error"]["message"], "An unexpected error occurred");
}

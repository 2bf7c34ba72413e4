//! Listing searches end to end: query string, validation, predicate building,
//! in-memory store and envelope shaping.

use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use haven_api_types::{ListingId, ListingTable};
use haven_config::AuthConfig;
use haven_rest_api::{create_rest_app, AppConfig, AppContext};
use haven_storage::{DataSourceRepositoryFactory, InMemoryDataSource, OfflineIdentityProvider};
use serde_json::{json, Value};
use std::sync::Arc;

/// Office row created `n` hours after the epoch below
fn office_row(n: i64, desks: i64, city: &str) -> Value {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::hours(n);
    json!({
        "id": ListingId::new_v4().to_string(),
        "property_type": "office",
        "office_type": "private",
        "street_address": format!("{n} Market St"),
        "city": city,
        "state": "CA",
        "zip_code": "94105",
        "monthly_rent": 2000 + n * 10,
        "security_deposit": 4000,
        "square_feet": 800,
        "desk_capacity": desks,
        "has_reception": n % 2 == 0,
        "available_date": "2024-05-01",
        "created_at": created.to_rfc3339(),
    })
}

async fn server_over(source: InMemoryDataSource) -> TestServer {
    let repositories = Arc::new(DataSourceRepositoryFactory::new(Arc::new(source)));
    let context = AppContext::new(repositories, Arc::new(OfflineIdentityProvider), AuthConfig::default());
    TestServer::new(create_rest_app(context, AppConfig::default())).unwrap()
}

/// 20 offices with at least 10 desks plus 5 smaller ones interleaved
async fn office_store() -> InMemoryDataSource {
    let source = InMemoryDataSource::new();
    for n in 0..25 {
        let desks = if n % 5 == 4 { 6 } else { 10 + n };
        source.insert(ListingTable::OfficeListings, office_row(n, desks, "San Francisco")).await;
    }
    source
}

fn street_addresses(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["street_address"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_office_second_page_of_twenty_matches() {
    let server = server_over(office_store().await).await;

    let response = server
        .get("/api/office-properties")
        .add_query_param("minDesks", "10")
        .add_query_param("page", "2")
        .add_query_param("limit", "8")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["metadata"]["total"], 20);
    assert_eq!(body["metadata"]["page"], 2);
    assert_eq!(body["metadata"]["limit"], 8);
    assert_eq!(body["metadata"]["totalPages"], 3);
    assert_eq!(body["metadata"]["hasMore"], true);
    assert_eq!(body["filters"]["applied"], json!({"minDesks": 10}));

    // Matching rows newest first, then the 9th through 16th of them
    let matching: Vec<i64> = (0..25).rev().filter(|n| n % 5 != 4).collect();
    let expected: Vec<String> = matching[8..16].iter().map(|n| format!("{n} Market St")).collect();
    assert_eq!(street_addresses(&body), expected);
}

#[tokio::test]
async fn test_office_last_page_has_no_more() {
    let server = server_over(office_store().await).await;

    let body: Value = server
        .get("/api/office-properties")
        .add_query_param("minDesks", "10")
        .add_query_param("page", "3")
        .add_query_param("limit", "8")
        .await
        .json();

    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["metadata"]["totalPages"], 3);
    assert_eq!(body["metadata"]["hasMore"], false);
}

#[tokio::test]
async fn test_empty_result_metadata() {
    let server = server_over(office_store().await).await;

    let body: Value = server
        .get("/api/office-properties")
        .add_query_param("city", "Portland")
        .await
        .json();

    assert_eq!(body["data"], json!([]));
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["metadata"]["total"], 0);
    assert_eq!(body["metadata"]["totalPages"], 0);
    assert_eq!(body["metadata"]["hasMore"], false);
}

#[tokio::test]
async fn test_total_equal_to_limit_is_one_page() {
    let source = InMemoryDataSource::new();
    for n in 0..6 {
        source.insert(ListingTable::OfficeListings, office_row(n, 12, "Oakland")).await;
    }
    let server = server_over(source).await;

    let body: Value = server
        .get("/api/office-properties")
        .add_query_param("limit", "6")
        .await
        .json();

    assert_eq!(body["metadata"]["total"], 6);
    assert_eq!(body["metadata"]["totalPages"], 1);
    assert_eq!(body["metadata"]["hasMore"], false);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let server = server_over(office_store().await).await;

    let body: Value = server
        .get("/api/office-properties")
        .add_query_param("page", "40")
        .await
        .json();

    assert_eq!(body["data"], json!([]));
    assert_eq!(body["metadata"]["total"], 25);
    assert_eq!(body["metadata"]["hasMore"], false);
}

#[tokio::test]
async fn test_combined_office_filters() {
    let server = server_over(office_store().await).await;

    let body: Value = server
        .get("/api/office-properties")
        .add_query_param("minDesks", "20")
        .add_query_param("maxDesks", "30")
        .add_query_param("hasReception", "true")
        .add_query_param("city", "San Francisco")
        .add_query_param("limit", "50")
        .await
        .json();

    for row in body["data"].as_array().unwrap() {
        let desks = row["desk_capacity"].as_i64().unwrap();
        assert!((20..=30).contains(&desks), "desk_capacity {desks}");
        assert_eq!(row["has_reception"], true);
    }
    // n in 10..=20, even, and not one of the small offices
    assert_eq!(body["metadata"]["total"], 5);
}

#[tokio::test]
async fn test_limit_bounds_per_endpoint() {
    let server = server_over(InMemoryDataSource::seeded()).await;

    for (path, limit, status) in [
        ("/api/featured-properties", "100", 400),
        ("/api/featured-properties", "10", 200),
        ("/api/featured-properties", "0", 400),
        ("/api/office-properties/featured", "11", 400),
        ("/api/properties", "50", 200),
        ("/api/properties", "51", 400),
        ("/api/office-properties", "50", 200),
        ("/api/office-properties", "51", 400),
    ] {
        let response = server.get(path).add_query_param("limit", limit).await;
        assert_eq!(response.status_code().as_u16(), status, "{path}?limit={limit}");

        let body: Value = response.json();
        if status == 400 {
            assert_eq!(body["data"], Value::Null);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert!(body["error"]["details"]["fieldErrors"]["limit"].is_array());
        } else {
            assert_eq!(body["metadata"]["limit"].as_u64(), limit.parse::<u64>().ok());
        }
    }
}

#[tokio::test]
async fn test_malformed_id_is_validation_not_not_found() {
    let server = server_over(InMemoryDataSource::seeded()).await;

    for path in ["/api/properties/not-a-uuid", "/api/office-properties/123"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code().as_u16(), 400, "{path}");

        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Invalid property ID format");
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let server = server_over(InMemoryDataSource::seeded()).await;

    let response = server
        .get(&format!("/api/office-properties/{}", ListingId::new_v4()))
        .await;
    assert_eq!(response.status_code().as_u16(), 404);

    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_price_bounds_must_be_ordered() {
    let server = server_over(office_store().await).await;

    let rejected = server
        .get("/api/office-properties")
        .add_query_param("minPrice", "2200")
        .add_query_param("maxPrice", "2100")
        .await;
    assert_eq!(rejected.status_code().as_u16(), 400);

    let accepted: Value = server
        .get("/api/office-properties")
        .add_query_param("minPrice", "2100")
        .add_query_param("maxPrice", "2100")
        .await
        .json();
    assert_eq!(accepted["metadata"]["total"], 1);
    assert_eq!(accepted["data"][0]["monthly_rent"].as_f64(), Some(2100.0));
}

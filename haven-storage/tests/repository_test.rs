//! Repository behaviour over the in-memory data source

use chrono::{Duration, TimeZone, Utc};
use haven_api_types::{ListingId, ListingTable, PageWindow};
use haven_interfaces::{
    OfficeFilters, OfficeListingRepository, RentalFilters, RentalListingRepository, RepositoryFactory,
};
use haven_storage::{fixtures, DataSourceRepositoryFactory, InMemoryDataSource};
use serde_json::{json, Value};
use std::sync::Arc;

fn office_row(n: i64, desks: i64) -> Value {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n);
    json!({
        "id": ListingId::from(uuid::Uuid::from_u128(1000 + n as u128)).to_string(),
        "property_type": "office",
        "office_type": if n % 2 == 0 { "private" } else { "coworking" },
        "street_address": format!("{n} Main St"),
        "city": "Atlanta",
        "state": "GA",
        "zip_code": "30303",
        "monthly_rent": 2000 + n * 10,
        "square_feet": 1000,
        "desk_capacity": desks,
        "has_reception": n % 2 == 0,
        "available_date": "2024-07-01",
        "created_at": created.to_rfc3339(),
    })
}

/// 20 offices with 10+ desks plus 5 smaller ones, created one day apart
async fn office_factory() -> DataSourceRepositoryFactory {
    let source = InMemoryDataSource::new();
    source
        .insert_many(
            ListingTable::OfficeListings,
            (0..25).map(|n| office_row(n, if n < 20 { 10 + n } else { 4 })),
        )
        .await;
    DataSourceRepositoryFactory::new(Arc::new(source))
}

#[tokio::test]
async fn test_office_second_page_newest_first() {
    let factory = office_factory().await;
    let filters = OfficeFilters {
        min_desks: Some(10),
        ..Default::default()
    };

    let page = factory
        .office_repository()
        .search(filters, PageWindow::from_page(2, 8))
        .await
        .unwrap();

    assert_eq!(page.meta.total, 20);
    assert_eq!(page.meta.total_pages, 3);
    assert!(page.meta.has_more);
    assert_eq!(page.items.len(), 8);

    // Newest matching row is n=19; the second page starts at the 9th newest
    let desks: Vec<i32> = page.items.iter().map(|o| o.desk_capacity).collect();
    assert_eq!(desks, (4..12).rev().map(|n| 10 + n).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_office_page_past_end() {
    let factory = office_factory().await;
    let page = factory
        .office_repository()
        .search(OfficeFilters::default(), PageWindow::from_page(9, 10))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.meta.total, 25);
    assert!(!page.meta.has_more);
}

#[tokio::test]
async fn test_office_reception_filter_only_when_present() {
    let factory = office_factory().await;
    let repo = factory.office_repository();

    let all = repo
        .search(OfficeFilters::default(), PageWindow::from_page(1, 50))
        .await
        .unwrap();
    let without_reception = repo
        .search(
            OfficeFilters {
                has_reception: Some(false),
                ..Default::default()
            },
            PageWindow::from_page(1, 50),
        )
        .await
        .unwrap();

    assert_eq!(all.meta.total, 25);
    assert_eq!(without_reception.meta.total, 12);
    assert!(without_reception.items.iter().all(|o| o.has_reception == Some(false)));
}

#[tokio::test]
async fn test_rental_price_range_and_city() {
    let factory = DataSourceRepositoryFactory::new(Arc::new(InMemoryDataSource::seeded()));
    let filters = RentalFilters {
        city: Some("Atlanta".to_string()),
        min_price: Some(1000.0),
        max_price: Some(2500.0),
        ..Default::default()
    };

    let page = factory
        .rental_repository()
        .search(filters, PageWindow::from_offset(0, 50))
        .await
        .unwrap();

    assert!(!page.items.is_empty());
    for listing in &page.items {
        assert_eq!(listing.city, "Atlanta");
        assert!((1000.0..=2500.0).contains(&listing.monthly_rent));
    }
    assert!(page
        .items
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn test_find_by_id() {
    let factory = DataSourceRepositoryFactory::new(Arc::new(InMemoryDataSource::seeded()));

    let found = factory
        .rental_repository()
        .find_by_id(fixtures::rental_id(2))
        .await
        .unwrap();
    assert_eq!(found.map(|l| l.id), Some(fixtures::rental_id(2)));

    let missing = factory
        .rental_repository()
        .find_by_id(ListingId::new_v4())
        .await
        .unwrap();
    assert!(missing.is_none());

    let office = factory
        .office_repository()
        .find_by_id(fixtures::office_id(5))
        .await
        .unwrap();
    assert!(office.is_some());
}

#[tokio::test]
async fn test_featured_returns_newest() {
    let factory = DataSourceRepositoryFactory::new(Arc::new(InMemoryDataSource::seeded()));

    let featured = factory.office_repository().featured(4).await.unwrap();
    assert_eq!(featured.len(), 4);
    assert_eq!(featured[0].id, fixtures::office_id(23));

    let rentals = factory.rental_repository().featured(2).await.unwrap();
    assert_eq!(rentals.len(), 2);
    assert!(factory.health_check().await.is_ok());
}

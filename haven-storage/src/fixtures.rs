//! Seed listings for the in-memory data source
//!
//! Rows are generated deterministically so identifiers are stable across
//! restarts, which keeps bookmarked development URLs working.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use haven_api_types::ListingId;
use serde_json::{json, Value};
use uuid::Uuid;

const RENTAL_ID_BASE: u128 = 0x7e1a_0000_0000_4000_8000_0000_0000_0000;
const OFFICE_ID_BASE: u128 = 0x0ff1_0000_0000_4000_8000_0000_0000_0000;

const CITIES: &[(&str, &str, &str)] = &[
    ("Atlanta", "GA", "30303"),
    ("Austin", "TX", "78701"),
    ("Denver", "CO", "80202"),
    ("Seattle", "WA", "98101"),
];

const NEIGHBORHOODS: &[&str] = &["Midtown", "Old Town", "Riverside", "Downtown", "Eastside"];
const RENTAL_TYPES: &[&str] = &["apartment", "house", "condo", "townhouse"];
const OFFICE_TYPES: &[&str] = &["private", "coworking", "executive", "virtual"];
const SPEEDS: &[&str] = &["100 Mbps", "500 Mbps Fiber", "1 Gbps Fiber", "250 Mbps Cable"];

/// Identifier of the n-th seeded rental listing
pub fn rental_id(n: usize) -> ListingId {
    ListingId::from(Uuid::from_u128(RENTAL_ID_BASE + n as u128))
}

/// Identifier of the n-th seeded office listing
pub fn office_id(n: usize) -> ListingId {
    ListingId::from(Uuid::from_u128(OFFICE_ID_BASE + n as u128))
}

fn created_at(n: usize) -> String {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_default();
    (epoch + Duration::hours(n as i64 * 7)).to_rfc3339()
}

fn available_date(n: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default();
    (start + Duration::days((n % 60) as i64)).to_string()
}

pub fn rental_rows() -> Vec<Value> {
    (0..16)
        .map(|n| {
            let (city, state, zip) = CITIES[n % CITIES.len()];
            let bedrooms = (n % 4 + 1) as i64;
            let rent = 1100 + (n as i64 * 137) % 2400;
            json!({
                "id": rental_id(n).to_string(),
                "property_type": RENTAL_TYPES[n % RENTAL_TYPES.len()],
                "street_address": format!("{} {} St", 100 + n * 12, NEIGHBORHOODS[n % NEIGHBORHOODS.len()]),
                "city": city,
                "state": state,
                "zip_code": zip,
                "neighborhood": NEIGHBORHOODS[(n + 2) % NEIGHBORHOODS.len()],
                "monthly_rent": rent,
                "security_deposit": rent,
                "utilities": ["water", "trash"],
                "bedrooms": bedrooms,
                "bathrooms": 1.0 + (n % 3) as f64 * 0.5,
                "square_feet": 600 + bedrooms * 250,
                "parking": n % 2 == 0,
                "pet_friendly": n % 3 != 0,
                "amenities": ["in-unit laundry", "dishwasher"],
                "minimum_lease": 12,
                "available_date": available_date(n),
                "application_fee": 50,
                "contact_email": "leasing@haven.example",
                "created_at": created_at(n),
            })
        })
        .collect()
}

pub fn office_rows() -> Vec<Value> {
    (0..24)
        .map(|n| {
            let (city, state, zip) = CITIES[n % CITIES.len()];
            let desks = 4 + (n as i64 * 3) % 40;
            let rent = 1500 + desks * 180;
            json!({
                "id": office_id(n).to_string(),
                "property_type": "office",
                "office_type": OFFICE_TYPES[n % OFFICE_TYPES.len()],
                "street_address": format!("{} Commerce Ave, Suite {}", 200 + n * 5, 100 + n),
                "city": city,
                "state": state,
                "zip_code": zip,
                "monthly_rent": rent,
                "security_deposit": rent * 2,
                "square_feet": 400 + desks * 60,
                "desk_capacity": desks,
                "meeting_rooms": (n % 5) as i64,
                "has_reception": n % 2 == 1,
                "internet_speed": SPEEDS[n % SPEEDS.len()],
                "parking": n % 3 == 0,
                "minimum_lease": 6,
                "available_date": available_date(n),
                "available_hours": "24/7",
                "contact_email": "offices@haven.example",
                "created_at": created_at(n),
            })
        })
        .collect()
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ListingId;

/// Tables exposed by the hosted data store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTable {
    RentalListings,
    OfficeListings,
}

impl ListingTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingTable::RentalListings => "rental_listings",
            ListingTable::OfficeListings => "office_listings",
        }
    }
}

impl std::fmt::Display for ListingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A residential rental listing as stored in `rental_listings`
///
/// Field names follow the table columns; rows are passed to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalListing {
    pub id: ListingId,
    pub property_type: String,

    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    pub monthly_rent: f64,
    pub security_deposit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilities_cost: Option<f64>,

    pub bedrooms: i32,
    pub bathrooms: f64,
    pub square_feet: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_friendly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_deposit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_lease: Option<i32>,
    pub available_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_fee: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_transportation: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// An office space listing as stored in `office_listings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeListing {
    pub id: ListingId,
    pub property_type: String,
    pub office_type: String,

    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    pub monthly_rent: f64,
    #[serde(default)]
    pub security_deposit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utilities_cost: Option<f64>,

    pub square_feet: i32,
    pub desk_capacity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_rooms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_reception: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_speed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_fee: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_lease: Option<i32>,
    pub available_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_fee: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

//! Listing query models
//!
//! Each model is parsed from the raw query map with [`QueryValidator`]; all
//! problems in one request are reported together.

use haven_api_types::PageWindow;
use haven_interfaces::{OfficeFilters, RentalFilters};
use haven_web::{QueryValidator, WebResult};
use std::collections::HashMap;

pub const SEARCH_LIMIT_MAX: u32 = 50;
pub const SEARCH_LIMIT_DEFAULT: u32 = 10;
pub const FEATURED_LIMIT_MAX: u32 = 10;
pub const FEATURED_LIMIT_DEFAULT: u32 = 4;

/// `GET /api/properties` parameters (offset-based)
#[derive(Debug, Clone, PartialEq)]
pub struct RentalSearchQuery {
    pub filters: RentalFilters,
    pub limit: u32,
    pub offset: u64,
}

impl RentalSearchQuery {
    pub fn from_params(params: &HashMap<String, String>) -> WebResult<Self> {
        let mut v = QueryValidator::new(params);

        let filters = RentalFilters {
            city: v.optional_string("city"),
            min_price: v.optional_positive("minPrice"),
            max_price: v.optional_positive("maxPrice"),
            property_type: v.optional_string("propertyType"),
        };
        let limit = v.bounded_int("limit", 1, SEARCH_LIMIT_MAX, SEARCH_LIMIT_DEFAULT);
        let offset = v.offset("offset", 0);
        v.ensure_ordered(filters.min_price, filters.max_price, "minPrice", "maxPrice");

        v.finish(Self { filters, limit, offset })
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::from_offset(self.offset, self.limit)
    }
}

/// `GET /api/office-properties` parameters (page-based)
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeSearchQuery {
    pub filters: OfficeFilters,
    pub page: u32,
    pub limit: u32,
}

impl OfficeSearchQuery {
    pub fn from_params(params: &HashMap<String, String>) -> WebResult<Self> {
        let mut v = QueryValidator::new(params);

        let filters = OfficeFilters {
            min_desks: v.optional_int_at_least("minDesks", 0),
            max_desks: v.optional_int_at_least("maxDesks", 0),
            min_meeting_rooms: v.optional_int_at_least("minMeetingRooms", 0),
            office_type: v.optional_string("officeType"),
            has_reception: v.optional_bool("hasReception"),
            internet_speed: v.optional_string("internetSpeed"),
            city: v.optional_string("city"),
            state: v.optional_string("state"),
            min_price: v.optional_positive("minPrice"),
            max_price: v.optional_positive("maxPrice"),
        };
        let page = v.bounded_int("page", 1, u32::MAX, 1);
        let limit = v.bounded_int("limit", 1, SEARCH_LIMIT_MAX, SEARCH_LIMIT_DEFAULT);
        v.ensure_ordered(filters.min_price, filters.max_price, "minPrice", "maxPrice");
        v.ensure_ordered(filters.min_desks, filters.max_desks, "minDesks", "maxDesks");

        v.finish(Self { filters, page, limit })
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::from_page(self.page, self.limit)
    }
}

/// `limit` for the featured endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedQuery {
    pub limit: u32,
}

impl FeaturedQuery {
    pub fn from_params(params: &HashMap<String, String>) -> WebResult<Self> {
        let mut v = QueryValidator::new(params);
        let limit = v.bounded_int("limit", 1, FEATURED_LIMIT_MAX, FEATURED_LIMIT_DEFAULT);
        v.finish(Self { limit })
    }
}

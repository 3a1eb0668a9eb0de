//! Wire types for the lookup services.
//!
//! The OMS endpoints (postcode and store lookup) wrap their documents in a
//! Solr-style `{"response": {"docs": [...]}}` envelope; the Maarg inventory
//! endpoint returns a flat `{"resultList": [...]}`.

use serde::{Deserialize, Serialize};

/// Fixed page size for store lookups.
pub const STORE_PAGE_SIZE: u32 = 150;

/// Fixed store-lookup filters: retail stores flagged for pickup.
pub const STORE_FILTERS: [&str; 2] = ["storeType: RETAIL_STORE", "pickup_pref: true"];

/// Name-ascending service-side sort; final ordering is overridden by
/// distance after the availability filter.
pub const STORE_SORT: &str = "storeName asc";

// ---------------------------------------------------------------------------
// postcodeLookup
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PostcodeLookupRequest {
    pub query: String,
}

impl PostcodeLookupRequest {
    #[must_use]
    pub fn for_code(code: &str) -> Self {
        Self {
            query: format!("postcode:{code}"),
        }
    }
}

/// Generic Solr-style envelope: `{"response": {"docs": [...]}}`.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope<T> {
    pub response: SearchDocs<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchDocs<T> {
    #[serde(default)]
    pub docs: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct PostcodeDoc {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// storeLookup
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreLookupRequest {
    pub view_size: u32,
    pub filters: Vec<String>,
    pub point: String,
    pub sort_by: String,
}

impl StoreLookupRequest {
    /// Builds the fixed-filter, fixed-page-size request for a coordinate
    /// point (`"<lat>,<lon>"`).
    #[must_use]
    pub fn for_point(point: String) -> Self {
        Self {
            view_size: STORE_PAGE_SIZE,
            filters: STORE_FILTERS.iter().map(|f| (*f).to_owned()).collect(),
            point,
            sort_by: STORE_SORT.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDoc {
    pub store_name: String,
    pub store_code: String,
    /// Distance from the query point, in kilometres.
    pub dist: f64,
}

// ---------------------------------------------------------------------------
// checkBopisInventory
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCheckRequest {
    pub product_store_id: String,
    pub internal_names: Vec<String>,
    pub facility_ids: Vec<String>,
    pub inventory_group_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InventoryCheckResponse {
    #[serde(rename = "resultList", default)]
    pub result_list: Vec<InventoryResultEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResultEntry {
    pub facility_id: String,
    pub internal_name: String,
    /// The service reports ATP as a JSON number; fractional values are
    /// floored when indexed.
    pub computed_atp: f64,
}

//! HTTP client for the availability lookup services.
//!
//! One client covers all three remote calls of the resolution workflow:
//! postcode geocoding and store lookup on the OMS API, the batched
//! inventory check on the Maarg API. Each call is a single attempt; no
//! retries, no caching.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use bopis_core::{AppConfig, AvailabilityIndex, Coordinate, InventoryRecord, PostalCode, Store};

use crate::error::LookupError;
use crate::types::{
    InventoryCheckRequest, InventoryCheckResponse, PostcodeDoc, PostcodeLookupRequest,
    SearchEnvelope, StoreDoc, StoreLookupRequest,
};

/// Client for the OMS and Maarg lookup endpoints.
///
/// Use [`LookupClient::new`] for production or
/// [`LookupClient::with_base_urls`] to point both APIs at a mock server in
/// tests.
pub struct LookupClient {
    http: Client,
    oms_base: Url,
    maarg_base: Url,
    product_store_id: String,
    inventory_group_id: String,
}

impl LookupClient {
    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LookupError::InvalidBaseUrl`] if a
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, LookupError> {
        Self::with_base_urls(config, &config.oms_base_url, &config.maarg_base_url)
    }

    /// Creates a client with explicit base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`LookupClient::new`].
    pub fn with_base_urls(
        config: &AppConfig,
        oms_base_url: &str,
        maarg_base_url: &str,
    ) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http,
            oms_base: parse_base(oms_base_url)?,
            maarg_base: parse_base(maarg_base_url)?,
            product_store_id: config.product_store_id.clone(),
            inventory_group_id: config.inventory_group_id.clone(),
        })
    }

    /// Resolves a postal code to a coordinate via the OMS `postcodeLookup`
    /// endpoint. Only the first returned document is used.
    ///
    /// # Errors
    ///
    /// - [`LookupError::EmptyResult`] if the service returns no documents.
    /// - [`LookupError::Http`] / [`LookupError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`LookupError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn locate_postal_code(
        &self,
        postal_code: &PostalCode,
    ) -> Result<Coordinate, LookupError> {
        let url = join(&self.oms_base, "postcodeLookup");
        let context = format!("postcodeLookup({postal_code})");
        let request = PostcodeLookupRequest::for_code(postal_code.as_str());

        let envelope: SearchEnvelope<PostcodeDoc> =
            self.post_json(url, &request, &context).await?;

        let Some(doc) = envelope.response.docs.into_iter().next() else {
            tracing::warn!(postal_code = %postal_code, "postcode lookup returned no documents");
            return Err(LookupError::EmptyResult { context });
        };

        Ok(Coordinate {
            latitude: doc.latitude,
            longitude: doc.longitude,
        })
    }

    /// Finds pickup-eligible retail stores near a coordinate via the OMS
    /// `storeLookup` endpoint (fixed filters, 150-store page).
    ///
    /// An empty document list is a valid result: no stores in range.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Http`] / [`LookupError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`LookupError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn find_pickup_stores(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<Store>, LookupError> {
        let url = join(&self.oms_base, "storeLookup");
        let point = coordinate.as_point();
        let context = format!("storeLookup({point})");
        let request = StoreLookupRequest::for_point(point);

        let envelope: SearchEnvelope<StoreDoc> = self.post_json(url, &request, &context).await?;

        let stores: Vec<Store> = envelope
            .response
            .docs
            .into_iter()
            .map(|doc| Store::new(doc.store_code, doc.store_name, doc.dist))
            .collect();

        tracing::debug!(count = stores.len(), "store lookup complete");
        Ok(stores)
    }

    /// Checks ATP for a set of SKUs across a set of stores in one batched
    /// call to the Maarg `checkBopisInventory` endpoint.
    ///
    /// Inputs are expected to be deduplicated by the caller. Entries with
    /// non-positive ATP are dropped when the index is built.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Http`] / [`LookupError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`LookupError::Deserialize`] if the response does not match the
    ///   expected shape.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn check_availability(
        &self,
        skus: &[String],
        store_codes: &[String],
    ) -> Result<AvailabilityIndex, LookupError> {
        let url = join(&self.maarg_base, "ofbiz-oms-usl/checkBopisInventory");
        let context = format!("checkBopisInventory({} skus)", skus.len());
        let request = InventoryCheckRequest {
            product_store_id: self.product_store_id.clone(),
            internal_names: skus.to_vec(),
            facility_ids: store_codes.to_vec(),
            inventory_group_id: self.inventory_group_id.clone(),
        };

        let response: InventoryCheckResponse = self.post_json(url, &request, &context).await?;

        let records = response.result_list.into_iter().map(|entry| InventoryRecord {
            store_code: entry.facility_id,
            sku: entry.internal_name,
            atp: entry.computed_atp.floor() as i64,
        });
        Ok(AvailabilityIndex::from_records(records))
    }

    /// POSTs a JSON body, asserts a 2xx status, and deserializes the
    /// response.
    async fn post_json<B, T>(&self, url: Url, body: &B, context: &str) -> Result<T, LookupError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.http.post(url.clone()).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| LookupError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Normalises a base URL to end with exactly one slash so `Url::join`
/// appends path segments instead of replacing the last one.
fn parse_base(base_url: &str) -> Result<Url, LookupError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| LookupError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Joins a relative endpoint path onto a normalised base URL.
///
/// The paths used here are static and always joinable against a parsed
/// base, so a failed join falls back to the base itself.
fn join(base: &Url, path: &str) -> Url {
    base.join(path).unwrap_or_else(|_| base.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_appends_single_trailing_slash() {
        let url = parse_base("https://oms.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://oms.example.com/api/");

        let url = parse_base("https://oms.example.com/api///").unwrap();
        assert_eq!(url.as_str(), "https://oms.example.com/api/");
    }

    #[test]
    fn join_preserves_base_path() {
        let base = parse_base("https://oms.example.com/api").unwrap();
        assert_eq!(
            join(&base, "postcodeLookup").as_str(),
            "https://oms.example.com/api/postcodeLookup"
        );
    }

    #[test]
    fn join_handles_nested_endpoint_paths() {
        let base = parse_base("https://maarg.example.com/rest/s1").unwrap();
        assert_eq!(
            join(&base, "ofbiz-oms-usl/checkBopisInventory").as_str(),
            "https://maarg.example.com/rest/s1/ofbiz-oms-usl/checkBopisInventory"
        );
    }

    #[test]
    fn parse_base_rejects_garbage() {
        assert!(parse_base("not a url").is_err());
    }
}

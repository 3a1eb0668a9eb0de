//! Collaborator seams for the resolver.
//!
//! Each remote dependency is a small async trait so tests can substitute
//! in-memory fakes and never touch the network. [`bopis_lookup::LookupClient`]
//! implements all three.

use std::sync::Arc;

use async_trait::async_trait;

use bopis_core::{AvailabilityIndex, Coordinate, PostalCode, Store};
use bopis_lookup::{LookupClient, LookupError};

/// Resolves a postal code to a coordinate.
#[async_trait]
pub trait Geocode: Send + Sync {
    async fn locate(&self, postal_code: &PostalCode) -> Result<Coordinate, LookupError>;
}

/// Finds pickup-eligible stores near a coordinate.
#[async_trait]
pub trait LocateStores: Send + Sync {
    async fn find_pickup_stores(&self, coordinate: &Coordinate)
        -> Result<Vec<Store>, LookupError>;
}

/// Batched per-store, per-SKU ATP check.
#[async_trait]
pub trait CheckInventory: Send + Sync {
    async fn check_availability(
        &self,
        skus: &[String],
        store_codes: &[String],
    ) -> Result<AvailabilityIndex, LookupError>;
}

#[async_trait]
impl Geocode for LookupClient {
    async fn locate(&self, postal_code: &PostalCode) -> Result<Coordinate, LookupError> {
        self.locate_postal_code(postal_code).await
    }
}

#[async_trait]
impl LocateStores for LookupClient {
    async fn find_pickup_stores(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<Store>, LookupError> {
        LookupClient::find_pickup_stores(self, coordinate).await
    }
}

#[async_trait]
impl CheckInventory for LookupClient {
    async fn check_availability(
        &self,
        skus: &[String],
        store_codes: &[String],
    ) -> Result<AvailabilityIndex, LookupError> {
        LookupClient::check_availability(self, skus, store_codes).await
    }
}

// Arc forwarding lets one shared client serve all three collaborator slots.

#[async_trait]
impl<T> Geocode for Arc<T>
where
    T: Geocode + ?Sized,
{
    async fn locate(&self, postal_code: &PostalCode) -> Result<Coordinate, LookupError> {
        (**self).locate(postal_code).await
    }
}

#[async_trait]
impl<T> LocateStores for Arc<T>
where
    T: LocateStores + ?Sized,
{
    async fn find_pickup_stores(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<Store>, LookupError> {
        (**self).find_pickup_stores(coordinate).await
    }
}

#[async_trait]
impl<T> CheckInventory for Arc<T>
where
    T: CheckInventory + ?Sized,
{
    async fn check_availability(
        &self,
        skus: &[String],
        store_codes: &[String],
    ) -> Result<AvailabilityIndex, LookupError> {
        (**self).check_availability(skus, store_codes).await
    }
}

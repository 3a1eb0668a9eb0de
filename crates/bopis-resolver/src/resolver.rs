//! The resolution pipeline.

use thiserror::Error;

use bopis_core::{
    build_demand_set, qualifying_stores, DemandLine, DemandSet, PostalCode, Store, ValidationError,
};
use bopis_lookup::LookupError;

use crate::traits::{CheckInventory, Geocode, LocateStores};

/// Errors from a resolution attempt.
///
/// `Validation` is raised before any remote call; `Lookup` wraps a remote
/// failure from any stage. Both entry points propagate lookup failures the
/// same way — an `Ok` with an empty list always means "no stores currently
/// satisfy demand", never a swallowed error.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Orchestrates geocode → locate → inventory check → filter → sort.
///
/// Remote calls are issued strictly sequentially; each stage depends on the
/// previous result. Nothing is cached or retried, and no state crosses
/// resolution requests — each call is independent and idempotent given the
/// same inputs and remote state.
pub struct AvailabilityResolver<G, L, I> {
    geocoder: G,
    locator: L,
    inventory: I,
}

impl<G, L, I> AvailabilityResolver<G, L, I>
where
    G: Geocode,
    L: LocateStores,
    I: CheckInventory,
{
    pub fn new(geocoder: G, locator: L, inventory: I) -> Self {
        Self {
            geocoder,
            locator,
            inventory,
        }
    }

    /// Resolves stores able to fulfill a single unit of one SKU.
    ///
    /// The quantity-1 special case of [`Self::resolve_for_cart`]: both
    /// paths share the `available >= required` filter.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Validation`] for a malformed postal code (before any
    /// network call); [`ResolveError::Lookup`] if any remote stage fails.
    pub async fn resolve_for_sku(
        &self,
        postal_code: &str,
        sku: &str,
    ) -> Result<Vec<Store>, ResolveError> {
        let demand = build_demand_set(&[DemandLine::new(sku, 1)]);
        self.resolve(postal_code, demand).await
    }

    /// Resolves stores able to fulfill every demand line at its full
    /// quantity.
    ///
    /// An empty demand set resolves to an empty list without touching the
    /// network. An empty result for a non-empty demand is a valid,
    /// non-error outcome.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Validation`] for a malformed postal code (before any
    /// network call); [`ResolveError::Lookup`] if any remote stage fails.
    pub async fn resolve_for_cart(
        &self,
        postal_code: &str,
        demand_lines: &[DemandLine],
    ) -> Result<Vec<Store>, ResolveError> {
        self.resolve(postal_code, build_demand_set(demand_lines))
            .await
    }

    async fn resolve(
        &self,
        postal_code: &str,
        demand: DemandSet,
    ) -> Result<Vec<Store>, ResolveError> {
        let postal_code = PostalCode::parse(postal_code)?;
        if demand.is_empty() {
            return Ok(Vec::new());
        }

        let coordinate = self.geocoder.locate(&postal_code).await?;
        let stores = self.locator.find_pickup_stores(&coordinate).await?;
        if stores.is_empty() {
            tracing::debug!(postal_code = %postal_code, "no pickup stores in range");
            return Ok(Vec::new());
        }

        // One batched inventory call over the demanded SKU union and every
        // located store. Demand-set keys are already unique; store codes
        // come deduplicated from the locator.
        let mut skus: Vec<String> = demand.keys().cloned().collect();
        skus.sort_unstable();
        let store_codes: Vec<String> = stores.iter().map(|store| store.code.clone()).collect();

        let index = self.inventory.check_availability(&skus, &store_codes).await?;

        let candidates = qualifying_stores(stores, &demand, &index);
        tracing::debug!(
            postal_code = %postal_code,
            candidates = candidates.len(),
            "resolution complete"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;

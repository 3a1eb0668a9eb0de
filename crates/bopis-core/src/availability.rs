//! ATP indexing and the qualifying-store filter.
//!
//! Pure logic: the resolver fetches raw inventory records over the wire and
//! hands them here to be indexed, filtered, and sorted. Keeping this
//! network-free lets the core availability semantics be tested without
//! mocking any HTTP service.

use std::collections::HashMap;

use crate::types::{DemandLine, Store};

/// SKU → required quantity. A store qualifies only if it satisfies every
/// entry.
pub type DemandSet = HashMap<String, u32>;

/// One raw per-store, per-SKU ATP figure from the inventory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub store_code: String,
    pub sku: String,
    pub atp: i64,
}

/// Store code → (SKU → positive ATP).
///
/// Built once per resolution request. Records with ATP ≤ 0 are dropped at
/// construction, so a missing entry and an out-of-stock entry are the same
/// thing: zero available.
#[derive(Debug, Default, Clone)]
pub struct AvailabilityIndex {
    by_store: HashMap<String, HashMap<String, u32>>,
}

impl AvailabilityIndex {
    /// Indexes raw inventory records, omitting non-positive ATP entries.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = InventoryRecord>,
    {
        let mut by_store: HashMap<String, HashMap<String, u32>> = HashMap::new();
        for record in records {
            if record.atp > 0 {
                by_store
                    .entry(record.store_code)
                    .or_default()
                    .insert(record.sku, record.atp.min(i64::from(u32::MAX)) as u32);
            }
        }
        Self { by_store }
    }

    /// ATP for a SKU at a store; missing store or SKU reads as 0.
    #[must_use]
    pub fn atp(&self, store_code: &str, sku: &str) -> u32 {
        self.by_store
            .get(store_code)
            .and_then(|skus| skus.get(sku))
            .copied()
            .unwrap_or(0)
    }

    /// Whether a store can promise every line of the demand set.
    #[must_use]
    pub fn satisfies(&self, store_code: &str, demand: &DemandSet) -> bool {
        demand
            .iter()
            .all(|(sku, &quantity)| self.atp(store_code, sku) >= quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_store.is_empty()
    }
}

/// Collapses demand lines into a demand set, summing quantities across
/// duplicate SKUs so the filter stays correct even when the host cart
/// carries the same SKU on more than one line.
#[must_use]
pub fn build_demand_set(lines: &[DemandLine]) -> DemandSet {
    let mut demand = DemandSet::new();
    for line in lines {
        *demand.entry(line.sku.clone()).or_insert(0) += line.quantity;
    }
    demand
}

/// Filters `stores` to those satisfying every demand line and sorts the
/// survivors ascending by display distance.
///
/// The sort is stable, so stores at equal whole-mile distances keep the
/// locator's name-ascending order.
#[must_use]
pub fn qualifying_stores(
    stores: Vec<Store>,
    demand: &DemandSet,
    index: &AvailabilityIndex,
) -> Vec<Store> {
    let mut qualifying: Vec<Store> = stores
        .into_iter()
        .filter(|store| index.satisfies(&store.code, demand))
        .collect();
    qualifying.sort_by_key(|store| store.distance_miles);
    qualifying
}

#[cfg(test)]
#[path = "availability_test.rs"]
mod tests;

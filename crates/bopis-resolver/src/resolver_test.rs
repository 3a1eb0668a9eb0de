use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use bopis_core::{AvailabilityIndex, Coordinate, InventoryRecord, ValidationError};

use super::*;

fn lookup_failure(context: &str) -> LookupError {
    LookupError::EmptyResult {
        context: context.to_owned(),
    }
}

#[derive(Default)]
struct FakeGeocoder {
    coordinate: Option<Coordinate>,
    calls: AtomicUsize,
}

#[async_trait]
impl Geocode for FakeGeocoder {
    async fn locate(&self, _postal_code: &PostalCode) -> Result<Coordinate, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.coordinate.ok_or_else(|| lookup_failure("postcodeLookup"))
    }
}

#[derive(Default)]
struct FakeLocator {
    stores: Vec<Store>,
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl LocateStores for FakeLocator {
    async fn find_pickup_stores(
        &self,
        _coordinate: &Coordinate,
    ) -> Result<Vec<Store>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(lookup_failure("storeLookup"));
        }
        Ok(self.stores.clone())
    }
}

#[derive(Default)]
struct FakeInventory {
    records: Vec<InventoryRecord>,
    fail: bool,
    calls: AtomicUsize,
    seen: Mutex<Option<(Vec<String>, Vec<String>)>>,
}

#[async_trait]
impl CheckInventory for FakeInventory {
    async fn check_availability(
        &self,
        skus: &[String],
        store_codes: &[String],
    ) -> Result<AvailabilityIndex, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen.lock().unwrap() = Some((skus.to_vec(), store_codes.to_vec()));
        if self.fail {
            return Err(lookup_failure("checkBopisInventory"));
        }
        Ok(AvailabilityIndex::from_records(self.records.clone()))
    }
}

fn record(store: &str, sku: &str, atp: i64) -> InventoryRecord {
    InventoryRecord {
        store_code: store.to_owned(),
        sku: sku.to_owned(),
        atp,
    }
}

fn coordinate() -> Coordinate {
    Coordinate {
        latitude: 40.75,
        longitude: -73.99,
    }
}

fn resolver(
    geocoder: FakeGeocoder,
    locator: FakeLocator,
    inventory: FakeInventory,
) -> AvailabilityResolver<Arc<FakeGeocoder>, Arc<FakeLocator>, Arc<FakeInventory>> {
    AvailabilityResolver::new(Arc::new(geocoder), Arc::new(locator), Arc::new(inventory))
}

#[tokio::test]
async fn bad_postal_code_fails_before_any_network_interaction() {
    let geocoder = Arc::new(FakeGeocoder {
        coordinate: Some(coordinate()),
        ..FakeGeocoder::default()
    });
    let locator = Arc::new(FakeLocator::default());
    let inventory = Arc::new(FakeInventory::default());
    let resolver = AvailabilityResolver::new(
        Arc::clone(&geocoder),
        Arc::clone(&locator),
        Arc::clone(&inventory),
    );

    for postal in ["", "1234", "1234567890"] {
        let result = resolver.resolve_for_sku(postal, "SKU1").await;
        assert!(
            matches!(result, Err(ResolveError::Validation(_))),
            "expected Validation for {postal:?}, got: {result:?}"
        );
    }

    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(locator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn validation_error_mentions_length() {
    let resolver = resolver(
        FakeGeocoder::default(),
        FakeLocator::default(),
        FakeInventory::default(),
    );
    let result = resolver.resolve_for_sku("1234", "SKU1").await;
    assert!(matches!(
        result,
        Err(ResolveError::Validation(ValidationError::PostalCodeLength {
            len: 4
        }))
    ));
}

#[tokio::test]
async fn zero_located_stores_is_success_not_error() {
    let geocoder = FakeGeocoder {
        coordinate: Some(coordinate()),
        ..FakeGeocoder::default()
    };
    let inventory = Arc::new(FakeInventory::default());
    let resolver = AvailabilityResolver::new(
        Arc::new(geocoder),
        Arc::new(FakeLocator::default()),
        Arc::clone(&inventory),
    );

    let stores = resolver
        .resolve_for_sku("10001", "SKU1")
        .await
        .expect("zero stores is a valid outcome");
    assert!(stores.is_empty());
    // The inventory stage is skipped entirely when no stores were located.
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn geocode_failure_propagates_as_lookup_error() {
    let resolver = resolver(
        FakeGeocoder::default(),
        FakeLocator::default(),
        FakeInventory::default(),
    );
    let result = resolver.resolve_for_sku("10001", "SKU1").await;
    assert!(matches!(result, Err(ResolveError::Lookup(_))));
}

#[tokio::test]
async fn locator_failure_propagates_on_both_paths() {
    let make = || {
        resolver(
            FakeGeocoder {
                coordinate: Some(coordinate()),
                ..FakeGeocoder::default()
            },
            FakeLocator {
                fail: true,
                ..FakeLocator::default()
            },
            FakeInventory::default(),
        )
    };

    let single = make().resolve_for_sku("10001", "SKU1").await;
    assert!(matches!(single, Err(ResolveError::Lookup(_))));

    let cart = make()
        .resolve_for_cart("10001", &[DemandLine::new("SKU1", 1)])
        .await;
    assert!(matches!(cart, Err(ResolveError::Lookup(_))));
}

#[tokio::test]
async fn inventory_failure_propagates_as_lookup_error() {
    let resolver = resolver(
        FakeGeocoder {
            coordinate: Some(coordinate()),
            ..FakeGeocoder::default()
        },
        FakeLocator {
            stores: vec![Store::new("STORE_X", "Midtown", 8.05)],
            ..FakeLocator::default()
        },
        FakeInventory {
            fail: true,
            ..FakeInventory::default()
        },
    );

    let result = resolver.resolve_for_sku("10001", "SKU1").await;
    assert!(matches!(result, Err(ResolveError::Lookup(_))));
}

#[tokio::test]
async fn single_sku_filters_out_zero_atp_stores_despite_distance() {
    // StoreY is closer (1 mile) but has no stock; only StoreX qualifies.
    let resolver = resolver(
        FakeGeocoder {
            coordinate: Some(coordinate()),
            ..FakeGeocoder::default()
        },
        FakeLocator {
            stores: vec![
                Store::new("STORE_X", "Midtown", 8.05),
                Store::new("STORE_Y", "Chelsea", 1.7),
            ],
            ..FakeLocator::default()
        },
        FakeInventory {
            records: vec![record("STORE_X", "ABC-1", 3), record("STORE_Y", "ABC-1", 0)],
            ..FakeInventory::default()
        },
    );

    let stores = resolver
        .resolve_for_sku("10001", "ABC-1")
        .await
        .expect("resolution should succeed");
    let codes: Vec<&str> = stores.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["STORE_X"]);
}

#[tokio::test]
async fn cart_demand_requires_every_sku_at_full_quantity() {
    let resolver = resolver(
        FakeGeocoder {
            coordinate: Some(coordinate()),
            ..FakeGeocoder::default()
        },
        FakeLocator {
            stores: vec![
                Store::new("STORE_X", "Midtown", 8.05),
                Store::new("STORE_Y", "Chelsea", 30.0),
            ],
            ..FakeLocator::default()
        },
        FakeInventory {
            records: vec![
                record("STORE_X", "SKU1", 2),
                record("STORE_X", "SKU2", 0),
                record("STORE_Y", "SKU1", 5),
                record("STORE_Y", "SKU2", 5),
            ],
            ..FakeInventory::default()
        },
    );

    let demand = [DemandLine::new("SKU1", 2), DemandLine::new("SKU2", 1)];
    let stores = resolver
        .resolve_for_cart("10001", &demand)
        .await
        .expect("resolution should succeed");
    let codes: Vec<&str> = stores.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["STORE_Y"]);
}

#[tokio::test]
async fn candidates_are_sorted_ascending_by_display_miles() {
    let resolver = resolver(
        FakeGeocoder {
            coordinate: Some(coordinate()),
            ..FakeGeocoder::default()
        },
        FakeLocator {
            // Locator order is name-ascending, not distance-ascending.
            stores: vec![
                Store::new("FAR", "Alpha", 40.0),
                Store::new("NEAR", "Beta", 2.0),
                Store::new("MID", "Gamma", 15.0),
            ],
            ..FakeLocator::default()
        },
        FakeInventory {
            records: vec![
                record("FAR", "SKU1", 1),
                record("NEAR", "SKU1", 1),
                record("MID", "SKU1", 1),
            ],
            ..FakeInventory::default()
        },
    );

    let stores = resolver.resolve_for_sku("10001", "SKU1").await.unwrap();
    let codes: Vec<&str> = stores.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["NEAR", "MID", "FAR"]);
}

#[tokio::test]
async fn inventory_call_is_batched_over_deduped_skus_and_all_store_codes() {
    let inventory = Arc::new(FakeInventory {
        records: vec![record("STORE_X", "SKU1", 5), record("STORE_X", "SKU2", 5)],
        ..FakeInventory::default()
    });
    let resolver = AvailabilityResolver::new(
        Arc::new(FakeGeocoder {
            coordinate: Some(coordinate()),
            ..FakeGeocoder::default()
        }),
        Arc::new(FakeLocator {
            stores: vec![
                Store::new("STORE_X", "Midtown", 8.05),
                Store::new("STORE_Y", "Chelsea", 1.7),
            ],
            ..FakeLocator::default()
        }),
        Arc::clone(&inventory),
    );

    // SKU1 appears on two demand lines; the wire call must carry it once.
    let demand = [
        DemandLine::new("SKU1", 1),
        DemandLine::new("SKU1", 1),
        DemandLine::new("SKU2", 1),
    ];
    resolver.resolve_for_cart("10001", &demand).await.unwrap();

    assert_eq!(inventory.calls.load(Ordering::SeqCst), 1);
    let (skus, store_codes) = inventory.seen.lock().unwrap().clone().unwrap();
    assert_eq!(skus, vec!["SKU1".to_owned(), "SKU2".to_owned()]);
    assert_eq!(
        store_codes,
        vec!["STORE_X".to_owned(), "STORE_Y".to_owned()]
    );
}

#[tokio::test]
async fn duplicate_sku_lines_sum_into_one_requirement() {
    // Two lines of SKU1 at quantity 1 each demand 2 total; a store with
    // ATP 1 must not qualify.
    let resolver = resolver(
        FakeGeocoder {
            coordinate: Some(coordinate()),
            ..FakeGeocoder::default()
        },
        FakeLocator {
            stores: vec![Store::new("STORE_X", "Midtown", 8.05)],
            ..FakeLocator::default()
        },
        FakeInventory {
            records: vec![record("STORE_X", "SKU1", 1)],
            ..FakeInventory::default()
        },
    );

    let demand = [DemandLine::new("SKU1", 1), DemandLine::new("SKU1", 1)];
    let stores = resolver.resolve_for_cart("10001", &demand).await.unwrap();
    assert!(stores.is_empty());
}

#[tokio::test]
async fn empty_demand_resolves_empty_without_network() {
    let geocoder = Arc::new(FakeGeocoder {
        coordinate: Some(coordinate()),
        ..FakeGeocoder::default()
    });
    let resolver = AvailabilityResolver::new(
        Arc::clone(&geocoder),
        Arc::new(FakeLocator::default()),
        Arc::new(FakeInventory::default()),
    );

    let stores = resolver.resolve_for_cart("10001", &[]).await.unwrap();
    assert!(stores.is_empty());
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
}

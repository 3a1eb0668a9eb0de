//! The in-memory cart model and the fulfillment attribute triplet.
//!
//! The host POS platform owns the real cart; this module is the projection
//! the core reads demand from and writes fulfillment choices into. The
//! three attribute keys are fixed and case-sensitive, and are always
//! written or removed together — a line either carries the full pickup
//! triplet or none of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DemandLine, Store};

/// Line attribute carrying the chosen store's code.
pub const PICKUP_STORE_KEY: &str = "_pickupstore";
/// Line attribute carrying the human-readable store label.
pub const PICKUP_LABEL_KEY: &str = "Pick Up";
/// Line attribute tagging the delivery type.
pub const DELIVERY_TYPE_KEY: &str = "_delivery_type";
/// Sentinel value of [`DELIVERY_TYPE_KEY`] for in-store pickup.
pub const DELIVERY_TYPE_PICKUP: &str = "pick_up_instore";

/// The full attribute triplet, in write order.
pub const PICKUP_ATTRIBUTE_KEYS: [&str; 3] =
    [PICKUP_STORE_KEY, PICKUP_LABEL_KEY, DELIVERY_TYPE_KEY];

/// The store a line (or the whole cart) is to be picked up from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupStore {
    pub code: String,
    pub label: String,
}

impl From<&Store> for PickupStore {
    fn from(store: &Store) -> Self {
        Self {
            code: store.code.clone(),
            label: store.name.clone(),
        }
    }
}

/// One cart line as read from the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Host-assigned line identity (a UUID in practice).
    pub id: String,
    pub sku: String,
    pub variant_id: String,
    pub quantity: u32,
    /// Key-value line attributes, including any pickup triplet.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl CartLine {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        sku: impl Into<String>,
        variant_id: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            variant_id: variant_id.into(),
            quantity,
            properties: BTreeMap::new(),
        }
    }

    /// Whether this line carries the pickup triplet.
    #[must_use]
    pub fn has_pickup(&self) -> bool {
        self.properties.contains_key(PICKUP_LABEL_KEY)
    }

    /// The pickup store label on this line, if one is set.
    #[must_use]
    pub fn pickup_label(&self) -> Option<&str> {
        self.properties.get(PICKUP_LABEL_KEY).map(String::as_str)
    }

    fn write_pickup(&mut self, store: &PickupStore) {
        self.properties
            .insert(PICKUP_STORE_KEY.to_owned(), store.code.clone());
        self.properties
            .insert(PICKUP_LABEL_KEY.to_owned(), store.label.clone());
        self.properties
            .insert(DELIVERY_TYPE_KEY.to_owned(), DELIVERY_TYPE_PICKUP.to_owned());
    }

    fn clear_pickup(&mut self) {
        for key in PICKUP_ATTRIBUTE_KEYS {
            self.properties.remove(key);
        }
    }
}

/// The cashier's confirmed fulfillment choice for the whole cart.
///
/// Under `PickupTogether` every line shares one store; under
/// `PickupSeparate` each SKU carries its own store (or `None` to strip a
/// previously chosen one); under `Ship` no line carries pickup attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentSelection {
    Ship,
    PickupTogether(PickupStore),
    PickupSeparate(Vec<(String, Option<PickupStore>)>),
}

/// In-memory cart: an ordered list of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// One demand line per cart line, quantities as-is. Callers collapse
    /// duplicates via [`crate::availability::build_demand_set`].
    #[must_use]
    pub fn demand_lines(&self) -> Vec<DemandLine> {
        self.lines
            .iter()
            .map(|line| DemandLine::new(line.sku.clone(), line.quantity))
            .collect()
    }

    /// Cart SKUs, deduplicated, in first-seen order.
    #[must_use]
    pub fn skus(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for line in &self.lines {
            if !seen.contains(&line.sku) {
                seen.push(line.sku.clone());
            }
        }
        seen
    }

    /// Removes the pickup triplet from every line (the "Ship" choice).
    pub fn apply_ship_to_all(&mut self) {
        for line in &mut self.lines {
            line.clear_pickup();
        }
    }

    /// Writes the pickup triplet to every line, overwriting any prior
    /// pickup attributes.
    pub fn apply_pickup_to_all(&mut self, store: &PickupStore) {
        for line in &mut self.lines {
            line.write_pickup(store);
        }
    }

    /// Writes the pickup triplet to the first line matching `sku`.
    ///
    /// The cart is assumed to carry each SKU on at most one line; only the
    /// first match is touched. Returns `false` (a silent no-op, not an
    /// error) when no line matches.
    pub fn apply_pickup_to_line(&mut self, sku: &str, store: &PickupStore) -> bool {
        if let Some(line) = self.lines.iter_mut().find(|line| line.sku == sku) {
            line.write_pickup(store);
            true
        } else {
            false
        }
    }

    /// Removes the pickup triplet from the first line matching `sku`.
    /// Returns `false` when no line matches.
    pub fn remove_pickup_from_line(&mut self, sku: &str) -> bool {
        if let Some(line) = self.lines.iter_mut().find(|line| line.sku == sku) {
            line.clear_pickup();
            true
        } else {
            false
        }
    }

    /// Applies a confirmed [`FulfillmentSelection`] to the cart.
    pub fn apply_selection(&mut self, selection: &FulfillmentSelection) {
        match selection {
            FulfillmentSelection::Ship => self.apply_ship_to_all(),
            FulfillmentSelection::PickupTogether(store) => self.apply_pickup_to_all(store),
            FulfillmentSelection::PickupSeparate(choices) => {
                for (sku, choice) in choices {
                    match choice {
                        Some(store) => {
                            self.apply_pickup_to_line(sku, store);
                        }
                        None => {
                            self.remove_pickup_from_line(sku);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;

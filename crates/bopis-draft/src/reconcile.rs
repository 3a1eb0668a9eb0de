//! Pure merge/subtract of pickup attributes into draft-order line inputs.
//!
//! Both directions rebuild the *entire* line-item list: the remote API
//! replaces the list wholesale, so untouched lines must be resent exactly
//! as read (quantity, shipping flags, tax flag, weight, discount).

use bopis_core::cart::{PickupStore, DELIVERY_TYPE_KEY, DELIVERY_TYPE_PICKUP};
use bopis_core::cart::{PICKUP_ATTRIBUTE_KEYS, PICKUP_LABEL_KEY, PICKUP_STORE_KEY};

use crate::types::{CustomAttribute, DraftOrderLineInput, LineItemEdge, LineItemNode};

/// A requested attribute change for one line, keyed by variant id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAttributeUpdate {
    pub variant_id: String,
    pub attributes: Vec<CustomAttribute>,
}

impl LineAttributeUpdate {
    /// The pickup triplet for a variant, in write order.
    #[must_use]
    pub fn pickup(variant_id: impl Into<String>, store: &PickupStore) -> Self {
        Self {
            variant_id: variant_id.into(),
            attributes: vec![
                CustomAttribute {
                    key: PICKUP_STORE_KEY.to_owned(),
                    value: store.code.clone(),
                },
                CustomAttribute {
                    key: PICKUP_LABEL_KEY.to_owned(),
                    value: store.label.clone(),
                },
                CustomAttribute {
                    key: DELIVERY_TYPE_KEY.to_owned(),
                    value: DELIVERY_TYPE_PICKUP.to_owned(),
                },
            ],
        }
    }

    /// A removal request for the pickup triplet on a variant. Only the keys
    /// matter on the subtract path.
    #[must_use]
    pub fn pickup_removal(variant_id: impl Into<String>) -> Self {
        Self {
            variant_id: variant_id.into(),
            attributes: PICKUP_ATTRIBUTE_KEYS
                .iter()
                .map(|key| CustomAttribute {
                    key: (*key).to_owned(),
                    value: String::new(),
                })
                .collect(),
        }
    }
}

/// Rebuilds the full line-input list, merging the requested attributes into
/// each matching line.
///
/// The merge is keyed: existing attributes whose keys collide with the
/// update are replaced, not duplicated, so re-applying a store swaps the
/// triplet instead of accumulating a second one. Lines without a variant id
/// cannot be expressed in the replace mutation and are skipped.
#[must_use]
pub fn merge_line_inputs(
    edges: &[LineItemEdge],
    updates: &[LineAttributeUpdate],
) -> Vec<DraftOrderLineInput> {
    rebuild(edges, |variant_id, existing| {
        match updates.iter().find(|u| u.variant_id == variant_id) {
            Some(update) => {
                let mut merged: Vec<CustomAttribute> = existing
                    .iter()
                    .filter(|attr| !update.attributes.iter().any(|u| u.key == attr.key))
                    .cloned()
                    .collect();
                merged.extend(update.attributes.iter().cloned());
                merged
            }
            None => existing.to_vec(),
        }
    })
}

/// Rebuilds the full line-input list, dropping any attribute whose key
/// appears in the matching removal request. Other lines and all other
/// attributes pass through verbatim.
#[must_use]
pub fn subtract_line_inputs(
    edges: &[LineItemEdge],
    removals: &[LineAttributeUpdate],
) -> Vec<DraftOrderLineInput> {
    rebuild(edges, |variant_id, existing| {
        match removals.iter().find(|u| u.variant_id == variant_id) {
            Some(removal) => existing
                .iter()
                .filter(|attr| !removal.attributes.iter().any(|r| r.key == attr.key))
                .cloned()
                .collect(),
            None => existing.to_vec(),
        }
    })
}

fn rebuild<F>(edges: &[LineItemEdge], mut attributes_for: F) -> Vec<DraftOrderLineInput>
where
    F: FnMut(&str, &[CustomAttribute]) -> Vec<CustomAttribute>,
{
    edges
        .iter()
        .filter_map(|edge| {
            let node = &edge.node;
            let variant_id = node.variant.as_ref().map(|v| v.id.as_str())?;
            Some(line_input(
                node,
                variant_id,
                attributes_for(variant_id, &node.custom_attributes),
            ))
        })
        .collect()
}

fn line_input(
    node: &LineItemNode,
    variant_id: &str,
    custom_attributes: Vec<CustomAttribute>,
) -> DraftOrderLineInput {
    DraftOrderLineInput {
        variant_id: variant_id.to_owned(),
        quantity: node.quantity,
        requires_shipping: node.requires_shipping,
        taxable: node.taxable,
        grams: node.grams,
        applied_discount: node.applied_discount.clone(),
        custom_attributes,
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;

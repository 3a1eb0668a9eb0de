//! Wire types for the draft-order GraphQL API.
//!
//! The read query pages through `draftOrder.lineItems`; the write is a
//! single `draftOrderUpdate` mutation replacing the full line-item list.
//! Discount values and amounts are carried as raw JSON values so they
//! round-trip the service's mixed number/string formats untouched.

use serde::{Deserialize, Serialize};

/// Request envelope for any GraphQL call.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Response envelope: `data` plus optional top-level `errors`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphQlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// A key-value custom attribute on a draft-order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Read: draftOrder.lineItems
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderData {
    pub draft_order: Option<DraftOrder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrder {
    pub line_items: LineItemConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemConnection {
    #[serde(default)]
    pub edges: Vec<LineItemEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemEdge {
    pub node: LineItemNode,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// One draft-order line as read from the service. Everything except the
/// custom attributes is resent unchanged on update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemNode {
    pub variant: Option<VariantRef>,
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub requires_shipping: bool,
    #[serde(default)]
    pub taxable: bool,
    #[serde(default)]
    pub grams: i64,
    #[serde(default)]
    pub applied_discount: Option<AppliedDiscount>,
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
}

// ---------------------------------------------------------------------------
// Write: draftOrderUpdate
// ---------------------------------------------------------------------------

/// One reconstructed line for the replace-style mutation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderLineInput {
    pub variant_id: String,
    pub quantity: u32,
    pub requires_shipping: bool,
    pub taxable: bool,
    pub grams: i64,
    pub applied_discount: Option<AppliedDiscount>,
    pub custom_attributes: Vec<CustomAttribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderInput {
    pub line_items: Vec<DraftOrderLineInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderUpdateData {
    pub draft_order_update: Option<DraftOrderUpdatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOrderUpdatePayload {
    pub draft_order: Option<UpdatedDraftOrder>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// The updated order as echoed back by a successful mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedDraftOrder {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

//! Draft-order reconciliation: mirrors cart-line fulfillment attributes
//! into a remotely persisted draft order.
//!
//! The remote API has no partial-update primitive, so every write is a
//! read-modify-write cycle: page through the full line-item collection,
//! merge or subtract the pickup attribute triplet per requested variant,
//! and resend the entire reconstructed line-item list in one replace-style
//! mutation. The cycle is not transactionally isolated; a concurrent writer
//! between the read and the write loses (last-writer-wins, accepted risk).

pub mod client;
pub mod error;
pub mod reconcile;
pub mod types;

pub use client::DraftOrderClient;
pub use error::ReconciliationError;
pub use reconcile::{merge_line_inputs, subtract_line_inputs, LineAttributeUpdate};
pub use types::{CustomAttribute, DraftOrderLineInput, LineItemEdge, UpdatedDraftOrder};

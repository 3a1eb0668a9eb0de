//! Domain types and pure logic for the BOPIS availability core.
//!
//! Everything in this crate is network-free: postal-code validation, the
//! availability index and qualifying-store filter, the in-memory cart model
//! with its fulfillment attribute triplet, and environment-driven
//! configuration. The HTTP clients live in `bopis-lookup` and `bopis-draft`;
//! the orchestration lives in `bopis-resolver`.

pub mod app_config;
pub mod availability;
pub mod cart;
pub mod config;
pub mod error;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use availability::{build_demand_set, qualifying_stores, AvailabilityIndex, DemandSet, InventoryRecord};
pub use cart::{Cart, CartLine, FulfillmentSelection, PickupStore};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ValidationError};
pub use types::{Coordinate, DemandLine, PostalCode, Store};

//! HTTP clients for the three availability lookup services: postcode
//! geocoding, pickup-store lookup, and the batched inventory check.

pub mod client;
pub mod error;
pub mod types;

pub use client::LookupClient;
pub use error::LookupError;

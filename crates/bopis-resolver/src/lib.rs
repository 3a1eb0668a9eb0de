//! The availability resolution orchestrator.
//!
//! Combines the geocoder, store locator, and inventory checker behind
//! swappable traits, runs the validate → geocode → locate → check → filter
//! → sort pipeline, and tracks per-request resolution state so late results
//! for abandoned requests are discarded.

pub mod resolver;
pub mod state;
pub mod traits;

pub use resolver::{AvailabilityResolver, ResolveError};
pub use state::{ResolutionRequest, ResolutionSession, ResolutionState};
pub use traits::{CheckInventory, Geocode, LocateStores};

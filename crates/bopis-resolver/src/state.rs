//! Per-request resolution state, decoupled from any rendering concern.
//!
//! The host UI drives one [`ResolutionSession`] per search surface. A
//! session moves Idle → Resolving → Resolved/Failed, keyed on the request
//! parameters; a completion arriving for anything other than the current
//! in-flight request (the cashier navigated away or started a new search)
//! is discarded instead of being applied to stale state.

use bopis_core::{DemandLine, Store};

use crate::resolver::ResolveError;

/// The identity of one resolution request: the postal code plus the
/// demanded SKUs and quantities.
///
/// Demand lines are canonicalised (sorted by SKU) at construction so two
/// requests for the same demand compare equal regardless of cart order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    postal_code: String,
    demand: Vec<DemandLine>,
}

impl ResolutionRequest {
    /// Request identity for a single-SKU search (quantity 1).
    #[must_use]
    pub fn for_sku(postal_code: &str, sku: &str) -> Self {
        Self::for_cart(postal_code, &[DemandLine::new(sku, 1)])
    }

    /// Request identity for a whole-cart search.
    #[must_use]
    pub fn for_cart(postal_code: &str, demand_lines: &[DemandLine]) -> Self {
        let mut demand = demand_lines.to_vec();
        demand.sort_by(|a, b| a.sku.cmp(&b.sku));
        Self {
            postal_code: postal_code.to_owned(),
            demand,
        }
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

/// Where a resolution request currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionState {
    Idle,
    Resolving {
        request: ResolutionRequest,
    },
    /// Lookup succeeded. `stores` may be empty ("no stores currently
    /// satisfy demand") — that is distinct from `Failed`.
    Resolved {
        request: ResolutionRequest,
        stores: Vec<Store>,
        /// Code of the currently selected store. Defaults to the first
        /// (nearest) candidate; the cashier may override before
        /// confirming.
        selected: Option<String>,
    },
    Failed {
        request: ResolutionRequest,
        reason: String,
    },
}

/// Tracks one in-flight resolution and rejects stale completions.
#[derive(Debug, Default)]
pub struct ResolutionSession {
    state: ResolutionState,
}

impl Default for ResolutionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ResolutionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Marks a request as in flight, superseding whatever came before.
    pub fn begin(&mut self, request: ResolutionRequest) {
        self.state = ResolutionState::Resolving { request };
    }

    /// Applies the outcome of a resolution attempt.
    ///
    /// Returns `false` and leaves the state untouched when the completion
    /// is stale: the session is not resolving, or it is resolving a
    /// different request than the one that finished.
    pub fn complete(
        &mut self,
        request: &ResolutionRequest,
        outcome: Result<Vec<Store>, ResolveError>,
    ) -> bool {
        match &self.state {
            ResolutionState::Resolving { request: current } if current == request => {}
            _ => {
                tracing::debug!("discarding stale resolution result");
                return false;
            }
        }

        self.state = match outcome {
            Ok(stores) => {
                let selected = stores.first().map(|store| store.code.clone());
                ResolutionState::Resolved {
                    request: request.clone(),
                    stores,
                    selected,
                }
            }
            Err(error) => ResolutionState::Failed {
                request: request.clone(),
                reason: error.to_string(),
            },
        };
        true
    }

    /// Overrides the selected store by code. Only valid while resolved and
    /// only for a code present in the candidate list; returns `false`
    /// otherwise.
    pub fn select_store(&mut self, code: &str) -> bool {
        if let ResolutionState::Resolved {
            stores, selected, ..
        } = &mut self.state
        {
            if stores.iter().any(|store| store.code == code) {
                *selected = Some(code.to_owned());
                return true;
            }
        }
        false
    }

    /// The currently selected store, if the session is resolved and
    /// non-empty.
    #[must_use]
    pub fn selected_store(&self) -> Option<&Store> {
        if let ResolutionState::Resolved {
            stores,
            selected: Some(code),
            ..
        } = &self.state
        {
            stores.iter().find(|store| &store.code == code)
        } else {
            None
        }
    }

    /// Back to Idle: a navigation-away event. Any in-flight request becomes
    /// stale and its completion will be discarded.
    pub fn reset(&mut self) {
        self.state = ResolutionState::Idle;
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

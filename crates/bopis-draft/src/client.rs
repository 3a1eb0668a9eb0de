//! GraphQL client for the draft-order read and replace-update calls.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use bopis_core::AppConfig;

use crate::error::ReconciliationError;
use crate::reconcile::{merge_line_inputs, subtract_line_inputs, LineAttributeUpdate};
use crate::types::{
    DraftOrderData, DraftOrderInput, DraftOrderLineInput, DraftOrderUpdateData, GraphQlRequest,
    GraphQlResponse, LineItemEdge, UpdatedDraftOrder,
};

/// Maximum number of line-item pages to read before giving up.
/// Prevents infinite loops on cycling cursors.
const MAX_PAGES: usize = 200;

/// Page size is fixed at 50 by the read query below.
const GET_DRAFT_ORDER_QUERY: &str = r"
query GetDraftOrder($id: ID!, $cursor: String) {
  draftOrder(id: $id) {
    lineItems(first: 50, after: $cursor) {
      edges {
        node {
          variant { id }
          sku
          quantity
          requiresShipping
          taxable
          grams
          appliedDiscount { title value valueType amount description }
          customAttributes { key value }
        }
        cursor
      }
      pageInfo { hasNextPage }
    }
  }
}";

const UPDATE_DRAFT_ORDER_MUTATION: &str = r"
mutation draftOrderUpdate($id: ID!, $input: DraftOrderInput!) {
  draftOrderUpdate(id: $id, input: $input) {
    draftOrder { id }
    userErrors { field message }
  }
}";

/// Client for the draft-order sync path.
///
/// Every write is read → reconcile → one replace mutation; a failed read
/// aborts before anything is mutated.
pub struct DraftOrderClient {
    http: Client,
    endpoint: Url,
}

impl DraftOrderClient {
    /// Creates a client pointed at the configured admin GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ReconciliationError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed, or
    /// [`ReconciliationError::InvalidEndpoint`] if the configured URL does
    /// not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ReconciliationError> {
        Self::with_endpoint(config, &config.admin_graphql_url)
    }

    /// Creates a client with an explicit endpoint (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`DraftOrderClient::new`].
    pub fn with_endpoint(config: &AppConfig, endpoint: &str) -> Result<Self, ReconciliationError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| ReconciliationError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { http, endpoint })
    }

    /// Reads the full line-item collection for a draft order, following the
    /// cursor until no further page is signaled.
    ///
    /// # Errors
    ///
    /// - [`ReconciliationError::MissingData`] if the order does not exist.
    /// - [`ReconciliationError::PaginationLimit`] past [`MAX_PAGES`] pages.
    /// - [`ReconciliationError::Http`] / [`UnexpectedStatus`] /
    ///   [`Deserialize`] / [`Api`] on transport or envelope failures.
    ///
    /// [`UnexpectedStatus`]: ReconciliationError::UnexpectedStatus
    /// [`Deserialize`]: ReconciliationError::Deserialize
    /// [`Api`]: ReconciliationError::Api
    pub async fn fetch_line_items(
        &self,
        order_id: &str,
    ) -> Result<Vec<LineItemEdge>, ReconciliationError> {
        let mut all_edges: Vec<LineItemEdge> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ReconciliationError::PaginationLimit {
                    order_id: order_id.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let context = format!("GetDraftOrder({order_id}, page {page_count})");
            let data: DraftOrderData = self
                .post_graphql(
                    GET_DRAFT_ORDER_QUERY,
                    json!({ "id": order_id, "cursor": cursor }),
                    &context,
                )
                .await?;

            let Some(order) = data.draft_order else {
                return Err(ReconciliationError::MissingData { context });
            };

            let connection = order.line_items;
            cursor = connection.edges.last().and_then(|edge| edge.cursor.clone());
            all_edges.extend(connection.edges);

            if !connection.page_info.has_next_page {
                break;
            }
        }

        tracing::debug!(order_id, lines = all_edges.len(), "draft order read complete");
        Ok(all_edges)
    }

    /// Merges pickup attribute triplets into the requested variants' lines
    /// and resends the whole line-item list.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::fetch_line_items`] (no mutation is attempted
    /// in that case), plus [`ReconciliationError::UserErrors`] or
    /// [`ReconciliationError::MissingData`] from the mutation itself.
    pub async fn write_pickup_attributes(
        &self,
        order_id: &str,
        updates: &[LineAttributeUpdate],
    ) -> Result<UpdatedDraftOrder, ReconciliationError> {
        let edges = self.fetch_line_items(order_id).await?;
        let line_items = merge_line_inputs(&edges, updates);
        self.submit_line_items(order_id, line_items).await
    }

    /// Subtracts pickup attribute triplets from the requested variants'
    /// lines and resends the whole line-item list.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write_pickup_attributes`].
    pub async fn remove_pickup_attributes(
        &self,
        order_id: &str,
        removals: &[LineAttributeUpdate],
    ) -> Result<UpdatedDraftOrder, ReconciliationError> {
        let edges = self.fetch_line_items(order_id).await?;
        let line_items = subtract_line_inputs(&edges, removals);
        self.submit_line_items(order_id, line_items).await
    }

    async fn submit_line_items(
        &self,
        order_id: &str,
        line_items: Vec<DraftOrderLineInput>,
    ) -> Result<UpdatedDraftOrder, ReconciliationError> {
        let context = format!("draftOrderUpdate({order_id})");
        let input = DraftOrderInput { line_items };
        let data: DraftOrderUpdateData = self
            .post_graphql(
                UPDATE_DRAFT_ORDER_MUTATION,
                json!({ "id": order_id, "input": input }),
                &context,
            )
            .await?;

        let Some(payload) = data.draft_order_update else {
            return Err(ReconciliationError::MissingData { context });
        };
        if !payload.user_errors.is_empty() {
            tracing::error!(order_id, errors = ?payload.user_errors, "draft order update rejected");
            return Err(ReconciliationError::UserErrors(payload.user_errors));
        }
        payload
            .draft_order
            .ok_or(ReconciliationError::MissingData { context })
    }

    /// POSTs a GraphQL request, asserts a 2xx status, checks the top-level
    /// `errors` array, and deserializes `data`.
    async fn post_graphql<V, T>(
        &self,
        query: &str,
        variables: V,
        context: &str,
    ) -> Result<T, ReconciliationError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let request = GraphQlRequest { query, variables };
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReconciliationError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&text).map_err(|e| ReconciliationError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        if !envelope.errors.is_empty() {
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ReconciliationError::Api {
                context: context.to_owned(),
                messages,
            });
        }
        envelope.data.ok_or_else(|| ReconciliationError::MissingData {
            context: context.to_owned(),
        })
    }
}

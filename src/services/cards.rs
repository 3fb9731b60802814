//! Card provisioning and lifecycle operations.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;

use crate::client::{Client, NO_BODY, escape_path_segment, path_with_query};
use crate::error::{AccessGridError, Result};
use crate::models::{Card, CardOrPass, ListKeysParams, ProvisionParams, UnifiedAccessPass, UpdateParams};

/// Operations on NFC key cards.
///
/// Obtained from [`crate::AccessGrid::cards`]. All operations are single
/// signed round trips and may be invoked concurrently.
#[derive(Debug, Clone)]
pub struct AccessCards {
    client: Arc<Client>,
}

impl AccessCards {
    pub(crate) fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Provisions a new card.
    ///
    /// Depending on account configuration the service answers with either a
    /// single card or a unified multi-device access pass; the result carries
    /// whichever was returned.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::Api`] when the service rejects the request
    /// and [`AccessGridError::Decode`] when the response matches neither
    /// shape.
    #[instrument(skip(self, params))]
    pub async fn provision(&self, params: &ProvisionParams) -> Result<CardOrPass> {
        let raw = self.client.request_raw(Method::POST, "/v1/key-cards", Some(params)).await?;
        resolve_card_payload(&raw)
    }

    /// Fetches a card by ID.
    ///
    /// Like [`provision`](Self::provision), the response resolves to either a
    /// card or a unified access pass.
    #[instrument(skip(self))]
    pub async fn get(&self, card_id: &str) -> Result<CardOrPass> {
        let path = format!("/v1/key-cards/{}", escape_path_segment(card_id));
        let raw = self.client.request_raw(Method::GET, &path, NO_BODY).await?;
        resolve_card_payload(&raw)
    }

    /// Updates an existing card. The card is selected by `params.card_id`.
    #[instrument(skip(self, params))]
    pub async fn update(&self, params: &UpdateParams) -> Result<Card> {
        let path = format!("/v1/key-cards/{}", escape_path_segment(&params.card_id));
        self.client.request(Method::PATCH, &path, Some(params)).await
    }

    /// Lists cards matching the given filters.
    ///
    /// Set filters become query parameters; unset filters are omitted from
    /// the query string entirely.
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &ListKeysParams) -> Result<Vec<Card>> {
        #[derive(Deserialize)]
        struct ListResponse {
            #[serde(default)]
            keys: Vec<Card>,
        }

        let path = path_with_query("/v1/key-cards", &list_query(params));
        let response: ListResponse = self.client.request(Method::GET, &path, NO_BODY).await?;
        Ok(response.keys)
    }

    /// Suspends a card. A suspended card stops working until resumed.
    #[instrument(skip(self))]
    pub async fn suspend(&self, card_id: &str) -> Result<()> {
        self.lifecycle_action(card_id, "suspend").await
    }

    /// Resumes a suspended card.
    #[instrument(skip(self))]
    pub async fn resume(&self, card_id: &str) -> Result<()> {
        self.lifecycle_action(card_id, "resume").await
    }

    /// Unlinks a card from the device it is installed on.
    #[instrument(skip(self))]
    pub async fn unlink(&self, card_id: &str) -> Result<()> {
        self.lifecycle_action(card_id, "unlink").await
    }

    /// Deletes a card.
    #[instrument(skip(self))]
    pub async fn delete(&self, card_id: &str) -> Result<()> {
        self.lifecycle_action(card_id, "delete").await
    }

    /// State-changing operations share one shape: POST with an empty-object
    /// body, no meaningful response body.
    async fn lifecycle_action(&self, card_id: &str, action: &str) -> Result<()> {
        let path = format!("/v1/key-cards/{}/{action}", escape_path_segment(card_id));
        let empty = serde_json::json!({});
        self.client.request_no_content(Method::POST, &path, Some(&empty)).await
    }
}

/// Builds list query parameters from set filter fields, in wire order.
fn list_query(params: &ListKeysParams) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(template_id) = &params.template_id {
        query.push(("template_id", template_id.clone()));
    }
    if let Some(state) = &params.state {
        query.push(("state", state.clone()));
    }
    if let Some(employee_id) = &params.employee_id {
        query.push(("employee_id", employee_id.clone()));
    }
    if let Some(card_number) = &params.card_number {
        query.push(("card_number", card_number.clone()));
    }
    if let Some(site_code) = &params.site_code {
        query.push(("site_code", site_code.clone()));
    }
    query
}

/// Shape peeked at to pick the response variant. `details` defaults to empty
/// when absent, so a flat card and a pass probe identically cheaply.
#[derive(Deserialize)]
struct DetailsProbe {
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

/// Resolves a card-fetching response into its concrete variant.
///
/// The wire format carries no type tag: a payload with a non-empty `details`
/// array is a unified multi-device access pass, anything else is a flat
/// card. An empty `details` array does NOT indicate a pass. The rule is
/// structural: a plain card response that ever grew a non-empty `details`
/// field would be misclassified, so the service guarantees it never does.
///
/// Parsing is two-pass: a cheap probe of `details` first, then a full decode
/// into the chosen shape, since the two shapes are structurally
/// incompatible. Failures name the pass that rejected the payload.
fn resolve_card_payload(raw: &[u8]) -> Result<CardOrPass> {
    let probe: DetailsProbe = serde_json::from_slice(raw)
        .map_err(|e| AccessGridError::Decode(format!("probing card response: {e}")))?;

    if probe.details.is_empty() {
        let card: Card = serde_json::from_slice(raw)
            .map_err(|e| AccessGridError::Decode(format!("decoding card: {e}")))?;
        Ok(CardOrPass::Card(card))
    } else {
        let pass: UnifiedAccessPass = serde_json::from_slice(raw)
            .map_err(|e| AccessGridError::Decode(format!("decoding unified access pass: {e}")))?;
        Ok(CardOrPass::UnifiedAccessPass(pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_details_resolves_as_unified_pass() {
        let raw = br#"{
            "id": "0xp455",
            "full_name": "Employee name",
            "state": "active",
            "details": [
                {"id": "0xc4rd1", "state": "active"},
                {"id": "0xc4rd2", "state": "suspended"}
            ]
        }"#;
        let resolved = resolve_card_payload(raw).unwrap();
        let pass = resolved.as_unified_access_pass().expect("expected unified pass");
        assert_eq!(pass.id, "0xp455");
        assert_eq!(pass.details.len(), 2);
        assert_eq!(pass.details[0].id, "0xc4rd1");
        assert_eq!(pass.details[1].state, "suspended");
    }

    #[test]
    fn empty_details_resolves_as_card() {
        let raw = br#"{"id": "0xc4rd1d", "state": "active", "details": []}"#;
        let resolved = resolve_card_payload(raw).unwrap();
        let card = resolved.as_card().expect("expected card");
        assert_eq!(card.id, "0xc4rd1d");
    }

    #[test]
    fn missing_details_resolves_as_card() {
        let raw = br#"{
            "id": "0xc4rd1d",
            "card_template_id": "0xd3adb00b5",
            "full_name": "Employee name",
            "state": "active",
            "install_url": "https://accessgrid.com/install/0xc4rd1d"
        }"#;
        let resolved = resolve_card_payload(raw).unwrap();
        let card = resolved.as_card().expect("expected card");
        assert_eq!(card.install_url, "https://accessgrid.com/install/0xc4rd1d");
    }

    #[test]
    fn malformed_payload_fails_in_probe_pass() {
        let err = resolve_card_payload(b"not json").unwrap_err();
        match err {
            AccessGridError::Decode(message) => assert!(message.contains("probing")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn pass_with_malformed_details_entries_fails_in_decode_pass() {
        // Probe succeeds (details is a non-empty array) but the entries are
        // not card-shaped, so the full decode rejects it.
        let raw = br#"{"id": "0xp455", "details": ["just-a-string"]}"#;
        let err = resolve_card_payload(raw).unwrap_err();
        match err {
            AccessGridError::Decode(message) => {
                assert!(message.contains("unified access pass"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn list_query_includes_only_set_filters() {
        let params = ListKeysParams {
            template_id: Some("0xd3adb00b5".to_owned()),
            state: Some("active".to_owned()),
            ..ListKeysParams::default()
        };
        let query = list_query(&params);
        assert_eq!(
            query,
            vec![
                ("template_id", "0xd3adb00b5".to_owned()),
                ("state", "active".to_owned()),
            ]
        );
    }

    #[test]
    fn list_query_empty_for_default_filters() {
        assert!(list_query(&ListKeysParams::default()).is_empty());
    }
}

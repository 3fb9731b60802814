//! Enterprise console operations: template management and event logs.

use std::sync::Arc;

use chrono::SecondsFormat;
use reqwest::Method;
use tracing::instrument;

use crate::client::{Client, NO_BODY, escape_path_segment, path_with_query};
use crate::error::Result;
use crate::models::{CreateTemplateParams, Event, EventLogFilters, Template, UpdateTemplateParams};

/// Operations on card templates and their event logs.
///
/// Obtained from [`crate::AccessGrid::console`].
#[derive(Debug, Clone)]
pub struct Console {
    client: Arc<Client>,
}

impl Console {
    pub(crate) fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Creates a new card template.
    #[instrument(skip(self, params))]
    pub async fn create_template(&self, params: &CreateTemplateParams) -> Result<Template> {
        self.client.request(Method::POST, "/v1/console/card-templates", Some(params)).await
    }

    /// Updates an existing template. The template is selected by
    /// `params.card_template_id`.
    #[instrument(skip(self, params))]
    pub async fn update_template(&self, params: &UpdateTemplateParams) -> Result<Template> {
        let path = format!(
            "/v1/console/card-templates/{}",
            escape_path_segment(&params.card_template_id)
        );
        self.client.request(Method::PUT, &path, Some(params)).await
    }

    /// Fetches a template by ID.
    #[instrument(skip(self))]
    pub async fn read_template(&self, template_id: &str) -> Result<Template> {
        let path = format!("/v1/console/card-templates/{}", escape_path_segment(template_id));
        self.client.request(Method::GET, &path, NO_BODY).await
    }

    /// Lists all templates for the account.
    #[instrument(skip(self))]
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.client.request(Method::GET, "/v1/console/card-templates", NO_BODY).await
    }

    /// Deletes a template.
    #[instrument(skip(self))]
    pub async fn delete_template(&self, template_id: &str) -> Result<()> {
        let path = format!("/v1/console/card-templates/{}", escape_path_segment(template_id));
        self.client.request_no_content(Method::DELETE, &path, NO_BODY).await
    }

    /// Queries a template's event log.
    ///
    /// Set filters become query parameters (dates in RFC 3339); unset
    /// filters are omitted from the query string entirely.
    #[instrument(skip(self, filters))]
    pub async fn event_log(
        &self,
        template_id: &str,
        filters: &EventLogFilters,
    ) -> Result<Vec<Event>> {
        let path = path_with_query(
            &format!("/v1/console/card-templates/{}/logs", escape_path_segment(template_id)),
            &event_log_query(filters),
        );
        self.client.request(Method::GET, &path, NO_BODY).await
    }
}

/// Builds event log query parameters from set filters, in wire order.
fn event_log_query(filters: &EventLogFilters) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(device) = &filters.device {
        query.push(("device", device.clone()));
    }
    if let Some(start_date) = &filters.start_date {
        query.push(("start_date", start_date.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    if let Some(end_date) = &filters.end_date {
        query.push(("end_date", end_date.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    if let Some(event_type) = &filters.event_type {
        query.push(("event_type", event_type.clone()));
    }
    query
}

//! Record-set listing endpoint.

use crate::ZoneClient;
use dangle_core::{DangleError, ListRecordSetsRequest, RecordSetPage, Result, StartPosition};
use tracing::debug;

/// Prefix some tooling puts in front of zone identifiers
const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";

/// Record-set endpoints
pub struct RecordSetsApi<'a> {
    client: &'a ZoneClient,
}

impl<'a> RecordSetsApi<'a> {
    pub(crate) fn new(client: &'a ZoneClient) -> Self {
        Self { client }
    }

    /// List one page of a zone's record sets
    #[must_use]
    pub fn list(&self, zone_id: impl Into<String>) -> ListRecordSetsBuilder<'a> {
        ListRecordSetsBuilder::new(self.client, zone_id.into())
    }

    /// Fetch the page described by `request`
    pub async fn fetch(&self, request: &ListRecordSetsRequest) -> Result<RecordSetPage> {
        let mut builder = self.list(request.zone_id.clone());

        if let Some(start) = &request.start {
            builder = builder.start(start.clone());
        }

        if let Some(max) = request.max_items {
            builder = builder.max_items(max);
        }

        builder.send().await
    }
}

/// Builder for record-set listing requests
pub struct ListRecordSetsBuilder<'a> {
    client: &'a ZoneClient,
    zone_id: String,
    start: Option<StartPosition>,
    max_items: Option<u32>,
}

impl<'a> ListRecordSetsBuilder<'a> {
    fn new(client: &'a ZoneClient, zone_id: String) -> Self {
        Self {
            client,
            zone_id,
            start: None,
            max_items: None,
        }
    }

    /// Continue from a cursor returned by a previous page
    #[must_use]
    pub fn start(mut self, start: StartPosition) -> Self {
        self.start = Some(start);
        self
    }

    /// Limit the number of record sets on the page
    #[must_use]
    pub const fn max_items(mut self, max: u32) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<RecordSetPage> {
        let zone_id = normalize_zone_id(&self.zone_id);
        if zone_id.is_empty() {
            return Err(DangleError::Config("zone id is empty".into()));
        }

        let mut params: Vec<(&str, String)> = Vec::new();

        // name, type and identifier travel together or not at all
        if let Some(start) = &self.start {
            params.push(("name", start.name.clone()));
            if let Some(ref rtype) = start.record_type {
                params.push(("type", rtype.clone()));
            }
            if let Some(ref identifier) = start.identifier {
                params.push(("identifier", identifier.clone()));
            }
        }

        if let Some(max) = self.max_items {
            params.push(("maxitems", max.to_string()));
        }

        let params_ref: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();

        let value = self
            .client
            .get_with_query(&format!("/hostedzone/{zone_id}/rrset"), &params_ref, zone_id)
            .await?;

        let page: RecordSetPage =
            serde_json::from_value(value).map_err(|e| DangleError::Decode(e.to_string()))?;

        debug!(
            zone_id,
            records = page.resource_record_sets.len(),
            truncated = page.is_truncated,
            "received record-set page"
        );

        Ok(page)
    }
}

/// Accept both `Z123` and `/hostedzone/Z123`
fn normalize_zone_id(zone_id: &str) -> &str {
    zone_id
        .trim()
        .strip_prefix(HOSTED_ZONE_PREFIX)
        .unwrap_or_else(|| zone_id.trim())
}
